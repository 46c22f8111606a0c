//! `MMRESULT` codes returned by status-code entry points.

/// Multimedia result codes. `NoError` (0) is success, everything else a failure.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MmResult {
    NoError = 0,
    Error = 1,
    BadDeviceId = 2,
    NotEnabled = 3,
    Allocated = 4,
    InvalidHandle = 5,
    NoDriver = 6,
    NoMemory = 7,
    NotSupported = 8,
    BadErrorNumber = 9,
    InvalidFlag = 10,
    InvalidParameter = 11,
    HandleBusy = 12,
    InvalidAlias = 13,
    BadDatabase = 14,
    KeyNotFound = 15,
    ReadError = 16,
    WriteError = 17,
    DeleteError = 18,
    ValueNotFound = 19,
    NoDriverCallback = 20,
    WaveBadFormat = 32,
    WaveStillPlaying = 33,
    WaveUnprepared = 34,
}

impl MmResult {
    /// `None` for codes outside the enumeration.
    pub fn from_raw(code: u32) -> Option<Self> {
        use MmResult::*;
        Some(match code {
            0 => NoError,
            1 => Error,
            2 => BadDeviceId,
            3 => NotEnabled,
            4 => Allocated,
            5 => InvalidHandle,
            6 => NoDriver,
            7 => NoMemory,
            8 => NotSupported,
            9 => BadErrorNumber,
            10 => InvalidFlag,
            11 => InvalidParameter,
            12 => HandleBusy,
            13 => InvalidAlias,
            14 => BadDatabase,
            15 => KeyNotFound,
            16 => ReadError,
            17 => WriteError,
            18 => DeleteError,
            19 => ValueNotFound,
            20 => NoDriverCallback,
            32 => WaveBadFormat,
            33 => WaveStillPlaying,
            34 => WaveUnprepared,
            _ => return None,
        })
    }

    #[inline]
    pub fn is_ok(self) -> bool {
        self == MmResult::NoError
    }

    /// Symbolic name as spelled in the Windows headers.
    pub fn name(self) -> &'static str {
        match self {
            MmResult::NoError => "MMSYSERR_NOERROR",
            MmResult::Error => "MMSYSERR_ERROR",
            MmResult::BadDeviceId => "MMSYSERR_BADDEVICEID",
            MmResult::NotEnabled => "MMSYSERR_NOTENABLED",
            MmResult::Allocated => "MMSYSERR_ALLOCATED",
            MmResult::InvalidHandle => "MMSYSERR_INVALHANDLE",
            MmResult::NoDriver => "MMSYSERR_NODRIVER",
            MmResult::NoMemory => "MMSYSERR_NOMEM",
            MmResult::NotSupported => "MMSYSERR_NOTSUPPORTED",
            MmResult::BadErrorNumber => "MMSYSERR_BADERRNUM",
            MmResult::InvalidFlag => "MMSYSERR_INVALFLAG",
            MmResult::InvalidParameter => "MMSYSERR_INVALPARAM",
            MmResult::HandleBusy => "MMSYSERR_HANDLEBUSY",
            MmResult::InvalidAlias => "MMSYSERR_INVALIDALIAS",
            MmResult::BadDatabase => "MMSYSERR_BADDB",
            MmResult::KeyNotFound => "MMSYSERR_KEYNOTFOUND",
            MmResult::ReadError => "MMSYSERR_READERROR",
            MmResult::WriteError => "MMSYSERR_WRITEERROR",
            MmResult::DeleteError => "MMSYSERR_DELETEERROR",
            MmResult::ValueNotFound => "MMSYSERR_VALNOTFOUND",
            MmResult::NoDriverCallback => "MMSYSERR_NODRIVERCB",
            MmResult::WaveBadFormat => "WAVERR_BADFORMAT",
            MmResult::WaveStillPlaying => "WAVERR_STILLPLAYING",
            MmResult::WaveUnprepared => "WAVERR_UNPREPARED",
        }
    }
}

impl std::fmt::Display for MmResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), *self as u32)
    }
}

impl TryFrom<u32> for MmResult {
    type Error = u32;

    fn try_from(code: u32) -> Result<Self, u32> {
        MmResult::from_raw(code).ok_or(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_roundtrips_every_code() {
        for code in (0..=20).chain(32..=34) {
            let result = MmResult::from_raw(code).unwrap();
            assert_eq!(result as u32, code);
        }
    }

    #[test]
    fn test_from_raw_rejects_gaps() {
        assert_eq!(MmResult::from_raw(21), None);
        assert_eq!(MmResult::from_raw(31), None);
        assert_eq!(MmResult::from_raw(35), None);
        assert_eq!(MmResult::try_from(0xFFFF), Err(0xFFFF));
    }

    #[test]
    fn test_display() {
        assert_eq!(MmResult::NoError.to_string(), "MMSYSERR_NOERROR (0)");
        assert_eq!(MmResult::WaveUnprepared.to_string(), "WAVERR_UNPREPARED (34)");
        assert!(MmResult::NoError.is_ok());
        assert!(!MmResult::InvalidHandle.is_ok());
    }
}
