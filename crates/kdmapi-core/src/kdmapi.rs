//! Typed KDMAPI facade.
//!
//! ```ignore
//! use kdmapi_core::Kdmapi;
//!
//! let kdmapi = Kdmapi::global()?;
//! if kdmapi.is_available() {
//!     println!("OmniMIDI {}", kdmapi.version()?);
//!     kdmapi.initialize_stream()?;
//!     kdmapi.send_direct_data(0x007F_3C90); // Note On, C4, velocity 127
//!     kdmapi.terminate_stream()?;
//! }
//! ```

use crate::builder::KdmapiBuilder;
use crate::debug_info::DebugSnapshot;
use crate::error::{Error, Operation, Result};
use crate::long_data::{LongData, PreparedLongData};
use crate::version::DriverVersion;
use kdmapi_sys::{Driver, LoadError, NativeLibrary, SettingMode};
use std::ffi::{c_char, c_void};
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

static GLOBAL: OnceLock<std::result::Result<Kdmapi, LoadError>> = OnceLock::new();

/// Safe wrapper over a KDMAPI [`Driver`].
///
/// Boolean failures become [`Error::CallFailed`], non-zero status codes
/// become [`Error::Status`]. All calls block until the driver returns.
///
/// Calls are not serialized here. Whether the driver tolerates concurrent
/// calls on one session, or settings and debug queries before
/// [`initialize_stream`](Self::initialize_stream), is up to the driver.
pub struct Kdmapi<D: Driver = NativeLibrary> {
    driver: D,
}

impl Kdmapi<NativeLibrary> {
    pub fn builder() -> KdmapiBuilder {
        KdmapiBuilder::default()
    }

    /// Process-wide instance, loaded from the default library path on first use.
    ///
    /// The library is never reloaded; a failed load is remembered and
    /// returned on every later call.
    pub fn global() -> Result<&'static Kdmapi> {
        GLOBAL
            .get_or_init(|| {
                let path = KdmapiBuilder::default().resolve_library_path();
                NativeLibrary::open(path).map(Kdmapi::with_driver)
            })
            .as_ref()
            .map_err(|e| Error::Load(e.clone()))
    }
}

impl<D: Driver> Kdmapi<D> {
    pub fn with_driver(driver: D) -> Self {
        Self { driver }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    // ==================== Queries ====================

    pub fn version(&self) -> Result<DriverVersion> {
        let (mut major, mut minor, mut build, mut revision) = (0u32, 0u32, 0u32, 0u32);
        let ok = self
            .driver
            .return_kdmapi_ver(&mut major, &mut minor, &mut build, &mut revision);
        check(ok, Operation::ReturnKdmapiVer)?;
        Ok(DriverVersion::new(major, minor, build, revision))
    }

    /// Whether the driver is installed and usable. A plain query, never an error.
    pub fn is_available(&self) -> bool {
        self.driver.is_kdmapi_available()
    }

    /// Copies the driver's current debug record.
    pub fn debug_info(&self) -> Result<DebugSnapshot> {
        let info = self.driver.get_driver_debug_info();
        if info.is_null() {
            return Err(Error::NullDebugInfo);
        }
        let info = unsafe { std::ptr::read_unaligned(info) };
        Ok(DebugSnapshot::from(info))
    }

    /// 64-bit millisecond counter kept by the driver.
    pub fn time_get_time64(&self) -> u64 {
        self.driver.time_get_time64()
    }

    // ==================== Stream lifecycle ====================

    /// Opens the driver's stream (like `midiOutOpen`).
    pub fn initialize_stream(&self) -> Result<()> {
        check(
            self.driver.initialize_kdmapi_stream(),
            Operation::InitializeKdmapiStream,
        )?;
        debug!("KDMAPI stream initialized");
        Ok(())
    }

    /// Closes the driver's stream (like `midiOutClose`).
    pub fn terminate_stream(&self) -> Result<()> {
        check(
            self.driver.terminate_kdmapi_stream(),
            Operation::TerminateKdmapiStream,
        )?;
        debug!("KDMAPI stream terminated");
        Ok(())
    }

    /// Resets the stream and every MIDI channel (like `midiOutReset`).
    pub fn reset_stream(&self) {
        self.driver.reset_kdmapi_stream();
        debug!("KDMAPI stream reset");
    }

    // ==================== Short messages ====================

    pub fn send_custom_event(&self, event_type: u32, channel: u32, param: u32) -> Result<()> {
        check(
            self.driver.send_custom_event(event_type, channel, param),
            Operation::SendCustomEvent,
        )
    }

    /// Buffered short message, packed little-endian (status in the low byte).
    pub fn send_direct_data(&self, message: u32) {
        self.driver.send_direct_data(message);
    }

    /// Like [`send_direct_data`](Self::send_direct_data), bypassing the driver's buffer.
    pub fn send_direct_data_no_buf(&self, message: u32) {
        self.driver.send_direct_data_no_buf(message);
    }

    // ==================== Long messages ====================

    /// Locks `data` for the driver. The returned guard unprepares on drop.
    pub fn prepare_long_data<'d, 'b>(
        &self,
        data: &'d mut LongData<'b>,
    ) -> Result<PreparedLongData<'_, 'd, 'b, D>> {
        PreparedLongData::prepare(&self.driver, data)
    }

    /// Prepare, send, unprepare (like `midiOutLongMsg`).
    ///
    /// Unprepare runs even when the send fails; the send error wins over
    /// an unprepare error. A failed prepare returns at once: the buffer is
    /// neither sent nor unprepared, unlike callers that ignore the prepare
    /// status and run all three calls.
    pub fn send_direct_long_data(&self, data: &mut LongData<'_>) -> Result<()> {
        let mut prepared = self.prepare_long_data(data)?;
        let sent = prepared.send();
        let released = prepared.unprepare();
        sent.and(released)
    }

    /// Sends raw long data without the buffer or the prepare protocol.
    pub fn send_direct_long_data_no_buf(&self, data: &[u8]) -> Result<()> {
        let length = u32::try_from(data.len()).map_err(|_| Error::InvalidArgument {
            operation: Operation::SendDirectLongDataNoBuf,
            reason: format!("{} bytes exceeds u32::MAX", data.len()),
        })?;
        let code = unsafe {
            self.driver
                .send_direct_long_data_no_buf(data.as_ptr() as *const c_char, length)
        };
        check_status(code, Operation::SendDirectLongDataNoBuf)
    }

    // ==================== Driver settings ====================

    /// Raw `DriverSettings` call; `value` is read or written according to `mode`.
    pub fn driver_settings(&self, setting: u32, mode: SettingMode, value: &mut [u8]) -> Result<()> {
        let size = u32::try_from(value.len()).map_err(|_| Error::InvalidArgument {
            operation: Operation::DriverSettings,
            reason: format!("{} byte value exceeds u32::MAX", value.len()),
        })?;
        let ok = unsafe {
            self.driver.driver_settings(
                setting,
                mode as u32,
                value.as_mut_ptr() as *mut c_void,
                size,
            )
        };
        check(ok, Operation::DriverSettings)
    }

    pub fn get_setting(&self, setting: u32) -> Result<u32> {
        let mut value = [0u8; 4];
        self.driver_settings(setting, SettingMode::Get, &mut value)?;
        Ok(u32::from_ne_bytes(value))
    }

    pub fn set_setting(&self, setting: u32, value: u32) -> Result<()> {
        let mut value = value.to_ne_bytes();
        self.driver_settings(setting, SettingMode::Set, &mut value)
    }

    /// Loads a soundfont list (`.sflist`, `.sf2` or `.sfz`).
    pub fn load_custom_soundfonts_list(&self, path: &Path) -> Result<()> {
        let wide = to_wide(path);
        if wide[..wide.len() - 1].contains(&0) {
            return Err(Error::InvalidArgument {
                operation: Operation::LoadCustomSoundFontsList,
                reason: format!("path {} contains a NUL character", path.display()),
            });
        }
        unsafe { self.driver.load_custom_soundfonts_list(wide.as_ptr()) };
        debug!("Loaded soundfont list {}", path.display());
        Ok(())
    }

    /// Forwards a raw driver message (`modMessage`).
    ///
    /// # Safety
    /// `user`, `param1` and `param2` must be valid for whatever `message`
    /// makes the driver do with them.
    pub unsafe fn mod_message(
        &self,
        device_id: u32,
        message: u32,
        user: usize,
        param1: usize,
        param2: usize,
    ) -> Result<()> {
        let code = self
            .driver
            .mod_message(device_id, message, user, param1, param2);
        check_status(code, Operation::ModMessage)
    }
}

impl<D: Driver> std::fmt::Debug for Kdmapi<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kdmapi").finish_non_exhaustive()
    }
}

#[inline]
fn check(ok: bool, operation: Operation) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(Error::CallFailed(operation))
    }
}

#[inline]
fn check_status(code: u32, operation: Operation) -> Result<()> {
    if code == 0 {
        Ok(())
    } else {
        Err(Error::Status { operation, code })
    }
}

/// NUL-terminated UTF-16 path.
fn to_wide(path: &Path) -> Vec<u16> {
    #[cfg(windows)]
    let mut wide: Vec<u16> = {
        use std::os::windows::ffi::OsStrExt;
        path.as_os_str().encode_wide().collect()
    };
    #[cfg(not(windows))]
    let mut wide: Vec<u16> = path.to_string_lossy().encode_utf16().collect();

    wide.push(0);
    wide
}
