//! Long (system-exclusive) message buffers and the prepare/unprepare protocol.
//!
//! ```ignore
//! let mut sysex = [0xF0, 0x7E, 0x7F, 0x09, 0x01, 0xF7];
//! let mut data = LongData::new(&mut sysex)?;
//!
//! // One-shot: prepare, send, unprepare
//! kdmapi.send_direct_long_data(&mut data)?;
//!
//! // Or hold the lock explicitly
//! let mut prepared = kdmapi.prepare_long_data(&mut data)?;
//! prepared.send()?;
//! prepared.unprepare()?;
//! ```

use crate::error::{Error, Operation, Result};
use kdmapi_sys::{Driver, MidiHdr, MHDR_PREPARED, MIDIHDR_SIZE};
use std::ffi::c_char;
use std::marker::PhantomData;
use tracing::warn;

/// A `MIDIHDR` describing a caller-owned byte buffer.
///
/// Holds the exclusive borrow of the buffer for its whole lifetime, so the
/// bytes cannot be touched while the driver may be reading them.
pub struct LongData<'a> {
    header: MidiHdr,
    _buffer: PhantomData<&'a mut [u8]>,
}

impl<'a> LongData<'a> {
    /// Fails when the buffer does not fit the header's 32-bit length field.
    pub fn new(buffer: &'a mut [u8]) -> Result<Self> {
        let length = u32::try_from(buffer.len()).map_err(|_| Error::InvalidArgument {
            operation: Operation::PrepareLongData,
            reason: format!("buffer of {} bytes exceeds u32::MAX", buffer.len()),
        })?;

        Ok(Self {
            header: MidiHdr::new(buffer.as_mut_ptr() as *mut c_char, length),
            _buffer: PhantomData,
        })
    }

    /// Sets the opaque `dwUser` tag.
    pub fn with_user(mut self, user: usize) -> Self {
        self.header.dw_user = user;
        self
    }

    pub fn len(&self) -> usize {
        self.header.dw_buffer_length as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn user(&self) -> usize {
        self.header.dw_user
    }

    /// Flags last written by the driver.
    pub fn flags(&self) -> u32 {
        self.header.dw_flags
    }

    pub fn is_prepared(&self) -> bool {
        self.flags() & MHDR_PREPARED != 0
    }

    pub fn header(&self) -> &MidiHdr {
        &self.header
    }

    fn header_ptr(&mut self) -> *mut MidiHdr {
        &mut self.header
    }
}

impl std::fmt::Debug for LongData<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LongData")
            .field("len", &self.len())
            .field("user", &self.user())
            .field("flags", &self.flags())
            .finish()
    }
}

/// A long-data buffer locked by `PrepareLongData`.
///
/// Dropping the guard calls `UnprepareLongData`, so the lock is released on
/// every path, including early returns and unwinding.
/// [`unprepare`](Self::unprepare) does the same but reports the status.
pub struct PreparedLongData<'k, 'd, 'b, D: Driver> {
    driver: &'k D,
    data: &'d mut LongData<'b>,
    released: bool,
}

impl<'k, 'd, 'b, D: Driver> PreparedLongData<'k, 'd, 'b, D> {
    pub(crate) fn prepare(driver: &'k D, data: &'d mut LongData<'b>) -> Result<Self> {
        let code = unsafe { driver.prepare_long_data(data.header_ptr(), MIDIHDR_SIZE) };
        if code != 0 {
            return Err(Error::Status {
                operation: Operation::PrepareLongData,
                code,
            });
        }

        Ok(Self {
            driver,
            data,
            released: false,
        })
    }

    /// Hands the buffer to the driver with `SendDirectLongData`.
    pub fn send(&mut self) -> Result<()> {
        let code = unsafe {
            self.driver
                .send_direct_long_data(self.data.header_ptr(), MIDIHDR_SIZE)
        };
        if code != 0 {
            return Err(Error::Status {
                operation: Operation::SendDirectLongData,
                code,
            });
        }
        Ok(())
    }

    pub fn data(&self) -> &LongData<'b> {
        self.data
    }

    /// Releases the lock now and reports the driver's status.
    pub fn unprepare(mut self) -> Result<()> {
        self.released = true;
        let code = self.release();
        if code != 0 {
            return Err(Error::Status {
                operation: Operation::UnprepareLongData,
                code,
            });
        }
        Ok(())
    }

    fn release(&mut self) -> u32 {
        unsafe {
            self.driver
                .unprepare_long_data(self.data.header_ptr(), MIDIHDR_SIZE)
        }
    }
}

impl<D: Driver> Drop for PreparedLongData<'_, '_, '_, D> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        let code = self.release();
        if code != 0 {
            warn!("UnprepareLongData failed with status {} on drop", code);
        }
    }
}
