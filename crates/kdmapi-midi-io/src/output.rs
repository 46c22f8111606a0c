//! OmniMIDI output port.

use crate::error::Result;
use crate::message::MidiOutputMessage;
use crate::packing::pack_short_message;
use kdmapi_core::{Driver, Kdmapi, NativeLibrary};
use tracing::{debug, warn};

/// Capability set of a MIDI output port.
///
/// `Closed --open--> Open --send*--> Open --close--> Closed`
pub trait MidiOutputPort {
    fn open(&mut self) -> Result<()>;

    fn close(&mut self) -> Result<()>;

    fn send(&mut self, message: &MidiOutputMessage) -> Result<()>;

    fn is_open(&self) -> bool;
}

/// Output port writing straight into the driver through KDMAPI.
///
/// Sysex goes out with `SendDirectLongDataNoBuf`, everything else is packed
/// into one word for `SendDirectData`. Sending while closed is forwarded
/// as-is; what the driver does with it is undefined.
pub struct KdmapiOutput<'k, D: Driver = NativeLibrary> {
    kdmapi: &'k Kdmapi<D>,
    is_open: bool,
}

impl KdmapiOutput<'static> {
    /// Opened port on the process-wide library handle.
    pub fn global() -> Result<Self> {
        Self::connect(Kdmapi::global()?)
    }
}

impl<'k, D: Driver> KdmapiOutput<'k, D> {
    /// Closed port.
    pub fn new(kdmapi: &'k Kdmapi<D>) -> Self {
        Self {
            kdmapi,
            is_open: false,
        }
    }

    /// Opened port.
    pub fn connect(kdmapi: &'k Kdmapi<D>) -> Result<Self> {
        let mut port = Self::new(kdmapi);
        port.open()?;
        Ok(port)
    }

    pub fn kdmapi(&self) -> &'k Kdmapi<D> {
        self.kdmapi
    }

    pub fn send_cc(&mut self, channel: u8, cc_number: u8, value: u8) -> Result<()> {
        self.send(&MidiOutputMessage::control_change(channel, cc_number, value))
    }

    pub fn send_note_on(&mut self, channel: u8, note: u8, velocity: u8) -> Result<()> {
        self.send(&MidiOutputMessage::note_on(channel, note, velocity))
    }

    pub fn send_note_off(&mut self, channel: u8, note: u8, velocity: u8) -> Result<()> {
        self.send(&MidiOutputMessage::note_off(channel, note, velocity))
    }

    /// Silences every channel (like `midiOutReset`).
    pub fn reset(&mut self) {
        self.kdmapi.reset_stream();
    }
}

impl<D: Driver> MidiOutputPort for KdmapiOutput<'_, D> {
    fn open(&mut self) -> Result<()> {
        if self.is_open {
            return Ok(());
        }
        self.kdmapi.initialize_stream()?;
        self.is_open = true;
        debug!("Opened KDMAPI output port");
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if !self.is_open {
            return Ok(());
        }
        self.kdmapi.terminate_stream()?;
        self.is_open = false;
        debug!("Closed KDMAPI output port");
        Ok(())
    }

    fn send(&mut self, message: &MidiOutputMessage) -> Result<()> {
        if !self.is_open {
            warn!("Sending MIDI message on a closed KDMAPI output port");
        }

        if message.is_sysex() {
            self.kdmapi.send_direct_long_data_no_buf(&message.bytes)?;
        } else {
            let packed = pack_short_message(&message.bytes)?;
            self.kdmapi.send_direct_data(packed);
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.is_open
    }
}

impl<D: Driver> Drop for KdmapiOutput<'_, D> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("Failed to close KDMAPI output port: {}", e);
        }
    }
}
