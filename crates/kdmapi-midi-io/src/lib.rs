//! OmniMIDI as a MIDI output backend.
//!
//! Provides device discovery, an output port over KDMAPI, and the
//! short/long message serialization the driver expects.
//!
//! ```ignore
//! use kdmapi_midi_io::{list_devices, KdmapiOutput, MidiOutputMessage, MidiOutputPort};
//!
//! let kdmapi = kdmapi_core::Kdmapi::global()?;
//! for device in list_devices(kdmapi)? {
//!     println!("{}", device.name);
//! }
//!
//! let mut port = KdmapiOutput::connect(kdmapi)?;
//! port.send(&MidiOutputMessage::note_on(0, 60, 100))?;
//! port.send(&MidiOutputMessage::sysex(&[0x7E, 0x7F, 0x09, 0x01])?)?;
//! port.close()?;
//! ```

pub mod error;
pub use error::{Error, Result};

mod device;
pub use device::{device_name, list_devices, OutputDevice, DEVICE_NAME_PREFIX};

mod message;
pub use message::MidiOutputMessage;

mod output;
pub use output::{KdmapiOutput, MidiOutputPort};

mod packing;
pub use packing::{pack_short_message, unpack_short_message};

pub use midi_msg::{Channel, ChannelVoiceMsg, ControlChange, MidiMsg};
