//! # kdmapi - OmniMIDI bindings
//!
//! Bindings to KDMAPI, the direct MIDI API of the OmniMIDI driver.
//!
//! ## Architecture
//!
//! `kdmapi` is an umbrella crate that coordinates:
//! - **kdmapi-sys** - Entry-point table, packed structures, dynamic loading
//! - **kdmapi-core** - Safe facade (typed errors, long-message guard, queries)
//! - **kdmapi-midi-io** - Output backend (device discovery, output port, packing)
//!
//! ## Quick Start
//!
//! ```ignore
//! use kdmapi::prelude::*;
//!
//! let kdmapi = Kdmapi::global()?;
//! for device in list_devices(kdmapi)? {
//!     println!("{}", device.name); // "OmniMIDI 1.30.0 Rev. 51"
//! }
//!
//! let mut port = KdmapiOutput::connect(kdmapi)?;
//! port.send(&MidiOutputMessage::note_on(0, 60, 100))?;
//! port.close()?;
//! ```
//!
//! ## Feature Flags
//!
//! - `default` - `midi-io`
//! - `midi-io` - Output backend
//! - `mock` - Recording driver stand-in for tests

/// Re-export of kdmapi-sys for direct access to the raw table
pub use kdmapi_sys as sys;

/// Re-export of kdmapi-core
pub use kdmapi_core as core;

pub use kdmapi_core::{
    DebugSnapshot, Driver, DriverVersion, Kdmapi, KdmapiBuilder, LongData, MmResult,
    NativeLibrary, Operation, PreparedLongData, SettingMode,
};

// Output backend
#[cfg(feature = "midi-io")]
pub use kdmapi_midi_io as midi_io;

#[cfg(feature = "midi-io")]
pub use kdmapi_midi_io::{
    list_devices, pack_short_message, unpack_short_message, KdmapiOutput, MidiOutputMessage,
    MidiOutputPort, OutputDevice,
};

mod error;
pub use error::{Error, Result};

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{Error, Result};
    pub use kdmapi_core::{DriverVersion, Kdmapi, LongData};

    #[cfg(feature = "midi-io")]
    pub use kdmapi_midi_io::{list_devices, KdmapiOutput, MidiOutputMessage, MidiOutputPort};
}
