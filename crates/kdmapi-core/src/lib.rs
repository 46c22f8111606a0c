//! Safe facade over KDMAPI, OmniMIDI's direct MIDI API.
//!
//! Wraps every entry point of [`kdmapi_sys::Driver`] with typed arguments and
//! [`Result`] returns, and turns the long-message prepare/send/unprepare
//! protocol into a guard ([`PreparedLongData`]).
//!
//! # Example
//!
//! ```ignore
//! use kdmapi_core::Kdmapi;
//!
//! let kdmapi = Kdmapi::builder()
//!     .library_path("C:/Windows/System32/OmniMIDI.dll")
//!     .build()?;
//!
//! kdmapi.initialize_stream()?;
//! kdmapi.send_direct_data(0x0064_3C90);
//! kdmapi.send_direct_long_data_no_buf(&[0xF0, 0x7E, 0x7F, 0x09, 0x01, 0xF7])?;
//! kdmapi.terminate_stream()?;
//! ```
//!
//! Feature gates: `mock` (recording driver stand-in for tests).

pub mod error;
pub use error::{Error, Operation, Result};

mod builder;
pub use builder::{KdmapiBuilder, LIBRARY_ENV_VAR};

mod kdmapi;
pub use kdmapi::Kdmapi;

mod long_data;
pub use long_data::{LongData, PreparedLongData};

mod version;
pub use version::DriverVersion;

mod debug_info;
pub use debug_info::DebugSnapshot;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use kdmapi_sys::{
    DebugInfo, Driver, LoadError, MidiHdr, MmResult, NativeLibrary, SettingMode,
    DEFAULT_LIBRARY_NAME,
};
