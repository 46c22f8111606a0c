//! Raw bindings to KDMAPI, the direct MIDI API exported by OmniMIDI.
//!
//! This crate only describes the native contract:
//! - the two 1-byte packed structures exchanged with the driver ([`MidiHdr`], [`DebugInfo`])
//! - the `MMRESULT` status enumeration ([`MmResult`])
//! - the entry-point table as the [`Driver`] trait, with exact argument widths
//! - [`NativeLibrary`], which resolves every entry point from the shared library
//!
//! Safe wrappers live in `kdmapi-core`.

pub mod error;
pub use error::{LoadError, Result};

mod driver;
pub use driver::Driver;

mod library;
pub use library::{NativeLibrary, DEFAULT_LIBRARY_NAME};

mod result;
pub use result::MmResult;

pub mod types;
pub use types::{
    DebugInfo, MidiHdr, SettingMode, DEBUG_INFO_SIZE, MHDR_DONE, MHDR_INQUEUE, MHDR_PREPARED,
    MIDIHDR_SIZE,
};

/// Symbol names of every KDMAPI entry point, in table order.
pub const ENTRY_POINTS: [&str; 17] = [
    "ReturnKDMAPIVer",
    "IsKDMAPIAvailable",
    "InitializeKDMAPIStream",
    "TerminateKDMAPIStream",
    "ResetKDMAPIStream",
    "SendCustomEvent",
    "SendDirectData",
    "SendDirectDataNoBuf",
    "SendDirectLongData",
    "SendDirectLongDataNoBuf",
    "PrepareLongData",
    "UnprepareLongData",
    "DriverSettings",
    "GetDriverDebugInfo",
    "LoadCustomSoundFontsList",
    "timeGetTime64",
    "modMessage",
];
