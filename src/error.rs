//! Centralized error type for the kdmapi umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Kdmapi(#[from] kdmapi_core::Error),

    #[cfg(feature = "midi-io")]
    #[error("MIDI I/O: {0}")]
    MidiIo(#[from] kdmapi_midi_io::Error),
}

impl From<kdmapi_sys::LoadError> for Error {
    fn from(e: kdmapi_sys::LoadError) -> Self {
        Error::Kdmapi(e.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
