//! Error types for the OmniMIDI output backend.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Kdmapi(#[from] kdmapi_core::Error),

    #[error("Invalid MIDI message: {0}")]
    InvalidMessage(String),
}

pub type Result<T> = std::result::Result<T, Error>;
