//! Errors raised while loading the native library.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Failed to open KDMAPI library {path}: {reason}")]
    Open { path: PathBuf, reason: String },

    #[error("KDMAPI library {path} does not export {symbol}: {reason}")]
    MissingSymbol {
        path: PathBuf,
        symbol: &'static str,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, LoadError>;
