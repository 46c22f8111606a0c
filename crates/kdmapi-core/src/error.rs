//! Error types for the KDMAPI facade.

use kdmapi_sys::{LoadError, MmResult};
use thiserror::Error;

/// Native entry point an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ReturnKdmapiVer,
    InitializeKdmapiStream,
    TerminateKdmapiStream,
    SendCustomEvent,
    SendDirectLongData,
    SendDirectLongDataNoBuf,
    PrepareLongData,
    UnprepareLongData,
    DriverSettings,
    GetDriverDebugInfo,
    LoadCustomSoundFontsList,
    ModMessage,
}

impl Operation {
    /// Exported symbol name.
    pub fn symbol(self) -> &'static str {
        match self {
            Operation::ReturnKdmapiVer => "ReturnKDMAPIVer",
            Operation::InitializeKdmapiStream => "InitializeKDMAPIStream",
            Operation::TerminateKdmapiStream => "TerminateKDMAPIStream",
            Operation::SendCustomEvent => "SendCustomEvent",
            Operation::SendDirectLongData => "SendDirectLongData",
            Operation::SendDirectLongDataNoBuf => "SendDirectLongDataNoBuf",
            Operation::PrepareLongData => "PrepareLongData",
            Operation::UnprepareLongData => "UnprepareLongData",
            Operation::DriverSettings => "DriverSettings",
            Operation::GetDriverDebugInfo => "GetDriverDebugInfo",
            Operation::LoadCustomSoundFontsList => "LoadCustomSoundFontsList",
            Operation::ModMessage => "modMessage",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("{0} failed")]
    CallFailed(Operation),

    #[error("{operation} failed with {}", status_name(.code))]
    Status { operation: Operation, code: u32 },

    #[error("Invalid argument for {operation}: {reason}")]
    InvalidArgument {
        operation: Operation,
        reason: String,
    },

    #[error("GetDriverDebugInfo returned a null pointer")]
    NullDebugInfo,
}

impl Error {
    /// Entry point that failed, when the error came from a native call.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Error::CallFailed(operation)
            | Error::Status { operation, .. }
            | Error::InvalidArgument { operation, .. } => Some(*operation),
            Error::NullDebugInfo => Some(Operation::GetDriverDebugInfo),
            Error::Load(_) => None,
        }
    }

    /// Decoded status code for [`Error::Status`].
    pub fn mm_result(&self) -> Option<MmResult> {
        match self {
            Error::Status { code, .. } => MmResult::from_raw(*code),
            _ => None,
        }
    }
}

fn status_name(code: &u32) -> String {
    match MmResult::from_raw(*code) {
        Some(result) => result.to_string(),
        None => format!("unknown status {code}"),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
