//! Output device discovery.

use crate::error::Result;
use kdmapi_core::{Driver, DriverVersion, Kdmapi};
use serde::{Deserialize, Serialize};

pub const DEVICE_NAME_PREFIX: &str = "OmniMIDI";

/// Information about an available MIDI output device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDevice {
    pub name: String,
    pub is_input: bool,
    pub is_output: bool,
}

/// `OmniMIDI 1.30.0 Rev. 51`
pub fn device_name(version: &DriverVersion) -> String {
    format!("{} {}", DEVICE_NAME_PREFIX, version)
}

/// The single OmniMIDI output, or nothing when KDMAPI is unavailable.
pub fn list_devices<D: Driver>(kdmapi: &Kdmapi<D>) -> Result<Vec<OutputDevice>> {
    if !kdmapi.is_available() {
        return Ok(Vec::new());
    }

    let version = kdmapi.version()?;
    Ok(vec![OutputDevice {
        name: device_name(&version),
        is_input: false,
        is_output: true,
    }])
}
