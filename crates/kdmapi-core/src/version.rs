//! KDMAPI version reported by the driver.

use serde::{Deserialize, Serialize};

/// `Major.Minor.Build Rev. Revision`, e.g. `1.30.0 Rev. 51`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DriverVersion {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    pub revision: u32,
}

impl DriverVersion {
    pub const fn new(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
        }
    }

    /// `[major, minor, build, revision]`.
    pub const fn to_array(self) -> [u32; 4] {
        [self.major, self.minor, self.build, self.revision]
    }
}

impl From<[u32; 4]> for DriverVersion {
    fn from([major, minor, build, revision]: [u32; 4]) -> Self {
        Self::new(major, minor, build, revision)
    }
}

impl std::fmt::Display for DriverVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{}.{} Rev. {}",
            self.major, self.minor, self.build, self.revision
        )
    }
}
