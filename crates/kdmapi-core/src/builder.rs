//! Kdmapi builder for choosing which driver library to load.

use crate::error::Result;
use crate::kdmapi::Kdmapi;
use kdmapi_sys::{NativeLibrary, DEFAULT_LIBRARY_NAME};
use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable overriding the library path.
pub const LIBRARY_ENV_VAR: &str = "KDMAPI_LIBRARY";

/// Resolution order: [`library_path`](Self::library_path), then
/// `KDMAPI_LIBRARY`, then [`DEFAULT_LIBRARY_NAME`].
#[derive(Debug, Clone, Default)]
pub struct KdmapiBuilder {
    library_path: Option<PathBuf>,
}

impl KdmapiBuilder {
    pub fn library_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.library_path = Some(path.into());
        self
    }

    pub fn resolve_library_path(&self) -> PathBuf {
        resolve(
            self.library_path.clone(),
            std::env::var_os(LIBRARY_ENV_VAR),
        )
    }

    /// Loads a private library handle, independent of [`Kdmapi::global`].
    pub fn build(self) -> Result<Kdmapi<NativeLibrary>> {
        let path = self.resolve_library_path();
        let library = NativeLibrary::open(&path)?;
        Ok(Kdmapi::with_driver(library))
    }
}

fn resolve(explicit: Option<PathBuf>, env: Option<OsString>) -> PathBuf {
    explicit
        .or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LIBRARY_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use kdmapi_sys::LoadError;

    #[test]
    fn test_resolve_order() {
        assert_eq!(
            resolve(Some("custom.dll".into()), Some("env.dll".into())),
            PathBuf::from("custom.dll")
        );
        assert_eq!(resolve(None, Some("env.dll".into())), PathBuf::from("env.dll"));
        assert_eq!(resolve(None, Some("".into())), PathBuf::from(DEFAULT_LIBRARY_NAME));
        assert_eq!(resolve(None, None), PathBuf::from("OmniMIDI.dll"));
    }

    #[test]
    fn test_explicit_path_wins() {
        let builder = KdmapiBuilder::default().library_path("/opt/omnimidi/OmniMIDI.dll");
        assert_eq!(
            builder.resolve_library_path(),
            PathBuf::from("/opt/omnimidi/OmniMIDI.dll")
        );
    }

    #[test]
    fn test_build_missing_library() {
        let err = KdmapiBuilder::default()
            .library_path("/nonexistent/OmniMIDI.dll")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Load(LoadError::Open { .. })));
    }
}
