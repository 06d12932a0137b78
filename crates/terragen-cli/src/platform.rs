//! Per-user directories.

use std::path::{Path, PathBuf};

const APP_NAME: &str = "terragen";

/// Errors resolving platform directories.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("could not determine OS configuration directory")]
    NoConfigDir,
}

/// Where configuration and logs live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// Holds the debug-build JSON log.
    pub log_dir: PathBuf,
}

impl AppDirs {
    /// `<os config dir>/terragen` (XDG on Linux, Known Folders on Windows,
    /// Library on macOS).
    pub fn resolve() -> Result<Self, PlatformError> {
        let base = dirs::config_dir().ok_or(PlatformError::NoConfigDir)?;
        Ok(Self::with_config_dir(&base.join(APP_NAME)))
    }

    /// Directories rooted at an explicit config directory, as given by
    /// `--config`.
    pub fn with_config_dir(dir: &Path) -> Self {
        Self {
            config_dir: dir.to_path_buf(),
            log_dir: dir.join("logs"),
        }
    }
}
