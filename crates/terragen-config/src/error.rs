//! Errors from reading and writing `config.ron`.

use std::path::PathBuf;

/// Failure while loading or saving the terragen config file.
///
/// File-level variants carry the path of `config.ron`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not a valid terragen config.
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] ron::Error),
}
