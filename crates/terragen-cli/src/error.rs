//! Failure taxonomy of a generation call.

use std::path::PathBuf;

use terragen_map::{ExportError, LocateError};
use terragen_terrain::GridError;

use crate::engine::MAX_DIMENSION;

/// Why manual dimensions were rejected.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum DimensionProblem {
    #[error("{axis} must be greater than zero, got {value}")]
    NotPositive { axis: &'static str, value: f64 },
    #[error("{axis} of {value} exceeds the {limit} unit map limit", limit = MAX_DIMENSION)]
    TooLarge { axis: &'static str, value: f64 },
}

/// A failed generation. Each variant renders as one human-readable line.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(#[from] DimensionProblem),

    #[error(transparent)]
    NoValidHintBrush(#[from] LocateError),

    #[error("invalid grid configuration: {0}")]
    GridConfigurationInvalid(#[from] GridError),

    #[error("hint mode needs a source map file")]
    MissingSourceFile,

    #[error(transparent)]
    IoFailure(#[from] ExportError),
}

impl GenerationError {
    /// The file involved in an I/O failure, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            GenerationError::IoFailure(
                ExportError::Read { path, .. }
                | ExportError::Io { path, .. }
                | ExportError::WouldOverwriteSource(path)
                | ExportError::InvalidSourcePath(path),
            ) => Some(path),
            _ => None,
        }
    }
}
