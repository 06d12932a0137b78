use std::path::PathBuf;

/// Errors from searching a map for the hint brush.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocateError {
    #[error(
        "no valid hint brush found: expected a func_group holding exactly one brushDef \
         whose faces all use common/hint"
    )]
    NoValidHintBrush,
}

/// Errors from reading a source map or writing generated geometry.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("line range {start}..={end} is outside a source of {lines} lines")]
    SpanOutOfRange {
        start: usize,
        end: usize,
        lines: usize,
    },
    #[error("output name resolves to the source map {0}; pass a different name or enable override")]
    WouldOverwriteSource(PathBuf),
    #[error("source map path {0} has no file name")]
    InvalidSourcePath(PathBuf),
}
