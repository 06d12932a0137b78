//! Placing generated geometry into a map file.
//!
//! In hint mode the entity block that held the hint brush is replaced by the
//! generated block and every other byte of the source is kept as-is. Manual
//! mode writes a standalone map with an empty worldspawn ahead of the block.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ExportError;
use crate::scan::LineSpan;

/// File name used in manual mode when none is given.
pub const DEFAULT_MANUAL_NAME: &str = "terrain_output.map";
/// Prefix of the sibling file written in hint mode when no name is given.
const SIBLING_PREFIX: &str = "output_";
const MAP_EXTENSION: &str = "map";

const WORLDSPAWN: &str = "// entity 0\n{\n\"classname\" \"worldspawn\"\n}";

/// Line terminator style of a source map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// The terminator used by most lines of `text`. Ties and text without
    /// any line breaks report [`LineEnding::Lf`].
    pub fn detect(text: &str) -> Self {
        let crlf = text.matches("\r\n").count();
        let lf = text.matches('\n').count() - crlf;
        if crlf > lf {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// Rewrite a `\n` separated block with this terminator.
    pub fn apply(self, block: &str) -> Cow<'_, str> {
        match self {
            LineEnding::Lf => Cow::Borrowed(block),
            LineEnding::CrLf => Cow::Owned(block.replace('\n', "\r\n")),
        }
    }
}

fn terminator(line: &str) -> &str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}

/// Replace lines `span.start..=span.end` of `source` with `block`.
///
/// Line indices count the same lines as [`str::lines`]. Text before and after
/// the span is copied unchanged, including the terminator that ended the last
/// replaced line. The block is converted to the source's dominant line
/// ending.
pub fn splice(source: &str, span: LineSpan, block: &str) -> Result<String, ExportError> {
    let lines: Vec<&str> = source.split_inclusive('\n').collect();
    if span.start > span.end || span.end >= lines.len() {
        return Err(ExportError::SpanOutOfRange {
            start: span.start,
            end: span.end,
            lines: lines.len(),
        });
    }

    let ending = LineEnding::detect(source);
    let mut out = String::with_capacity(source.len() + block.len());
    for line in &lines[..span.start] {
        out.push_str(line);
    }
    out.push_str(&ending.apply(block));
    out.push_str(terminator(lines[span.end]));
    for line in &lines[span.end + 1..] {
        out.push_str(line);
    }
    Ok(out)
}

/// A complete map holding an empty worldspawn followed by `block`.
pub fn standalone_map(block: &str) -> String {
    format!("{WORLDSPAWN}\n\n{block}\n")
}

fn with_map_extension(name: &str) -> String {
    let has_extension = Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(MAP_EXTENSION));
    if has_extension {
        name.to_owned()
    } else {
        format!("{name}.{MAP_EXTENSION}")
    }
}

/// Where generated output is written.
///
/// * hint mode with `override_source`: the source map itself;
/// * hint mode otherwise: `name` (or `output_<source file name>`) next to
///   the source;
/// * manual mode (`source == None`): `name` (or [`DEFAULT_MANUAL_NAME`]) in
///   `output_folder`.
///
/// `.map` is appended to names that lack it. A hint-mode name that resolves
/// to the source path without `override_source` is rejected.
pub fn output_path(
    source: Option<&Path>,
    name: Option<&str>,
    override_source: bool,
    output_folder: &Path,
) -> Result<PathBuf, ExportError> {
    let name = name.map(str::trim).filter(|n| !n.is_empty());
    let Some(source) = source else {
        let name = with_map_extension(name.unwrap_or(DEFAULT_MANUAL_NAME));
        return Ok(output_folder.join(name));
    };
    if override_source {
        return Ok(source.to_path_buf());
    }

    let file_name = source
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ExportError::InvalidSourcePath(source.to_path_buf()))?;
    let name = match name {
        Some(name) => with_map_extension(name),
        None => with_map_extension(&format!("{SIBLING_PREFIX}{file_name}")),
    };
    let path = source.with_file_name(name);
    if path == source {
        return Err(ExportError::WouldOverwriteSource(path));
    }
    Ok(path)
}

/// Read a source map as text.
pub fn read_map(path: &Path) -> Result<String, ExportError> {
    fs::read_to_string(path).map_err(|source| ExportError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `contents` to `path`, creating missing parent directories.
pub fn write_map(path: &Path, contents: &str) -> Result<(), ExportError> {
    let io_err = |source: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, contents).map_err(io_err)?;
    info!(path = %path.display(), bytes = contents.len(), "map written");
    Ok(())
}
