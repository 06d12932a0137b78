//! Reading and writing the brush map text format: locating the author-placed
//! hint brush, serializing elevation grids as convex brushes, and splicing the
//! result back into the source map.

mod brush;
mod error;
mod export;
mod face;
mod locate;
mod scan;

pub use brush::{CAULK_TEXTURE, GeneratedGeometry, serialize_terrain, serialize_tunnel};
pub use error::{ExportError, LocateError};
pub use export::{
    DEFAULT_MANUAL_NAME, LineEnding, output_path, read_map, splice, standalone_map, write_map,
};
pub use face::{Face, TEXTURE_MATRIX, parse_face_points};
pub use locate::{HINT_TEXTURE, HintBrush, find_hint_brush, hint_bounds};
pub use scan::{GroupCandidate, GroupProgress, LineKind, LineSpan, ScanState, scan_groups};
