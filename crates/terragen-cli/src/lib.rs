//! End-to-end terrain generation: bounds from a hint brush or manual
//! dimensions, elevation grids, brush serialization and export.

mod engine;
mod error;
mod platform;

pub use engine::{
    BoundsSource, GenerationReport, GenerationRequest, MAX_DIMENSION, generate_and_export,
    manual_bounds, run_logged,
};
pub use error::{DimensionProblem, GenerationError};
pub use platform::{AppDirs, PlatformError};
