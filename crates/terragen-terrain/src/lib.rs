//! Procedural elevation for brush terrain: gradient and uniform noise, closed-form
//! shape profiles, grid fitting, and the flat and tunnel elevation grids.

mod error;
mod fit;
mod gradient;
mod grid;
mod heightmap;
mod seed;
mod shape;
mod tunnel;

pub use error::GridError;
pub use fit::{MAX_FIT_DRIFT, fit_to_grid, require_power_of_two, validate_steps};
pub use gradient::{ClassicPerlin, PERMUTATION, TableSimplex};
pub use grid::{ElevationGrid, GridAxis};
pub use heightmap::{NoiseField, NoiseKind, TerrainParams, generate_elevation, terrace_down};
pub use seed::{NoiseSeeds, SEED_RANGE, entropy_seed, seeded_rng};
pub use shape::{Shape, ShapeParseError, center_distance, edge_distance};
pub use tunnel::{TunnelGrids, TunnelShape, cross_section_blend, generate_tunnel};
