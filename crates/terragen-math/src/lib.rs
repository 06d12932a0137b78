//! f64 geometry primitives for brush-based map geometry: planes built from
//! three points, three-plane intersection, half-space culling, and the
//! axis-aligned bounds of a brush.

mod aabb;
mod plane;

pub use aabb::BrushBounds;
pub use glam::DVec3;
pub use plane::{
    INSIDE_EPSILON, PARALLEL_EPSILON, Plane, brush_vertices, intersect_three, is_inside_all,
};
