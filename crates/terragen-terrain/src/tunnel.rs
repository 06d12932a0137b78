//! Four coupled surfaces of a tunnel running along Y.
//!
//! Floor and ceiling are height fields over `(x, y)`. The two walls are X
//! positions over `(y, z)`, sampled on their own Z step so wall cells stay
//! close to square. The opening starts at the brush top and is
//! `cave_height + slope_height` tall; a slope tunnel ramps upward along Y.

use rand::Rng;
use terragen_math::BrushBounds;

use crate::error::GridError;
use crate::grid::{ElevationGrid, GridAxis};
use crate::heightmap::{NoiseField, TerrainParams};
use crate::seed::NoiseSeeds;
use crate::shape::Shape;

/// Share of the cave height the floor rises (and the ceiling drops) at the
/// tunnel sides.
const SIDE_BULGE: f64 = 0.25;

/// Offsets added to the call seeds so the four surfaces read different
/// patches of the noise plane.
const CEILING_SEED_SHIFT: f64 = 1_913.0;
const LEFT_WALL_SEED_SHIFT: f64 = 3_571.0;
const RIGHT_WALL_SEED_SHIFT: f64 = 7_177.0;

/// Vertical layout of a tunnel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TunnelShape {
    /// Height of the opening at any point along the tunnel.
    pub cave_height: f64,
    /// Rise of the whole tunnel from `min.y` to `max.y`.
    pub slope_height: f64,
}

impl TunnelShape {
    /// Tunnel layout for `params`, or `None` for non-tunnel shapes.
    ///
    /// A plain tunnel uses the shape height as its opening. A slope tunnel
    /// uses the tunnel height as its opening and the shape height as its rise.
    pub fn from_params(params: &TerrainParams) -> Option<Self> {
        match params.shape {
            Shape::Tunnel => Some(Self {
                cave_height: params.shape_height,
                slope_height: 0.0,
            }),
            Shape::SlopeTunnel => Some(Self {
                cave_height: params.tunnel_height,
                slope_height: params.shape_height,
            }),
            _ => None,
        }
    }

    /// Total vertical span the walls must cover.
    pub fn span(&self) -> f64 {
        self.cave_height + self.slope_height
    }
}

/// Generated tunnel surfaces.
#[derive(Clone, Debug, PartialEq)]
pub struct TunnelGrids {
    /// Floor heights over `(x, y)`.
    pub floor: ElevationGrid,
    /// Ceiling heights over `(x, y)`; never below the floor.
    pub ceiling: ElevationGrid,
    /// Left wall X positions over `(y, z)`.
    pub left_wall: ElevationGrid,
    /// Right wall X positions over `(y, z)`.
    pub right_wall: ElevationGrid,
    pub shape: TunnelShape,
    /// Z step of the wall grids.
    pub step_z: f64,
}

impl TunnelGrids {
    /// Lowest Z covered by the walls (the brush top).
    pub fn wall_bottom(&self) -> f64 {
        self.left_wall.v_axis().min()
    }

    /// Highest Z covered by the walls.
    pub fn wall_top(&self) -> f64 {
        self.left_wall.v_axis().max()
    }
}

/// Circular cross-section falloff: `0` on the tunnel axis, `1` at the sides.
pub fn cross_section_blend(x: f64, center_x: f64, half_width: f64) -> f64 {
    let t = if half_width > 0.0 {
        ((x - center_x).abs() / half_width).min(1.0)
    } else {
        0.0
    };
    1.0 - (1.0 - t * t).max(0.0).sqrt()
}

/// Generate floor, ceiling and both walls for a tunnel through `bounds`.
///
/// Noise only ever narrows the opening from each side; terracing rounds the
/// floor down and the ceiling up, so `floor <= ceiling` holds at every point.
pub fn generate_tunnel(
    bounds: &BrushBounds,
    params: &TerrainParams,
    shape: TunnelShape,
    rng: &mut impl Rng,
) -> Result<TunnelGrids, GridError> {
    let span = shape.span();
    if !(span.is_finite() && span > 0.0) {
        return Err(GridError::EmptyTunnel { height: span });
    }

    let x_axis = GridAxis::new('x', bounds.min.x, bounds.max.x, params.step_x)?;
    let y_axis = GridAxis::new('y', bounds.min.y, bounds.max.y, params.step_y)?;
    let divisions = (span / params.step_x).round().max(1.0);
    let step_z = span / divisions;
    let z_axis = GridAxis::new('z', bounds.max.z, bounds.max.z + span, step_z)?;

    let seeds = NoiseSeeds::draw(rng);
    let floor_noise = NoiseField::new(params.noise, params.variance, params.frequency, seeds);
    let ceiling_noise = floor_noise.with_seeds(seeds.shifted(CEILING_SEED_SHIFT));
    let left_noise = floor_noise.with_seeds(seeds.shifted(LEFT_WALL_SEED_SHIFT));
    let right_noise = floor_noise.with_seeds(seeds.shifted(RIGHT_WALL_SEED_SHIFT));

    let center_x = bounds.center().x;
    let half_width = bounds.width() / 2.0;
    let bulge = SIDE_BULGE * shape.cave_height;
    let terrace = params.terrace_step;

    // floor and ceiling are sampled together so each pair can be reconciled
    let mut pairs = Vec::with_capacity(x_axis.points() * y_axis.points());
    for (_, x) in x_axis.iter() {
        let blend = cross_section_blend(x, center_x, half_width) * bulge;
        for (j, y) in y_axis.iter() {
            let base = bounds.max.z + shape.slope_height * y_axis.normalized(j);
            let mut floor = base + blend + floor_noise.magnitude(x, y, rng);
            let mut ceiling = base + shape.cave_height - blend - ceiling_noise.magnitude(x, y, rng);
            if floor > ceiling {
                let mid = (floor + ceiling) / 2.0;
                floor = mid;
                ceiling = mid;
            }
            if terrace > 0.0 {
                floor = (floor / terrace).floor() * terrace;
                ceiling = (ceiling / terrace).ceil() * terrace;
            }
            pairs.push((floor, ceiling));
        }
    }

    let floor = ElevationGrid::build(x_axis, y_axis, |i, j, _, _| {
        pairs[i * y_axis.points() + j].0
    });
    let ceiling = ElevationGrid::build(x_axis, y_axis, |i, j, _, _| {
        pairs[i * y_axis.points() + j].1
    });
    let left_wall = ElevationGrid::build(y_axis, z_axis, |_, _, y, z| {
        bounds.min.x + left_noise.magnitude(y, z, rng)
    });
    let right_wall = ElevationGrid::build(y_axis, z_axis, |_, _, y, z| {
        bounds.max.x - right_noise.magnitude(y, z, rng)
    });

    tracing::debug!(
        cave_height = shape.cave_height,
        slope_height = shape.slope_height,
        step_z,
        "tunnel grids generated"
    );

    Ok(TunnelGrids {
        floor,
        ceiling,
        left_wall,
        right_wall,
        shape,
        step_z,
    })
}
