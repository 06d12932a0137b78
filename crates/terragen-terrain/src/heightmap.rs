//! Ground elevation: a shape profile plus noise over the brush top.

use std::fmt;
use std::str::FromStr;

use noise::NoiseFn;
use rand::Rng;
use serde::{Deserialize, Serialize};
use terragen_math::BrushBounds;

use crate::error::GridError;
use crate::gradient::{ClassicPerlin, TableSimplex};
use crate::grid::{ElevationGrid, GridAxis};
use crate::seed::NoiseSeeds;
use crate::shape::Shape;

/// Source of the per-point height perturbation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoiseKind {
    /// Classic gradient noise.
    #[default]
    Perlin,
    /// Simplex gradient noise.
    Simplex,
    /// Independent uniform draws per point.
    Random,
}

impl NoiseKind {
    pub fn name(self) -> &'static str {
        match self {
            NoiseKind::Perlin => "perlin",
            NoiseKind::Simplex => "simplex",
            NoiseKind::Random => "random",
        }
    }
}

impl fmt::Display for NoiseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NoiseKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "perlin" => Ok(NoiseKind::Perlin),
            "simplex" => Ok(NoiseKind::Simplex),
            "random" => Ok(NoiseKind::Random),
            other => Err(format!(
                "unknown noise '{other}' (expected one of: perlin, simplex, random)"
            )),
        }
    }
}

/// Parameters for one terrain generation call.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainParams {
    /// Cell size along X.
    pub step_x: f64,
    /// Cell size along Y.
    pub step_y: f64,
    pub shape: Shape,
    /// Profile amplitude. For a slope tunnel this is the rise along Y.
    pub shape_height: f64,
    /// Opening height of a slope tunnel. Plain tunnels use `shape_height`.
    pub tunnel_height: f64,
    /// Terrace height; `0` disables terracing.
    pub terrace_step: f64,
    pub noise: NoiseKind,
    /// Noise amplitude; `0` disables noise.
    pub variance: f64,
    /// Scale applied to coordinates before sampling gradient noise.
    pub frequency: f64,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            step_x: 64.0,
            step_y: 64.0,
            shape: Shape::Flat,
            shape_height: 256.0,
            tunnel_height: 256.0,
            terrace_step: 0.0,
            noise: NoiseKind::Perlin,
            variance: 32.0,
            frequency: 0.005,
        }
    }
}

impl TerrainParams {
    /// Whether cells need a diagonal split: any noise or a non-flat shape
    /// gives the four corners of a cell independent heights.
    pub fn splits_diagonally(&self) -> bool {
        self.variance > 0.0 || self.shape != Shape::Flat
    }
}

/// Noise sampler bound to one call's seeds.
#[derive(Clone, Copy, Debug)]
pub struct NoiseField {
    kind: NoiseKind,
    variance: f64,
    frequency: f64,
    seeds: NoiseSeeds,
}

impl NoiseField {
    pub fn new(kind: NoiseKind, variance: f64, frequency: f64, seeds: NoiseSeeds) -> Self {
        Self {
            kind,
            variance,
            frequency,
            seeds,
        }
    }

    /// Same sampler reading a different patch of the noise plane.
    pub fn with_seeds(self, seeds: NoiseSeeds) -> Self {
        Self { seeds, ..self }
    }

    /// Signed offset in about `[-variance, variance]`. Zero when variance is
    /// not positive.
    pub fn sample(&self, x: f64, y: f64, rng: &mut impl Rng) -> f64 {
        if self.variance <= 0.0 {
            return 0.0;
        }
        match self.kind {
            NoiseKind::Random => rng.random_range(-self.variance..=self.variance),
            _ => self.gradient(x, y) * self.variance,
        }
    }

    /// Non-negative offset in about `[0, variance]`, for surfaces that may only
    /// be pushed one way.
    pub fn magnitude(&self, x: f64, y: f64, rng: &mut impl Rng) -> f64 {
        if self.variance <= 0.0 {
            return 0.0;
        }
        match self.kind {
            NoiseKind::Random => rng.random_range(0.0..=self.variance),
            _ => self.gradient(x, y).abs() * self.variance,
        }
    }

    fn gradient(&self, x: f64, y: f64) -> f64 {
        let point = [
            (x + self.seeds.x) * self.frequency,
            (y + self.seeds.y) * self.frequency,
        ];
        match self.kind {
            NoiseKind::Simplex => TableSimplex.get(point),
            _ => ClassicPerlin.get(point),
        }
    }
}

/// Snap `z` down to a multiple of `step`. A non-positive step is a no-op.
pub fn terrace_down(z: f64, step: f64) -> f64 {
    if step > 0.0 {
        (z / step).floor() * step
    } else {
        z
    }
}

/// Sample the ground surface over the top of `bounds`.
///
/// Every lattice point gets `bounds.max.z + profile + noise`; non-flat shapes
/// are then terraced when `terrace_step > 0`. The two noise seeds are drawn
/// from `rng` before any point is sampled.
pub fn generate_elevation(
    bounds: &BrushBounds,
    params: &TerrainParams,
    rng: &mut impl Rng,
) -> Result<ElevationGrid, GridError> {
    let u = GridAxis::new('x', bounds.min.x, bounds.max.x, params.step_x)?;
    let v = GridAxis::new('y', bounds.min.y, bounds.max.y, params.step_y)?;

    let seeds = NoiseSeeds::draw(rng);
    let field = NoiseField::new(params.noise, params.variance, params.frequency, seeds);
    let terrace = params.shape != Shape::Flat && params.terrace_step > 0.0;

    let grid = ElevationGrid::build(u, v, |i, j, x, y| {
        let profile = params
            .shape
            .profile(u.normalized(i), v.normalized(j), params.shape_height);
        let z = bounds.max.z + profile + field.sample(x, y, rng);
        if terrace {
            terrace_down(z, params.terrace_step)
        } else {
            z
        }
    });

    tracing::debug!(
        points = grid.values().len(),
        shape = %params.shape,
        noise = %params.noise,
        "elevation grid generated"
    );
    Ok(grid)
}
