//! Explicit randomness for a generation call.
//!
//! Generators never reach for a global random source. The caller passes an
//! RNG; production code seeds it once from system entropy at the call
//! boundary, tests seed it with a constant.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Upper bound (exclusive) of the per-call noise offsets.
pub const SEED_RANGE: f64 = 10_000.0;

/// Deterministic RNG for `seed`.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// A fresh seed from system entropy, for callers that did not supply one.
pub fn entropy_seed() -> u64 {
    rand::random()
}

/// Coordinate offsets drawn once per generation call and reused for every
/// grid point, so one call samples one coherent patch of the noise plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseSeeds {
    pub x: f64,
    pub y: f64,
}

impl NoiseSeeds {
    /// Draw both offsets in `[0, SEED_RANGE)`. Must run before any per-point
    /// sampling so the draw order never depends on grid traversal.
    pub fn draw(rng: &mut impl Rng) -> Self {
        let x = rng.random::<f64>() * SEED_RANGE;
        let y = rng.random::<f64>() * SEED_RANGE;
        Self { x, y }
    }

    /// The same seeds shifted by a fixed amount, used to decorrelate surfaces
    /// that share one call.
    pub fn shifted(self, by: f64) -> Self {
        Self {
            x: self.x + by,
            y: self.y + by,
        }
    }
}
