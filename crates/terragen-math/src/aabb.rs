use glam::DVec3;

/// Axis-aligned bounds of a brush in map units.
///
/// Invariant: `min.x <= max.x`, `min.y <= max.y`, `min.z <= max.z`. Width,
/// length and height are always derived from the corners, never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrushBounds {
    pub min: DVec3,
    pub max: DVec3,
}

impl BrushBounds {
    /// Create bounds from two corners. Components are sorted so that
    /// min <= max on every axis.
    pub fn new(a: DVec3, b: DVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Bounds enclosing every point, or `None` for an empty slice.
    pub fn from_points(points: &[DVec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
        Some(Self { min, max })
    }

    /// Bounds of `width x length` centred on the origin in X/Y, resting on
    /// `z = 0` and reaching up to `height`.
    pub fn centered(width: f64, length: f64, height: f64) -> Self {
        Self::new(
            DVec3::new(-width / 2.0, -length / 2.0, 0.0),
            DVec3::new(width / 2.0, length / 2.0, height),
        )
    }

    /// Round every corner component to the nearest integer, halves to the
    /// even neighbour. Negative zero comes out as `0`.
    pub fn rounded(&self) -> Self {
        Self::new(round_even(self.min), round_even(self.max))
    }

    /// Extent along X.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along Y.
    pub fn length(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Extent along Z.
    pub fn height(&self) -> f64 {
        self.max.z - self.min.z
    }

    /// Centre of the bounds.
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

}

fn round_even(v: DVec3) -> DVec3 {
    DVec3::new(v.x.round_ties_even(), v.y.round_ties_even(), v.z.round_ties_even()) + DVec3::ZERO
}
