//! Closed-form elevation profiles over the normalised grid square.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Base shape of the generated terrain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    #[default]
    Flat,
    Hill,
    Crater,
    Ridge,
    Slope,
    Volcano,
    Valley,
    Tunnel,
    SlopeTunnel,
}

impl Shape {
    pub const ALL: [Shape; 9] = [
        Shape::Flat,
        Shape::Hill,
        Shape::Crater,
        Shape::Ridge,
        Shape::Slope,
        Shape::Volcano,
        Shape::Valley,
        Shape::Tunnel,
        Shape::SlopeTunnel,
    ];

    /// Name used on the command line and in config files.
    pub fn name(self) -> &'static str {
        match self {
            Shape::Flat => "flat",
            Shape::Hill => "hill",
            Shape::Crater => "crater",
            Shape::Ridge => "ridge",
            Shape::Slope => "slope",
            Shape::Volcano => "volcano",
            Shape::Valley => "valley",
            Shape::Tunnel => "tunnel",
            Shape::SlopeTunnel => "slope-tunnel",
        }
    }

    /// Elevation offset above the base top at normalised position `(nx, ny)`,
    /// both in `[0, 1]`. `height` scales the whole profile.
    ///
    /// Tunnel shapes have no single surface and return `0.0`; see
    /// [`crate::generate_tunnel`].
    pub fn profile(self, nx: f64, ny: f64, height: f64) -> f64 {
        let radial = || center_distance(nx, ny);
        match self {
            Shape::Flat | Shape::Tunnel | Shape::SlopeTunnel => 0.0,
            Shape::Hill => raised_cosine(radial(), height),
            Shape::Crater => sunken_cosine(radial(), height),
            Shape::Ridge => raised_cosine(edge_distance(nx), height),
            Shape::Slope => height * nx,
            Shape::Volcano => {
                let d = radial();
                let mountain = raised_cosine(d, height);
                let vent = raised_cosine((d / 0.35).min(1.0), height * 0.7);
                mountain - vent
            }
            Shape::Valley => sunken_cosine(edge_distance(nx), height),
        }
    }
}

/// `h * 0.5 * (1 + cos(d * pi))`: `h` at `d = 0`, zero at `d = 1`.
#[inline]
fn raised_cosine(d: f64, h: f64) -> f64 {
    h * 0.5 * (1.0 + (d * PI).cos())
}

/// `h * 0.5 * (1 - cos(d * pi))`: zero at `d = 0`, `h` at `d = 1`.
#[inline]
fn sunken_cosine(d: f64, h: f64) -> f64 {
    h * 0.5 * (1.0 - (d * PI).cos())
}

/// Distance from the square's centre, scaled so the inscribed circle is `1`
/// and clamped there.
pub fn center_distance(nx: f64, ny: f64) -> f64 {
    let dx = nx - 0.5;
    let dy = ny - 0.5;
    ((dx * dx + dy * dy).sqrt() / 0.5).min(1.0)
}

/// Distance from the centre line `nx = 0.5`, scaled to `[0, 1]`.
pub fn edge_distance(nx: f64) -> f64 {
    ((nx - 0.5).abs() / 0.5).min(1.0)
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown shape name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown shape '{0}' (expected one of: flat, hill, crater, ridge, slope, volcano, valley, tunnel, slope-tunnel)")]
pub struct ShapeParseError(pub String);

impl FromStr for Shape {
    type Err = ShapeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Shape::ALL
            .into_iter()
            .find(|shape| shape.name() == wanted)
            .ok_or_else(|| ShapeParseError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_flat_is_zero_everywhere() {
        for &(nx, ny) in &[(0.0, 0.0), (0.5, 0.5), (1.0, 0.3)] {
            assert_eq!(Shape::Flat.profile(nx, ny, 512.0), 0.0);
        }
    }

    #[test]
    fn test_hill_peak_and_rim() {
        assert!((Shape::Hill.profile(0.5, 0.5, 256.0) - 256.0).abs() < EPSILON);
        assert!(Shape::Hill.profile(0.0, 0.5, 256.0).abs() < EPSILON);
        // corners are beyond the inscribed circle and clamp to the rim
        assert!(Shape::Hill.profile(1.0, 1.0, 256.0).abs() < EPSILON);
    }

    #[test]
    fn test_crater_is_inverted_hill() {
        for &(nx, ny) in &[(0.5, 0.5), (0.2, 0.7), (0.9, 0.1)] {
            let sum = Shape::Hill.profile(nx, ny, 100.0) + Shape::Crater.profile(nx, ny, 100.0);
            assert!((sum - 100.0).abs() < EPSILON, "hill + crater = {sum} at ({nx}, {ny})");
        }
    }

    #[test]
    fn test_ridge_and_valley_ignore_y() {
        for ny in [0.0, 0.25, 1.0] {
            assert!((Shape::Ridge.profile(0.5, ny, 64.0) - 64.0).abs() < EPSILON);
            assert!(Shape::Valley.profile(0.5, ny, 64.0).abs() < EPSILON);
            assert!((Shape::Valley.profile(0.0, ny, 64.0) - 64.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_slope_is_linear_in_x() {
        assert_eq!(Shape::Slope.profile(0.0, 0.9, 300.0), 0.0);
        assert_eq!(Shape::Slope.profile(0.5, 0.1, 300.0), 150.0);
        assert_eq!(Shape::Slope.profile(1.0, 0.0, 300.0), 300.0);
    }

    #[test]
    fn test_volcano_has_vent() {
        let h = 400.0;
        let centre = Shape::Volcano.profile(0.5, 0.5, h);
        assert!((centre - 0.3 * h).abs() < EPSILON, "vent floor was {centre}");
        // on the vent rim the vent term is gone and only the mountain remains
        let rim_d: f64 = 0.35;
        let rim = Shape::Volcano.profile(0.5 + rim_d * 0.5, 0.5, h);
        let expected = h * 0.5 * (1.0 + (rim_d * PI).cos());
        assert!((rim - expected).abs() < EPSILON);
        assert!(rim > centre);
    }

    #[test]
    fn test_tunnel_shapes_have_no_profile() {
        assert_eq!(Shape::Tunnel.profile(0.5, 0.5, 100.0), 0.0);
    }

    #[test]
    fn test_parse_round_trips_names() {
        for shape in Shape::ALL {
            assert_eq!(shape.to_string().parse::<Shape>(), Ok(shape));
        }
        assert_eq!("Slope_Tunnel".parse::<Shape>(), Ok(Shape::SlopeTunnel));
        assert!("mesa".parse::<Shape>().is_err());
    }
}
