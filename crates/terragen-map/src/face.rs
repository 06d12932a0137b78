//! Single brush face lines.
//!
//! A face is written as three points, a texture matrix, a texture name and
//! three trailing flags:
//!
//! ```text
//! ( x y z ) ( x y z ) ( x y z ) ( ( 0.03125 0 0 ) ( 0 0.03125 0 ) ) texture 0 0 0
//! ```
//!
//! Coordinates use the shortest decimal form that reads back to the same
//! `f64`, so `256.0` is written as `256`.

use std::fmt;

use glam::DVec3;

/// Texture matrix written on every generated face.
pub const TEXTURE_MATRIX: &str = "( ( 0.03125 0 0 ) ( 0 0.03125 0 ) )";

/// A generated face. Point order follows the editor's winding: the face
/// normal `(p1 - p2) x (p3 - p2)` points out of the brush.
#[derive(Clone, Debug, PartialEq)]
pub struct Face<'a> {
    pub points: [DVec3; 3],
    pub texture: &'a str,
}

impl<'a> Face<'a> {
    pub fn new(points: [DVec3; 3], texture: &'a str) -> Self {
        Self { points, texture }
    }

    /// The same plane seen from the other side.
    pub fn flipped(mut self) -> Self {
        self.points.reverse();
        self
    }
}

impl fmt::Display for Face<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.points {
            write!(f, "( {} {} {} ) ", p.x, p.y, p.z)?;
        }
        write!(f, "{TEXTURE_MATRIX} {} 0 0 0", self.texture)
    }
}

/// First three `( x y z )` groups of a face line.
///
/// Parentheses need not be separated from numbers by whitespace. Returns
/// `None` when fewer than three groups parse.
pub fn parse_face_points(line: &str) -> Option<[DVec3; 3]> {
    let spaced = line.replace('(', " ( ").replace(')', " ) ");
    let tokens: Vec<&str> = spaced.split_whitespace().collect();

    let mut points = [DVec3::ZERO; 3];
    let mut found = 0;
    let mut i = 0;
    while found < 3 && i + 4 < tokens.len() {
        if let Some(point) = point_group(&tokens[i..i + 5]) {
            points[found] = point;
            found += 1;
            i += 5;
        } else {
            i += 1;
        }
    }
    (found == 3).then_some(points)
}

fn point_group(tokens: &[&str]) -> Option<DVec3> {
    let [open, x, y, z, close] = tokens else {
        return None;
    };
    if *open != "(" || *close != ")" {
        return None;
    }
    Some(DVec3::new(x.parse().ok()?, y.parse().ok()?, z.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let face = Face::new(
            [
                DVec3::new(0.0, 0.0, 256.0),
                DVec3::new(0.0, 64.0, 256.0),
                DVec3::new(64.5, -0.25, 256.0),
            ],
            "nature/grass",
        );
        assert_eq!(
            face.to_string(),
            "( 0 0 256 ) ( 0 64 256 ) ( 64.5 -0.25 256 ) ( ( 0.03125 0 0 ) ( 0 0.03125 0 ) ) nature/grass 0 0 0"
        );
    }

    #[test]
    fn test_flipped_reverses_points() {
        let a = DVec3::X;
        let b = DVec3::Y;
        let c = DVec3::Z;
        let face = Face::new([a, b, c], "x").flipped();
        assert_eq!(face.points, [c, b, a]);
    }

    #[test]
    fn test_parse_points() {
        let line = "( 1 2 3 ) ( -4 5.5 6 ) ( 7 8 -9 ) ( ( 0.03125 0 0 ) ( 0 0.03125 0 ) ) common/hint 0 0 0";
        assert_eq!(
            parse_face_points(line),
            Some([
                DVec3::new(1.0, 2.0, 3.0),
                DVec3::new(-4.0, 5.5, 6.0),
                DVec3::new(7.0, 8.0, -9.0),
            ])
        );
    }

    #[test]
    fn test_parse_tight_parentheses() {
        let line = "(1 2 3)(4 5 6)(7 8 9) common/hint";
        let points = parse_face_points(line).unwrap();
        assert_eq!(points[2], DVec3::new(7.0, 8.0, 9.0));
    }

    #[test]
    fn test_parse_round_trips_display() {
        let points = [
            DVec3::new(-1024.0, 0.1, 1.0 / 3.0),
            DVec3::new(5.0e-7, 12345.678, -0.0),
            DVec3::new(3.0, 2.0, 1.0),
        ];
        let line = Face::new(points, "t").to_string();
        assert_eq!(parse_face_points(&line), Some(points));
    }

    #[test]
    fn test_parse_too_few_points() {
        assert_eq!(parse_face_points("( 1 2 3 ) ( 4 5 6 ) common/hint"), None);
        assert_eq!(parse_face_points("( 1 2 ) ( 4 5 6 ) ( 7 8 9 )"), None);
        assert_eq!(parse_face_points("( a b c ) ( 4 5 6 ) ( 7 8 9 )"), None);
        assert_eq!(parse_face_points(""), None);
    }
}
