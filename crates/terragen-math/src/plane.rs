//! Oriented planes and the convex-solid vertex solver.
//!
//! A brush face is written as three points whose order fixes the direction of
//! the face normal. The normal returned by [`Plane::from_points`] points out of
//! the solid, so a point is inside the brush when its signed distance to every
//! face plane is `<= 0`.

use glam::DVec3;

/// Below this magnitude the scalar triple product of three normals is treated
/// as zero and the planes have no unique intersection.
pub const PARALLEL_EPSILON: f64 = 1e-4;

/// Tolerance applied by [`is_inside_all`] when culling candidate vertices.
pub const INSIDE_EPSILON: f64 = 0.01;

/// Cross products shorter than this mark three collinear points.
const COLLINEAR_EPSILON: f64 = 1e-9;

/// A plane `dot(normal, p) == offset` with a unit normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub normal: DVec3,
    pub offset: f64,
}

impl Plane {
    /// Build the plane through three ordered points.
    ///
    /// `normal = normalize((p1 - p2) x (p3 - p2))`. Swapping any two points
    /// flips the normal, so callers must keep the point order of the face
    /// line they parsed. Returns `None` for collinear (or coincident) points.
    pub fn from_points(p1: DVec3, p2: DVec3, p3: DVec3) -> Option<Self> {
        let normal = (p1 - p2).cross(p3 - p2);
        let length = normal.length();
        if !length.is_finite() || length < COLLINEAR_EPSILON {
            return None;
        }
        let normal = normal / length;
        Some(Self {
            normal,
            offset: normal.dot(p1),
        })
    }

    /// Signed distance from the plane. Negative values lie on the inner side.
    #[inline]
    pub fn distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.offset
    }
}

/// Intersection point of three planes, or `None` when two or more of them are
/// parallel and the system has no unique solution.
pub fn intersect_three(p1: &Plane, p2: &Plane, p3: &Plane) -> Option<DVec3> {
    let n23 = p2.normal.cross(p3.normal);
    let det = p1.normal.dot(n23);
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }
    let n31 = p3.normal.cross(p1.normal);
    let n12 = p1.normal.cross(p2.normal);
    Some((n23 * p1.offset + n31 * p2.offset + n12 * p3.offset) / det)
}

/// True when `point` lies inside or on every plane, within `epsilon`.
pub fn is_inside_all(point: DVec3, planes: &[Plane], epsilon: f64) -> bool {
    planes.iter().all(|plane| plane.distance(point) <= epsilon)
}

/// Corner points of the convex solid bounded by `planes`.
///
/// Every combination of three planes is intersected; candidates lying outside
/// any plane (beyond [`INSIDE_EPSILON`]) are discarded. Parallel triples are
/// skipped. A corner shared by more than three planes is reported once per
/// triple that meets there.
pub fn brush_vertices(planes: &[Plane]) -> Vec<DVec3> {
    let mut vertices = Vec::new();
    for i in 0..planes.len() {
        for j in (i + 1)..planes.len() {
            for k in (j + 1)..planes.len() {
                let Some(point) = intersect_three(&planes[i], &planes[j], &planes[k]) else {
                    continue;
                };
                if is_inside_all(point, planes, INSIDE_EPSILON) {
                    vertices.push(point);
                }
            }
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The six outward-facing planes of the box `min..max`, written with the
    /// same point order a map editor uses.
    fn box_planes(min: DVec3, max: DVec3) -> Vec<Plane> {
        let faces = [
            // top (+z)
            (
                DVec3::new(min.x, min.y, max.z),
                DVec3::new(min.x, max.y, max.z),
                DVec3::new(max.x, min.y, max.z),
            ),
            // bottom (-z)
            (
                DVec3::new(min.x, min.y, min.z),
                DVec3::new(max.x, min.y, min.z),
                DVec3::new(min.x, max.y, min.z),
            ),
            // +x
            (
                DVec3::new(max.x, min.y, min.z),
                DVec3::new(max.x, min.y, max.z),
                DVec3::new(max.x, max.y, min.z),
            ),
            // -x
            (
                DVec3::new(min.x, min.y, min.z),
                DVec3::new(min.x, max.y, min.z),
                DVec3::new(min.x, min.y, max.z),
            ),
            // +y
            (
                DVec3::new(min.x, max.y, min.z),
                DVec3::new(max.x, max.y, min.z),
                DVec3::new(min.x, max.y, max.z),
            ),
            // -y
            (
                DVec3::new(min.x, min.y, min.z),
                DVec3::new(min.x, min.y, max.z),
                DVec3::new(max.x, min.y, min.z),
            ),
        ];
        faces
            .iter()
            .map(|&(a, b, c)| Plane::from_points(a, b, c).unwrap())
            .collect()
    }

    #[test]
    fn test_from_points_normal_and_offset() {
        let plane = Plane::from_points(
            DVec3::new(0.0, 0.0, 64.0),
            DVec3::new(0.0, 64.0, 64.0),
            DVec3::new(64.0, 0.0, 64.0),
        )
        .unwrap();
        assert!((plane.normal - DVec3::Z).length() < 1e-12, "{:?}", plane.normal);
        assert!((plane.offset - 64.0).abs() < 1e-12);
        assert!(plane.distance(DVec3::new(10.0, 10.0, 0.0)) < 0.0);
        assert!(plane.distance(DVec3::new(10.0, 10.0, 100.0)) > 0.0);
    }

    #[test]
    fn test_point_order_flips_normal() {
        let a = DVec3::new(0.0, 0.0, 0.0);
        let b = DVec3::new(1.0, 0.0, 0.0);
        let c = DVec3::new(0.0, 1.0, 0.0);
        let forward = Plane::from_points(a, b, c).unwrap();
        let reversed = Plane::from_points(c, b, a).unwrap();
        assert!((forward.normal + reversed.normal).length() < 1e-12);
    }

    #[test]
    fn test_collinear_points_rejected() {
        let plane = Plane::from_points(
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 1.0),
            DVec3::new(2.0, 2.0, 2.0),
        );
        assert!(plane.is_none());
        let coincident = Plane::from_points(DVec3::ONE, DVec3::ONE, DVec3::ZERO);
        assert!(coincident.is_none());
    }

    #[test]
    fn test_intersect_three_lies_on_all_planes() {
        let planes = [
            Plane::from_points(
                DVec3::new(0.0, 0.0, 10.0),
                DVec3::new(1.0, 0.0, 12.0),
                DVec3::new(0.0, 1.0, 9.0),
            )
            .unwrap(),
            Plane::from_points(
                DVec3::new(3.0, -2.0, 0.0),
                DVec3::new(3.5, 5.0, 1.0),
                DVec3::new(4.0, 0.0, 7.0),
            )
            .unwrap(),
            Plane::from_points(
                DVec3::new(-1.0, 4.0, 0.0),
                DVec3::new(2.0, 4.5, 0.0),
                DVec3::new(-1.0, 4.0, 5.0),
            )
            .unwrap(),
        ];
        let p = intersect_three(&planes[0], &planes[1], &planes[2]).unwrap();
        for plane in &planes {
            assert!(
                plane.distance(p).abs() < 1e-6,
                "intersection {p:?} is {} away from {plane:?}",
                plane.distance(p)
            );
        }
    }

    #[test]
    fn test_parallel_planes_have_no_intersection() {
        let planes = box_planes(DVec3::ZERO, DVec3::splat(64.0));
        // top and bottom are parallel
        assert!(intersect_three(&planes[0], &planes[1], &planes[2]).is_none());
    }

    #[test]
    fn test_box_corners_inside_all() {
        let min = DVec3::new(-32.0, 0.0, 16.0);
        let max = DVec3::new(96.0, 256.0, 48.0);
        let planes = box_planes(min, max);
        for i in 0..8 {
            let corner = DVec3::new(
                if i & 1 == 0 { min.x } else { max.x },
                if i & 2 == 0 { min.y } else { max.y },
                if i & 4 == 0 { min.z } else { max.z },
            );
            assert!(
                is_inside_all(corner, &planes, INSIDE_EPSILON),
                "corner {corner:?} rejected"
            );
        }
        assert!(!is_inside_all(
            DVec3::new(max.x + 1.0, min.y, min.z),
            &planes,
            INSIDE_EPSILON
        ));
    }

    #[test]
    fn test_brush_vertices_recover_box() {
        let min = DVec3::new(0.0, 0.0, 0.0);
        let max = DVec3::new(256.0, 128.0, 64.0);
        let vertices = brush_vertices(&box_planes(min, max));
        assert_eq!(vertices.len(), 8, "a box has exactly 8 simple corners");
        let lo = vertices.iter().fold(DVec3::INFINITY, |acc, v| acc.min(*v));
        let hi = vertices.iter().fold(DVec3::NEG_INFINITY, |acc, v| acc.max(*v));
        assert!((lo - min).length() < 1e-9, "{lo:?}");
        assert!((hi - max).length() < 1e-9, "{hi:?}");
    }

    #[test]
    fn test_brush_vertices_culls_outside_candidates() {
        // A wedge: the box with its +x face replaced by a slanted plane
        // through (64,0,0)-(0,0,64). Intersections of the old +x position
        // would fall outside and must be culled.
        let mut planes = box_planes(DVec3::ZERO, DVec3::splat(64.0));
        planes[2] = Plane::from_points(
            DVec3::new(64.0, 0.0, 0.0),
            DVec3::new(0.0, 0.0, 64.0),
            DVec3::new(64.0, 64.0, 0.0),
        )
        .unwrap();
        let vertices = brush_vertices(&planes);
        assert!(!vertices.is_empty());
        for v in &vertices {
            assert!(v.x + v.z <= 64.0 + 1e-6, "vertex {v:?} outside wedge");
        }
    }
}
