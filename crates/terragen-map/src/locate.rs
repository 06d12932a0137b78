//! Finding the hint brush that marks where terrain goes.

use terragen_math::{BrushBounds, Plane, brush_vertices};
use tracing::{debug, warn};

use crate::error::LocateError;
use crate::face::parse_face_points;
use crate::scan::{LineSpan, scan_groups};

/// Texture every face of the marker brush must use.
pub const HINT_TEXTURE: &str = "common/hint";

/// The marker brush: its integer-rounded bounds and the entity block lines
/// the generated geometry replaces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HintBrush {
    pub bounds: BrushBounds,
    pub span: LineSpan,
}

/// Bounds of a brush given its face lines, rounded to integers.
///
/// Every line must reference [`HINT_TEXTURE`]. Lines without three parsable
/// points, or whose points are collinear, contribute no plane. Returns `None`
/// when the planes enclose no vertex.
pub fn hint_bounds<S: AsRef<str>>(face_lines: &[S]) -> Option<BrushBounds> {
    let mut planes = Vec::with_capacity(face_lines.len());
    for line in face_lines {
        let line = line.as_ref();
        if !line.contains(HINT_TEXTURE) {
            return None;
        }
        if let Some([a, b, c]) = parse_face_points(line) {
            planes.extend(Plane::from_points(a, b, c));
        }
    }
    let vertices = brush_vertices(&planes);
    BrushBounds::from_points(&vertices).map(|b| b.rounded())
}

/// Locate the hint brush in the lines of a map.
///
/// The first func_group holding exactly one brushDef whose faces are all
/// hint-textured wins; later qualifying groups are reported and ignored.
pub fn find_hint_brush<S: AsRef<str>>(lines: &[S]) -> Result<HintBrush, LocateError> {
    let mut found = scan_groups(lines).into_iter().filter_map(|group| {
        let faces: Vec<&str> = group.faces.iter().map(|&i| lines[i].as_ref()).collect();
        let bounds = hint_bounds(&faces)?;
        Some(HintBrush {
            bounds,
            span: group.span,
        })
    });

    let brush = found.next().ok_or(LocateError::NoValidHintBrush)?;
    let extra = found.count();
    if extra > 0 {
        warn!(extra, "several hint brushes found, using the first");
    }
    debug!(
        start = brush.span.start,
        end = brush.span.end,
        min = ?brush.bounds.min,
        max = ?brush.bounds.max,
        "hint brush located"
    );
    Ok(brush)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    /// Editor output for an axis-aligned box with every face textured `tex`.
    fn box_entity(index: usize, min: DVec3, max: DVec3, tex: &str) -> String {
        let m = "( ( 0.03125 0 0 ) ( 0 0.03125 0 ) )";
        let (a, b) = (min, max);
        let faces = [
            format!("( {} {} {} ) ( {} {} {} ) ( {} {} {} ) {m} {tex} 0 0 0", a.x, a.y, b.z, a.x, b.y, b.z, b.x, a.y, b.z),
            format!("( {} {} {} ) ( {} {} {} ) ( {} {} {} ) {m} {tex} 0 0 0", a.x, a.y, a.z, b.x, a.y, a.z, a.x, b.y, a.z),
            format!("( {} {} {} ) ( {} {} {} ) ( {} {} {} ) {m} {tex} 0 0 0", b.x, a.y, a.z, b.x, a.y, b.z, b.x, b.y, a.z),
            format!("( {} {} {} ) ( {} {} {} ) ( {} {} {} ) {m} {tex} 0 0 0", a.x, a.y, a.z, a.x, b.y, a.z, a.x, a.y, b.z),
            format!("( {} {} {} ) ( {} {} {} ) ( {} {} {} ) {m} {tex} 0 0 0", a.x, b.y, a.z, b.x, b.y, a.z, a.x, b.y, b.z),
            format!("( {} {} {} ) ( {} {} {} ) ( {} {} {} ) {m} {tex} 0 0 0", a.x, a.y, a.z, a.x, a.y, b.z, b.x, a.y, a.z),
        ];
        format!(
            "// entity {index}\n{{\n\"classname\" \"func_group\"\n// brush 0\n{{\nbrushDef\n{{\n{}\n}}\n}}\n}}",
            faces.join("\n")
        )
    }

    fn map_text(entities: &[String]) -> String {
        let mut text = String::from("// entity 0\n{\n\"classname\" \"worldspawn\"\n}\n");
        text.push_str(&entities.join("\n"));
        text
    }

    #[test]
    fn test_finds_hint_box() {
        let min = DVec3::new(-128.0, -64.0, 0.0);
        let max = DVec3::new(128.0, 64.0, 96.0);
        let text = map_text(&[box_entity(1, min, max, HINT_TEXTURE)]);
        let lines: Vec<&str> = text.lines().collect();

        let brush = find_hint_brush(&lines).unwrap();
        assert_eq!(brush.bounds, BrushBounds::new(min, max));
        assert_eq!(brush.span, LineSpan { start: 4, end: lines.len() - 1 });
    }

    #[test]
    fn test_bounds_rounded() {
        let min = DVec3::new(0.4, -0.6, 10.5);
        let max = DVec3::new(100.2, 50.0, 64.0);
        let text = map_text(&[box_entity(1, min, max, HINT_TEXTURE)]);
        let lines: Vec<&str> = text.lines().collect();
        let brush = find_hint_brush(&lines).unwrap();
        // 10.5 is a tie and goes to the even neighbour
        assert_eq!(brush.bounds.min, DVec3::new(0.0, -1.0, 10.0));
        assert_eq!(brush.bounds.max, DVec3::new(100.0, 50.0, 64.0));
    }

    #[test]
    fn test_skips_non_hint_group() {
        let text = map_text(&[
            box_entity(1, DVec3::ZERO, DVec3::splat(64.0), "base/wall"),
            box_entity(2, DVec3::splat(100.0), DVec3::splat(200.0), HINT_TEXTURE),
        ]);
        let lines: Vec<&str> = text.lines().collect();
        let brush = find_hint_brush(&lines).unwrap();
        assert_eq!(brush.bounds.min, DVec3::splat(100.0));
        assert_eq!(lines[brush.span.start], "// entity 2");
        // the first group ends right before the second marker
        let first_end = lines.iter().position(|l| *l == "// entity 2").unwrap() - 1;
        assert_eq!(lines[first_end], "}");
    }

    #[test]
    fn test_first_of_several_wins() {
        let text = map_text(&[
            box_entity(1, DVec3::ZERO, DVec3::splat(64.0), HINT_TEXTURE),
            box_entity(2, DVec3::splat(100.0), DVec3::splat(200.0), HINT_TEXTURE),
        ]);
        let lines: Vec<&str> = text.lines().collect();
        let brush = find_hint_brush(&lines).unwrap();
        assert_eq!(brush.bounds.max, DVec3::splat(64.0));
        assert_eq!(lines[brush.span.end + 1], "// entity 2");
    }

    #[test]
    fn test_mixed_textures_rejected() {
        let text = map_text(&[box_entity(1, DVec3::ZERO, DVec3::splat(64.0), HINT_TEXTURE)]);
        let text = text.replacen("common/hint", "common/caulk", 1);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(find_hint_brush(&lines), Err(LocateError::NoValidHintBrush));
    }

    #[test]
    fn test_no_group() {
        let text = map_text(&[]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(find_hint_brush(&lines), Err(LocateError::NoValidHintBrush));
        assert_eq!(find_hint_brush::<&str>(&[]), Err(LocateError::NoValidHintBrush));
    }

    #[test]
    fn test_unparsable_plane_skipped() {
        let mut faces: Vec<String> = box_entity(1, DVec3::ZERO, DVec3::splat(32.0), HINT_TEXTURE)
            .lines()
            .filter(|l| l.starts_with('('))
            .map(str::to_owned)
            .collect();
        faces.push("( 1 1 1 ) common/hint".to_owned());
        let bounds = hint_bounds(&faces).unwrap();
        assert_eq!(bounds.max, DVec3::splat(32.0));
    }

    #[test]
    fn test_open_brush_has_no_bounds() {
        let faces = ["( 0 0 0 ) ( 0 1 0 ) ( 1 0 0 ) common/hint"];
        assert_eq!(hint_bounds(&faces), None);
    }
}
