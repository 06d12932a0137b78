//! Elevation grids to brush text.
//!
//! Every grid cell becomes one box brush (flat terrain) or two triangular
//! prisms split along the cell diagonal. A prism is extruded from the sampled
//! surface back to a flat base plane; only the surface face carries the
//! visible texture, every other face is caulked.
//!
//! Cells are written in a local `(u, v, w)` frame where `u, v` are the grid
//! axes and `w` is the sampled value. Ground slabs map it straight onto
//! `(x, y, z)`; wall slabs map it onto `(y, z, x)`, which is a rotation and
//! keeps face winding intact. Mirrored slabs extrude toward `-w` and write
//! every face with its points reversed so normals still point outward.

use glam::DVec3;
use terragen_math::BrushBounds;
use terragen_terrain::{ElevationGrid, TunnelGrids};
use tracing::debug;

use crate::face::Face;

/// Texture for faces nobody will see.
pub const CAULK_TEXTURE: &str = "common/caulk";

const GROUP_HEADER: &str = "// entity\n{\n\"classname\" \"func_group\"\n";

/// Serialized brush text with the number of brushes it holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedGeometry {
    /// One or more func_group entity blocks, `\n` separated, without a
    /// trailing newline.
    pub text: String,
    pub brush_count: usize,
}

/// Accumulates one func_group entity.
struct GroupWriter {
    text: String,
    brushes: usize,
}

impl GroupWriter {
    fn new() -> Self {
        Self {
            text: GROUP_HEADER.to_owned(),
            brushes: 0,
        }
    }

    fn brush(&mut self, faces: &[Face<'_>]) {
        self.text.push_str(&format!("// brush {}\n{{\nbrushDef\n{{\n", self.brushes));
        for face in faces {
            self.text.push_str(&face.to_string());
            self.text.push('\n');
        }
        self.text.push_str("}\n}\n");
        self.brushes += 1;
    }

    fn finish(mut self) -> GeneratedGeometry {
        self.text.push('}');
        GeneratedGeometry {
            text: self.text,
            brush_count: self.brushes,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Frame {
    /// `(u, v, w) -> (x, y, z)`
    Ground,
    /// `(u, v, w) -> (w, u, v)`
    Wall,
}

/// How cells of one grid are extruded.
#[derive(Clone, Copy, Debug)]
struct Slab {
    frame: Frame,
    mirrored: bool,
    /// Flat plane the prisms are extruded to.
    base: f64,
    /// Any `w` on the surface side of `base`; the side faces are spanned
    /// between the two.
    reference: f64,
}

/// Corner values of one grid cell.
#[derive(Clone, Copy, Debug)]
struct Cell {
    u0: f64,
    u1: f64,
    v0: f64,
    v1: f64,
    bl: f64,
    tl: f64,
    br: f64,
    tr: f64,
}

impl Cell {
    fn at(grid: &ElevationGrid, i: usize, j: usize) -> Self {
        let (u, v) = (grid.u_axis(), grid.v_axis());
        Self {
            u0: u.coord(i),
            u1: u.coord(i + 1),
            v0: v.coord(j),
            v1: v.coord(j + 1),
            bl: grid.get(i, j),
            tl: grid.get(i, j + 1),
            br: grid.get(i + 1, j),
            tr: grid.get(i + 1, j + 1),
        }
    }
}

type Local = (f64, f64, f64);

impl Slab {
    fn point(&self, (u, v, w): Local) -> DVec3 {
        match self.frame {
            Frame::Ground => DVec3::new(u, v, w),
            Frame::Wall => DVec3::new(w, u, v),
        }
    }

    fn face<'t>(&self, points: [Local; 3], texture: &'t str) -> Face<'t> {
        let face = Face::new(points.map(|p| self.point(p)), texture);
        if self.mirrored { face.flipped() } else { face }
    }

    fn bottom(&self, c: &Cell) -> Face<'static> {
        let b = self.base;
        self.face([(c.u0, c.v0, b), (c.u1, c.v0, b), (c.u0, c.v1, b)], CAULK_TEXTURE)
    }

    fn side_u_max(&self, c: &Cell) -> Face<'static> {
        let (b, r) = (self.base, self.reference);
        self.face([(c.u1, c.v0, b), (c.u1, c.v0, r), (c.u1, c.v1, b)], CAULK_TEXTURE)
    }

    fn side_u_min(&self, c: &Cell) -> Face<'static> {
        let (b, r) = (self.base, self.reference);
        self.face([(c.u0, c.v0, b), (c.u0, c.v1, b), (c.u0, c.v0, r)], CAULK_TEXTURE)
    }

    fn side_v_max(&self, c: &Cell) -> Face<'static> {
        let (b, r) = (self.base, self.reference);
        self.face([(c.u0, c.v1, b), (c.u1, c.v1, b), (c.u0, c.v1, r)], CAULK_TEXTURE)
    }

    fn side_v_min(&self, c: &Cell) -> Face<'static> {
        let (b, r) = (self.base, self.reference);
        self.face([(c.u0, c.v0, b), (c.u0, c.v0, r), (c.u1, c.v0, b)], CAULK_TEXTURE)
    }

    /// Box whose surface is the flat plane `w = reference`.
    fn quad<'t>(&self, c: &Cell, texture: &'t str) -> [Face<'t>; 6] {
        let s = self.reference;
        [
            self.face([(c.u0, c.v0, s), (c.u0, c.v1, s), (c.u1, c.v0, s)], texture),
            self.bottom(c),
            self.side_u_max(c),
            self.side_u_min(c),
            self.side_v_max(c),
            self.side_v_min(c),
        ]
    }

    /// Two prisms meeting on the `(u1, v0)`-`(u0, v1)` diagonal.
    fn split<'t>(&self, c: &Cell, texture: &'t str) -> [[Face<'t>; 5]; 2] {
        let (b, r) = (self.base, self.reference);
        let lower = [
            self.face([(c.u0, c.v0, c.bl), (c.u0, c.v1, c.tl), (c.u1, c.v0, c.br)], texture),
            self.bottom(c),
            self.side_u_min(c),
            self.side_v_min(c),
            self.face([(c.u1, c.v0, b), (c.u1, c.v0, r), (c.u0, c.v1, b)], CAULK_TEXTURE),
        ];
        let upper = [
            self.face([(c.u1, c.v1, c.tr), (c.u1, c.v0, c.br), (c.u0, c.v1, c.tl)], texture),
            self.bottom(c),
            self.side_u_max(c),
            self.side_v_max(c),
            self.face([(c.u0, c.v1, b), (c.u1, c.v0, r), (c.u1, c.v0, b)], CAULK_TEXTURE),
        ];
        [lower, upper]
    }

    /// Write every cell of `grid`, `u` outermost.
    fn write_grid(&self, group: &mut GroupWriter, grid: &ElevationGrid, split: bool, texture: &str) {
        for i in 0..grid.u_axis().cells() {
            for j in 0..grid.v_axis().cells() {
                let cell = Cell::at(grid, i, j);
                if split {
                    for prism in self.split(&cell, texture) {
                        group.brush(&prism);
                    }
                } else {
                    group.brush(&self.quad(&cell, texture));
                }
            }
        }
    }
}

/// Serialize a ground grid as one func_group.
///
/// Brushes extend from `bounds.min.z` up to the surface. Without `split`
/// every cell is a box topped at `bounds.max.z` and the grid heights are not
/// read.
pub fn serialize_terrain(
    bounds: &BrushBounds,
    grid: &ElevationGrid,
    split: bool,
    texture: &str,
) -> GeneratedGeometry {
    let slab = Slab {
        frame: Frame::Ground,
        mirrored: false,
        base: bounds.min.z,
        reference: bounds.max.z,
    };
    let mut group = GroupWriter::new();
    slab.write_grid(&mut group, grid, split, texture);
    let geometry = group.finish();
    debug!(brushes = geometry.brush_count, split, "terrain serialized");
    geometry
}

/// Serialize a tunnel as four func_groups: floor, ceiling, left wall, right
/// wall.
///
/// The floor rests on `bounds.min.z`, or one `step_x` below its lowest
/// sampled height when terracing has pushed the floor down past that. The
/// ceiling is backed by a roof plane `max(bounds height, step_x) +
/// terrace_step` above the top of the walls, which keeps it clear of any
/// terraced ceiling height. Each wall is one `step_x` thick behind its outer
/// side of the bounds.
pub fn serialize_tunnel(
    bounds: &BrushBounds,
    grids: &TunnelGrids,
    step_x: f64,
    terrace_step: f64,
    texture: &str,
) -> GeneratedGeometry {
    let wall_top = grids.wall_top();
    let roof = wall_top + bounds.height().max(step_x) + terrace_step.max(0.0);
    let (floor_low, _) = grids.floor.range();
    let floor_base = bounds.min.z.min(floor_low - step_x);
    let surfaces = [
        (
            Slab {
                frame: Frame::Ground,
                mirrored: false,
                base: floor_base,
                reference: grids.wall_bottom(),
            },
            &grids.floor,
        ),
        (
            Slab {
                frame: Frame::Ground,
                mirrored: true,
                base: roof,
                reference: wall_top,
            },
            &grids.ceiling,
        ),
        (
            Slab {
                frame: Frame::Wall,
                mirrored: false,
                base: bounds.min.x - step_x,
                reference: bounds.min.x,
            },
            &grids.left_wall,
        ),
        (
            Slab {
                frame: Frame::Wall,
                mirrored: true,
                base: bounds.max.x + step_x,
                reference: bounds.max.x,
            },
            &grids.right_wall,
        ),
    ];

    let mut blocks = Vec::with_capacity(surfaces.len());
    let mut brush_count = 0;
    for (slab, grid) in surfaces {
        let mut group = GroupWriter::new();
        slab.write_grid(&mut group, grid, true, texture);
        let geometry = group.finish();
        brush_count += geometry.brush_count;
        blocks.push(geometry.text);
    }
    debug!(brushes = brush_count, floor_base, roof, "tunnel serialized");
    GeneratedGeometry {
        text: blocks.join("\n"),
        brush_count,
    }
}
