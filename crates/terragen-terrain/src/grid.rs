//! Integer-indexed elevation storage.
//!
//! Grid points are addressed by `(i, j)` lattice indices derived from
//! `(coord - min) / step`, so a height written while walking the grid is read
//! back by the serializer without any floating-point key comparison.

use crate::error::GridError;

/// Cells narrower than this at the far edge are not emitted.
const EDGE_TOLERANCE: f64 = 0.01;

/// One axis of the lattice: `min, min + step, ...` capped at `max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridAxis {
    min: f64,
    max: f64,
    step: f64,
    cells: usize,
}

impl GridAxis {
    /// Lay out `[min, max]` in `step` increments.
    ///
    /// The last cell is shortened to end exactly on `max` when the extent is
    /// not an exact multiple of `step`.
    pub fn new(axis: char, min: f64, max: f64, step: f64) -> Result<Self, GridError> {
        if !(step.is_finite() && step > 0.0) {
            return Err(GridError::InvalidStep { axis, step });
        }
        let span = max - min - EDGE_TOLERANCE;
        let cells = if span > 0.0 {
            (span / step).ceil() as usize
        } else {
            0
        };
        Ok(Self {
            min,
            max,
            step,
            cells,
        })
    }

    /// Number of cells along this axis.
    pub fn cells(&self) -> usize {
        self.cells
    }

    /// Number of lattice points (`cells + 1`).
    pub fn points(&self) -> usize {
        self.cells + 1
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Coordinate of lattice point `i`. The final point is exactly `max`.
    pub fn coord(&self, i: usize) -> f64 {
        if i >= self.cells {
            return self.max;
        }
        (self.min + i as f64 * self.step).min(self.max)
    }

    /// Position of lattice point `i` normalised to `[0, 1]` over the extent.
    pub fn normalized(&self, i: usize) -> f64 {
        let extent = self.max - self.min;
        if extent > 0.0 {
            (self.coord(i) - self.min) / extent
        } else {
            0.0
        }
    }

    /// Lattice index nearest to `coord`, if it lies on the axis.
    #[cfg(test)]
    pub(crate) fn index_of(&self, coord: f64) -> Option<usize> {
        if (coord - self.max).abs() < EDGE_TOLERANCE {
            return Some(self.cells);
        }
        let i = ((coord - self.min) / self.step).round();
        if i < 0.0 || i as usize > self.cells {
            return None;
        }
        let i = i as usize;
        ((self.coord(i) - coord).abs() < EDGE_TOLERANCE).then_some(i)
    }

    /// Iterate `(index, coordinate)` over every lattice point.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        (0..self.points()).map(|i| (i, self.coord(i)))
    }
}

/// A height field sampled on a `u x v` lattice.
///
/// For ground, floor and ceiling grids `u` is X and `v` is Y. For wall grids
/// `u` is Y and `v` is Z and the stored value is an X position.
#[derive(Clone, Debug, PartialEq)]
pub struct ElevationGrid {
    u: GridAxis,
    v: GridAxis,
    values: Vec<f64>,
}

impl ElevationGrid {
    /// Build a grid by evaluating `f(i, j, u, v)` at every lattice point, `u`
    /// outermost. The call order is fixed so stateful samplers stay
    /// reproducible.
    pub fn build(
        u: GridAxis,
        v: GridAxis,
        mut f: impl FnMut(usize, usize, f64, f64) -> f64,
    ) -> Self {
        let mut values = Vec::with_capacity(u.points() * v.points());
        for (i, uc) in u.iter() {
            for (j, vc) in v.iter() {
                values.push(f(i, j, uc, vc));
            }
        }
        Self { u, v, values }
    }

    pub fn u_axis(&self) -> &GridAxis {
        &self.u
    }

    pub fn v_axis(&self) -> &GridAxis {
        &self.v
    }

    /// Value at lattice point `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is outside the lattice.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(
            i < self.u.points() && j < self.v.points(),
            "grid index ({i}, {j}) out of range"
        );
        self.values[i * self.v.points() + j]
    }

    /// Value at world coordinate `(u, v)`, if it is a lattice point.
    #[cfg(test)]
    pub(crate) fn at(&self, u: f64, v: f64) -> Option<f64> {
        let i = self.u.index_of(u)?;
        let j = self.v.index_of(v)?;
        Some(self.get(i, j))
    }

    /// All values in lattice order (`u` outer, `v` inner).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Smallest and largest stored value.
    pub fn range(&self) -> (f64, f64) {
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}
