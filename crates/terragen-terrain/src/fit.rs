//! Snapping brush bounds to a whole number of grid cells.

use terragen_math::BrushBounds;
use tracing::debug;

use crate::error::GridError;

/// Width/length changes at or below this are treated as no change.
pub const MAX_FIT_DRIFT: f64 = 0.001;

/// Reject non-positive or non-finite step sizes.
pub fn validate_steps(step_x: f64, step_y: f64) -> Result<(), GridError> {
    for (axis, step) in [('x', step_x), ('y', step_y)] {
        if !(step.is_finite() && step > 0.0) {
            return Err(GridError::InvalidStep { axis, step });
        }
    }
    Ok(())
}

/// Stricter check used by the command line: steps must also be powers of two
/// (1, 2, 4, ...), which keeps cell corners on the editor's grid.
pub fn require_power_of_two(step_x: f64, step_y: f64) -> Result<(), GridError> {
    validate_steps(step_x, step_y)?;
    for (axis, step) in [('x', step_x), ('y', step_y)] {
        let exponent = step.log2();
        if step < 1.0 || exponent != exponent.round() {
            return Err(GridError::NotPowerOfTwo { axis, step });
        }
    }
    Ok(())
}

/// Resize the X/Y extent of `bounds` to the nearest non-zero multiple of the
/// step, keeping the box centred.
///
/// When either extent changes, each minimum corner is shifted by half the
/// change (rounded to an integer) and the maximum is placed a whole number of
/// steps after it. Z is never touched. Returns whether the bounds moved.
///
/// All rounding here sends halves to the even neighbour, so a box one unit
/// wider than a cell keeps its minimum corner.
pub fn fit_to_grid(bounds: &mut BrushBounds, step_x: f64, step_y: f64) -> Result<bool, GridError> {
    validate_steps(step_x, step_y)?;

    let width = bounds.width();
    let length = bounds.length();
    let new_width = step_x.max((width / step_x).round_ties_even() * step_x);
    let new_length = step_y.max((length / step_y).round_ties_even() * step_y);

    if (new_width - width).abs() <= MAX_FIT_DRIFT && (new_length - length).abs() <= MAX_FIT_DRIFT {
        return Ok(false);
    }

    bounds.min.x += half_shift(new_width - width);
    bounds.max.x = bounds.min.x + new_width;
    bounds.min.y += half_shift(new_length - length);
    bounds.max.y = bounds.min.y + new_length;

    debug!(
        from_width = width,
        from_length = length,
        width = new_width,
        length = new_length,
        "bounds snapped to grid"
    );
    Ok(true)
}

/// Integer offset that recentres a box whose extent grew by `change`.
fn half_shift(change: f64) -> f64 {
    (-change / 2.0).round_ties_even() + 0.0
}
