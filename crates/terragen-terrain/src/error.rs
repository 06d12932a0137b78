//! Grid configuration errors.

/// Errors raised while laying out or generating an elevation grid.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// A step size is zero, negative, or not finite.
    #[error("step size along {axis} must be a positive number, got {step}")]
    InvalidStep {
        /// Axis name (`'x'`, `'y'` or `'z'`).
        axis: char,
        /// The rejected step.
        step: f64,
    },
    /// A step size is positive but not a power of two.
    #[error("step size along {axis} must be a power of two, got {step}")]
    NotPowerOfTwo {
        axis: char,
        step: f64,
    },
    /// A tunnel was requested with no vertical opening.
    #[error("tunnel opening must be taller than zero, got {height}")]
    EmptyTunnel {
        /// Cave height plus slope height.
        height: f64,
    },
}
