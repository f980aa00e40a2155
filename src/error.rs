use thiserror::Error;

/// Failures raised while building profiles and splines. All of these are
/// construction-time programming errors; queries on a built value never fail.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TrajectoryError {
    /// An input implies a zero, negative or non-finite duration somewhere a
    /// division happens (zero-velocity constant chunk, zero average velocity
    /// over a fixed distance, zero displacement, ...).
    #[error("degenerate input: {0}")]
    Degenerate(&'static str),

    /// A physical limit that must be strictly positive was not.
    #[error("{0} must be positive")]
    NonPositiveLimit(&'static str),

    /// A spline needs at least two control points.
    #[error("spline needs at least 2 control points, got {0}")]
    TooFewPoints(usize),

    /// The knot, point and derivative sequences must all be the same length.
    #[error("spline input sequences must all be the same length")]
    MismatchedInputs,

    /// Knots must be strictly increasing.
    #[error("spline knots must be strictly increasing")]
    UnorderedKnots,
}
