//! Errors raised while building or querying distributions.

use thiserror::Error;

/// Usage errors local to a single call. None of them is recovered from
/// internally; they surface to the caller as soon as they are detected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DistError {
    #[error("probably: invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("probably: total mass is zero or not finite, cannot normalize")]
    DegenerateDistribution,
    #[error("probably: the distribution has no outcomes")]
    EmptyDistribution,
    #[error("probably: outcome `{0}` cannot be interpreted as a real number")]
    NonNumericOutcome(String),
}

impl DistError {
    pub(crate) fn not_a_probability<T: std::fmt::Debug>(what: &str, p: T) -> DistError {
        DistError::InvalidParameter(format!(
            "expected a real number in the interval [0,1] for {}, got `{:?}`",
            what, p
        ))
    }
}
