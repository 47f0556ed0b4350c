//! Failure modes of a solve.

use thiserror::Error;

/// Invalid setup, rejected before the iteration loop starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("at least two functions are required, got {0}")]
    NotEnoughFunctions(usize),
    #[error("the initial point must be a non-empty finite vector")]
    BadInitialPoint,
    #[error("the step size gamma must be positive")]
    NonPositiveStep,
    #[error("the update rate lambda must lie in (0, 2]")]
    BadUpdateRate,
    #[error("no function provides a gradient")]
    NoGradient,
}

/// Errors surfaced to the caller. Configuration problems are raised before
/// any iteration runs or any log output; a numeric anomaly aborts the loop
/// immediately instead of spinning to the iteration cap.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),
    #[error("objective became non-finite at iteration {niter}")]
    NumericAnomaly { niter: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
