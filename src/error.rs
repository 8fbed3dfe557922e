use thiserror::Error;

/// Result type for solver and line-search operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running the solver.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The requested line-search identifier is not recognized.
    #[error("unknown line search method '{name}': valid methods are 'strong_wolfe', 'backtracking' and 'fixed'")]
    UnknownLineSearch { name: String },

    /// None of `tol`, `gtol` and `maxiter` is set, so the loop could never
    /// terminate.
    #[error("no stopping criterion configured: set at least one of tol, gtol or maxiter")]
    NoStoppingCriterion,

    /// A tolerance was set to a non-finite or non-positive value.
    #[error("invalid {name} tolerance {value}: must be finite and positive")]
    InvalidTolerance { name: &'static str, value: f64 },

    /// Line-search options violate the strategy's parameter constraints.
    #[error("invalid line search options: {reason}")]
    InvalidLineSearchOptions { reason: &'static str },

    /// The negative gradient is not a descent direction. The directional
    /// derivative along it must be strictly negative; a non-negative slope
    /// signals a broken gradient implementation.
    #[error(
        "negative gradient is not a descent direction (slope {slope}, |grad| = {gradient_norm}): is your gradient correct?"
    )]
    NotADescentDirection { slope: f64, gradient_norm: f64 },

    /// The line search could not find an acceptable step length within its
    /// own budget.
    #[error("line search failed: {reason}")]
    LineSearchFailed { reason: &'static str },
}
