//! Property engine errors.

use thiserror::Error;

/// Result type for property engine operations.
pub type PropsResult<T> = Result<T, PropsError>;

/// Errors that can occur during steam property evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropsError {
    /// Inputs fall outside the formulation's valid envelope.
    #[error("Input out of bounds: {what}")]
    OutOfBounds { what: String },

    /// Non-finite inputs or an inconsistent set of state values.
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Iterative solve did not bracket or converge.
    #[error("Convergence failed for {what}")]
    ConvergenceFailed { what: &'static str },

    /// Backend (CoolProp) error.
    #[error("Backend error: {message}")]
    Backend { message: String },
}

impl PropsError {
    pub fn out_of_bounds(what: impl Into<String>) -> Self {
        Self::OutOfBounds { what: what.into() }
    }

    /// True for the distinguished "outside the valid envelope" signal.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}
