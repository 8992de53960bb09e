//! Error taxonomy for state-point and cycle calculations.

use sc_core::CoreError;
use sc_props::PropsError;
use thiserror::Error;

/// Guidance shown when a single state falls outside the property envelope.
pub const STATE_RANGE_GUIDANCE: &str = "The provided temperature and pressure exceed the valid limits of the IAPWS-97 steam tables. Please enter physically realistic values.";

/// Guidance shown when a cycle state falls outside the property envelope.
pub const CYCLE_RANGE_GUIDANCE: &str = "The provided parameters exceed the valid limits of the IAPWS-97 formulations. Please verify that your Boiler Temperature isn't impossibly high or low.";

/// Result type for calculations.
pub type CalcResult<T> = Result<T, CalcError>;

/// Stable discriminant of a [`CalcError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalcErrorKind {
    InputError,
    InvalidUnit,
    RangeViolation,
    PhysicsViolation,
    InvalidEfficiency,
    PhysicsEvaluationError,
}

impl CalcErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InputError => "input_error",
            Self::InvalidUnit => "invalid_unit",
            Self::RangeViolation => "range_violation",
            Self::PhysicsViolation => "physics_violation",
            Self::InvalidEfficiency => "invalid_efficiency",
            Self::PhysicsEvaluationError => "physics_evaluation_error",
        }
    }
}

/// Everything a single calculation attempt can fail with.
///
/// The `Display` text is the user-facing message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    /// Missing or non-numeric form field.
    #[error("Input Error: {detail}")]
    InputError { field: String, detail: String },

    #[error("Input Error: unrecognized {quantity} unit '{unit}'")]
    InvalidUnit { unit: String, quantity: &'static str },

    /// The property engine reported its envelope was exceeded.
    #[error("{guidance}")]
    RangeViolation {
        guidance: &'static str,
        detail: String,
    },

    #[error(
        "Physics Violation: Boiler pressure must be strictly greater than Condenser pressure."
    )]
    PhysicsViolation { p_cond_bar: f64, p_boiler_bar: f64 },

    #[error("Efficiencies must be between 1% and 100%.")]
    InvalidEfficiency { pump: f64, turbine: f64 },

    /// Any other engine-side failure.
    #[error("Thermodynamic error: {detail}")]
    PhysicsEvaluationError { detail: String },
}

impl CalcError {
    pub fn kind(&self) -> CalcErrorKind {
        match self {
            Self::InputError { .. } => CalcErrorKind::InputError,
            Self::InvalidUnit { .. } => CalcErrorKind::InvalidUnit,
            Self::RangeViolation { .. } => CalcErrorKind::RangeViolation,
            Self::PhysicsViolation { .. } => CalcErrorKind::PhysicsViolation,
            Self::InvalidEfficiency { .. } => CalcErrorKind::InvalidEfficiency,
            Self::PhysicsEvaluationError { .. } => CalcErrorKind::PhysicsEvaluationError,
        }
    }

    /// Message suitable for showing to the person who submitted the form.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn input(field: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InputError {
            field: field.into(),
            detail: detail.into(),
        }
    }

    /// Map an engine failure, attaching the range guidance for this mode.
    pub fn from_engine(err: PropsError, guidance: &'static str) -> Self {
        if err.is_out_of_bounds() {
            Self::RangeViolation {
                guidance,
                detail: err.to_string(),
            }
        } else {
            Self::PhysicsEvaluationError {
                detail: err.to_string(),
            }
        }
    }
}

impl From<CoreError> for CalcError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidUnit { unit, quantity } => Self::InvalidUnit { unit, quantity },
            CoreError::NonFinite { what, .. } => {
                Self::input(what, format!("{what} must be a finite number"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precondition_messages_are_verbatim() {
        let err = CalcError::PhysicsViolation {
            p_cond_bar: 10.0,
            p_boiler_bar: 5.0,
        };
        assert_eq!(
            err.user_message(),
            "Physics Violation: Boiler pressure must be strictly greater than Condenser pressure."
        );
        let err = CalcError::InvalidEfficiency {
            pump: 0.0,
            turbine: 0.85,
        };
        assert_eq!(err.user_message(), "Efficiencies must be between 1% and 100%.");
    }

    #[test]
    fn out_of_bounds_maps_to_range_violation() {
        let err = CalcError::from_engine(
            PropsError::OutOfBounds {
                what: "T above 2273.15 K".into(),
            },
            STATE_RANGE_GUIDANCE,
        );
        assert_eq!(err.kind(), CalcErrorKind::RangeViolation);
        assert_eq!(err.user_message(), STATE_RANGE_GUIDANCE);
    }

    #[test]
    fn other_engine_failures_are_evaluation_errors() {
        let err = CalcError::from_engine(
            PropsError::ConvergenceFailed { what: "density" },
            CYCLE_RANGE_GUIDANCE,
        );
        assert_eq!(err.kind(), CalcErrorKind::PhysicsEvaluationError);
        assert!(err.user_message().starts_with("Thermodynamic error:"));
    }

    #[test]
    fn unit_errors_keep_their_kind() {
        let err: CalcError = CoreError::InvalidUnit {
            unit: "psi".into(),
            quantity: "pressure",
        }
        .into();
        assert_eq!(err.kind(), CalcErrorKind::InvalidUnit);
        assert!(err.user_message().contains("psi"));
        assert_eq!(CalcErrorKind::InvalidUnit.as_str(), "invalid_unit");
    }
}
