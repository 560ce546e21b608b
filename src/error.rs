//! Error types for simulation requests.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors surfaced by the scheduler engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedError {
    /// The request was rejected before any simulation work began.
    #[error("invalid configuration: {}", summarize(.0))]
    InvalidConfiguration(Vec<ValidationError>),

    /// The engine reached a state that correct scheduling cannot produce.
    #[error("internal invariant violated at t={time}: {reason}")]
    InternalInvariantViolation { time: i64, reason: String },

    /// A policy name or JSON request could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
}

impl SchedError {
    /// Shorthand for an invariant violation.
    pub(crate) fn invariant(time: i64, reason: impl Into<String>) -> Self {
        Self::InternalInvariantViolation {
            time,
            reason: reason.into(),
        }
    }

    /// Validation errors carried by an `InvalidConfiguration`, if any.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::InvalidConfiguration(errors) => errors,
            _ => &[],
        }
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, SchedError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_display_joins_messages() {
        let err = SchedError::InvalidConfiguration(vec![
            ValidationError::new(ValidationErrorKind::EmptyInput, "no processes"),
            ValidationError::new(ValidationErrorKind::InvalidQuantum, "quantum must be positive"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid configuration: no processes; quantum must be positive"
        );
        assert_eq!(err.validation_errors().len(), 2);
    }

    #[test]
    fn test_invariant_display() {
        let err = SchedError::invariant(4, "no runnable process");
        assert_eq!(
            err.to_string(),
            "internal invariant violated at t=4: no runnable process"
        );
        assert!(err.validation_errors().is_empty());
    }
}
