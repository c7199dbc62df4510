//! Error types for the OKR domain model

use crate::ids::KeyResultId;
use chrono::{DateTime, Utc};

/// Domain model errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// A numeric field was NaN or infinite
    #[error("{field} must be a finite number, got {value}")]
    NonFiniteValue {
        /// Field name
        field: &'static str,
        /// Rejected value
        value: f64,
    },

    /// Title was empty or whitespace
    #[error("{0} title must not be empty")]
    EmptyTitle(&'static str),

    /// No key result with this ID on the objective
    #[error("key result not found: {0}")]
    KeyResultNotFound(KeyResultId),

    /// Check-in would land before the latest recorded one
    #[error("check-in at {attempted} is earlier than latest check-in at {latest}")]
    CheckInOutOfOrder {
        /// Timestamp of the latest existing check-in
        latest: DateTime<Utc>,
        /// Timestamp that was rejected
        attempted: DateTime<Utc>,
    },

    /// Stored current value disagrees with the check-in history
    #[error("current value {found} does not match latest recorded value {expected}")]
    CurrentValueMismatch {
        /// Latest check-in value, or the initial value with no check-ins
        expected: f64,
        /// Current value that was supplied
        found: f64,
    },
}

/// Result alias for model operations
pub type ModelResult<T> = Result<T, ModelError>;

pub(crate) fn ensure_finite(field: &'static str, value: f64) -> ModelResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ModelError::NonFiniteValue { field, value })
    }
}

pub(crate) fn ensure_title(kind: &'static str, title: String) -> ModelResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        Err(ModelError::EmptyTitle(kind))
    } else if trimmed.len() == title.len() {
        Ok(title)
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_values_pass() {
        assert_eq!(ensure_finite("target_value", -2.5), Ok(-2.5));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let err = ensure_finite("target_value", f64::INFINITY).unwrap_err();
        assert!(matches!(err, ModelError::NonFiniteValue { field: "target_value", .. }));
        assert!(ensure_finite("value", f64::NAN).is_err());
    }

    #[test]
    fn titles_are_trimmed() {
        assert_eq!(ensure_title("objective", "  Grow  ".to_string()).unwrap(), "Grow");
        assert_eq!(
            ensure_title("objective", "   ".to_string()),
            Err(ModelError::EmptyTitle("objective"))
        );
    }
}
