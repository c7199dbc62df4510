//! Check-ins
//!
//! A check-in records a new current value for a key result. Check-ins are
//! append-only: once recorded they are never edited or removed.

use crate::error::{ensure_finite, ModelError, ModelResult};
use crate::ids::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded update of a key result's value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CheckInData")]
pub struct CheckIn {
    value: f64,
    notes: Option<String>,
    timestamp: DateTime<Utc>,
    author: UserId,
}

impl CheckIn {
    /// Create check-in
    ///
    /// Blank notes are stored as `None`.
    ///
    /// # Errors
    /// Returns `NonFiniteValue` if `value` is NaN or infinite
    pub fn new(
        author: UserId,
        value: f64,
        notes: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> ModelResult<Self> {
        Ok(Self {
            value: ensure_finite("value", value)?,
            notes: notes.filter(|n| !n.trim().is_empty()),
            timestamp,
            author,
        })
    }

    /// Recorded value
    #[inline]
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Free-form notes
    #[inline]
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// When the check-in was recorded
    #[inline]
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Who recorded it
    #[inline]
    #[must_use]
    pub fn author(&self) -> UserId {
        self.author
    }
}

#[derive(Deserialize)]
struct CheckInData {
    value: f64,
    notes: Option<String>,
    timestamp: DateTime<Utc>,
    author: UserId,
}

impl TryFrom<CheckInData> for CheckIn {
    type Error = ModelError;

    fn try_from(data: CheckInData) -> ModelResult<Self> {
        CheckIn::new(data.author, data.value, data.notes, data.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_notes_are_dropped() {
        let check_in = CheckIn::new(UserId::new(), 3.0, Some("  ".to_string()), Utc::now()).unwrap();
        assert_eq!(check_in.notes(), None);

        let check_in = CheckIn::new(UserId::new(), 3.0, Some("on track".to_string()), Utc::now()).unwrap();
        assert_eq!(check_in.notes(), Some("on track"));
    }

    #[test]
    fn rejects_non_finite_value() {
        assert!(CheckIn::new(UserId::new(), f64::NAN, None, Utc::now()).is_err());
    }

    #[test]
    fn deserializing_goes_through_validation() {
        let author = UserId::new();
        let stored = serde_json::json!({
            "value": 4.0,
            "notes": " ",
            "timestamp": "2024-07-01T09:00:00Z",
            "author": author,
        });
        let check_in: CheckIn = serde_json::from_value(stored).unwrap();
        assert_eq!(check_in.notes(), None);
        assert_eq!(check_in.author(), author);

        // JSON has no NaN, but YAML and other formats do
        let data = CheckInData {
            value: f64::NAN,
            notes: None,
            timestamp: Utc::now(),
            author,
        };
        assert!(CheckIn::try_from(data).is_err());
    }
}
