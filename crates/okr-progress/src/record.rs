//! Key result records as delivered by persistence
//!
//! Storage hands over the type as a plain string. Records are accepted as-is
//! and interpreted lazily, so a row with a type this build doesn't know
//! about still renders (at 0 progress) instead of failing the whole page.

use crate::engine::{KeyResultSnapshot, Measurable};
use crate::kind::{KeyResultType, ParseKeyResultTypeError};
use serde::{Deserialize, Serialize};

/// Untyped key result row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyResultRecord {
    /// Type name, e.g. `should_increase_to`
    #[serde(alias = "key_result_type")]
    pub key_result_type: String,
    /// Baseline recorded at creation
    #[serde(alias = "initial_value")]
    pub initial_value: f64,
    /// Value as of the latest check-in
    #[serde(alias = "current_value")]
    pub current_value: f64,
    /// Goal
    #[serde(alias = "target_value")]
    pub target_value: f64,
}

impl KeyResultRecord {
    /// Create record
    #[inline]
    #[must_use]
    pub fn new(
        key_result_type: impl Into<String>,
        initial_value: f64,
        current_value: f64,
        target_value: f64,
    ) -> Self {
        Self {
            key_result_type: key_result_type.into(),
            initial_value,
            current_value,
            target_value,
        }
    }

    /// Parse the type name
    ///
    /// # Errors
    /// Returns [`ParseKeyResultTypeError`] for names outside the known set
    pub fn parsed_type(&self) -> Result<KeyResultType, ParseKeyResultTypeError> {
        self.key_result_type.parse()
    }

    /// Typed view of this record
    ///
    /// # Errors
    /// Returns [`ParseKeyResultTypeError`] for names outside the known set
    pub fn to_snapshot(&self) -> Result<KeyResultSnapshot, ParseKeyResultTypeError> {
        Ok(KeyResultSnapshot::new(
            self.parsed_type()?,
            self.initial_value,
            self.current_value,
            self.target_value,
        ))
    }
}

impl From<KeyResultSnapshot> for KeyResultRecord {
    fn from(snapshot: KeyResultSnapshot) -> Self {
        Self::new(
            snapshot.key_result_type.as_str(),
            snapshot.initial_value,
            snapshot.current_value,
            snapshot.target_value,
        )
    }
}

impl Measurable for KeyResultRecord {
    fn snapshot(&self) -> Option<KeyResultSnapshot> {
        match self.to_snapshot() {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!("Treating key result as 0% progress: {}", e);
                None
            }
        }
    }
}
