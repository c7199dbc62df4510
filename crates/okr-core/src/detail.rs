//! Objective detail payloads
//!
//! What route handlers return for an objective: the stored fields plus a
//! `progress_percentage` on the objective and on every key result. Payloads
//! can be built from an in-memory [`Objective`] or straight from persistence
//! rows; both paths go through the same [`ProgressEngine`].

use crate::ids::{KeyResultId, ObjectiveId};
use crate::key_result::KeyResult;
use crate::objective::Objective;
use okr_progress::{KeyResultRecord, KeyResultSnapshot, Measurable, ProgressEngine};
use serde::{Deserialize, Serialize};

/// Objective row as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveRecord {
    /// Objective ID
    pub id: ObjectiveId,
    /// Title
    pub title: String,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
}

/// Key result row as stored, type kept as a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredKeyResult {
    /// Key result ID
    pub id: KeyResultId,
    /// Title
    pub title: String,
    /// Unit label
    #[serde(default)]
    pub unit: Option<String>,
    /// Progress inputs
    #[serde(flatten)]
    pub values: KeyResultRecord,
}

impl Measurable for StoredKeyResult {
    #[inline]
    fn snapshot(&self) -> Option<KeyResultSnapshot> {
        self.values.snapshot()
    }
}

/// An objective row together with its key result rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveDocument {
    /// Objective row
    pub objective: ObjectiveRecord,
    /// Key result rows
    #[serde(default)]
    pub key_results: Vec<StoredKeyResult>,
}

/// Key result as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyResultDetail {
    /// Key result ID
    pub id: KeyResultId,
    /// Title
    pub title: String,
    /// Type name
    pub key_result_type: String,
    /// Unit label
    pub unit: Option<String>,
    /// Baseline value
    pub initial_value: f64,
    /// Latest value
    pub current_value: f64,
    /// Target value
    pub target_value: f64,
    /// Completion percentage, `[0, 100]`
    pub progress_percentage: f64,
}

impl KeyResultDetail {
    /// Detail for an in-memory key result
    #[must_use]
    pub fn from_key_result(key_result: &KeyResult, engine: &ProgressEngine) -> Self {
        Self {
            id: key_result.id(),
            title: key_result.title().to_string(),
            key_result_type: key_result.key_result_type().as_str().to_string(),
            unit: key_result.unit().map(str::to_string),
            initial_value: key_result.initial_value(),
            current_value: key_result.current_value(),
            target_value: key_result.target_value(),
            progress_percentage: engine.key_result_progress(key_result),
        }
    }

    /// Detail for a stored row
    #[must_use]
    pub fn from_stored(stored: &StoredKeyResult, engine: &ProgressEngine) -> Self {
        Self {
            id: stored.id,
            title: stored.title.clone(),
            key_result_type: stored.values.key_result_type.clone(),
            unit: stored.unit.clone(),
            initial_value: stored.values.initial_value,
            current_value: stored.values.current_value,
            target_value: stored.values.target_value,
            progress_percentage: engine.key_result_progress(stored),
        }
    }
}

/// Objective as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveDetail {
    /// Objective ID
    pub id: ObjectiveId,
    /// Title
    pub title: String,
    /// Description
    pub description: Option<String>,
    /// Key results with their own percentages
    pub key_results: Vec<KeyResultDetail>,
    /// Rolled-up completion percentage, `[0, 100]`
    pub progress_percentage: u8,
}

impl ObjectiveDetail {
    /// Detail for an in-memory objective
    #[must_use]
    pub fn from_objective(objective: &Objective, engine: &ProgressEngine) -> Self {
        Self {
            id: objective.id(),
            title: objective.title().to_string(),
            description: objective.description().map(str::to_string),
            key_results: objective
                .key_results()
                .iter()
                .map(|kr| KeyResultDetail::from_key_result(kr, engine))
                .collect(),
            progress_percentage: objective.progress_percentage(engine),
        }
    }

    /// Detail for stored rows
    #[must_use]
    pub fn from_document(document: &ObjectiveDocument, engine: &ProgressEngine) -> Self {
        Self {
            id: document.objective.id,
            title: document.objective.title.clone(),
            description: document.objective.description.clone(),
            key_results: document
                .key_results
                .iter()
                .map(|kr| KeyResultDetail::from_stored(kr, engine))
                .collect(),
            progress_percentage: engine.objective_progress(&document.key_results),
        }
    }
}
