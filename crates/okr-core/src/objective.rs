//! Objectives
//!
//! An objective exclusively owns its key results. Its progress is derived
//! from them on every read and never stored.

use crate::check_in::CheckIn;
use crate::error::{ensure_title, ModelError, ModelResult};
use crate::ids::{KeyResultId, ObjectiveId, UserId};
use crate::key_result::{KeyResult, KeyResultEdit};
use chrono::{DateTime, Utc};
use okr_progress::ProgressEngine;
use serde::{Deserialize, Serialize};

/// Qualitative goal with measurable key results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ObjectiveData")]
pub struct Objective {
    id: ObjectiveId,
    title: String,
    description: Option<String>,
    key_results: Vec<KeyResult>,
}

impl Objective {
    /// Create objective with no key results
    ///
    /// # Errors
    /// Returns `EmptyTitle` if `title` is blank
    pub fn new(title: impl Into<String>) -> ModelResult<Self> {
        Ok(Self {
            id: ObjectiveId::new(),
            title: ensure_title("objective", title.into())?,
            description: None,
            key_results: Vec::new(),
        })
    }

    /// With explicit ID
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: ObjectiveId) -> Self {
        self.id = id;
        self
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Objective ID
    #[inline]
    #[must_use]
    pub fn id(&self) -> ObjectiveId {
        self.id
    }

    /// Title
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Description
    #[inline]
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Owned key results, in insertion order
    #[inline]
    #[must_use]
    pub fn key_results(&self) -> &[KeyResult] {
        &self.key_results
    }

    /// Take ownership of a key result
    pub fn add_key_result(&mut self, key_result: KeyResult) -> KeyResultId {
        let id = key_result.id();
        tracing::debug!(objective = %self.id, key_result = %id, "added key result");
        self.key_results.push(key_result);
        id
    }

    /// Look up a key result
    #[must_use]
    pub fn key_result(&self, id: KeyResultId) -> Option<&KeyResult> {
        self.key_results.iter().find(|kr| kr.id() == id)
    }

    /// Look up a key result for modification
    #[must_use]
    pub fn key_result_mut(&mut self, id: KeyResultId) -> Option<&mut KeyResult> {
        self.key_results.iter_mut().find(|kr| kr.id() == id)
    }

    /// Remove a key result, returning it with its history
    ///
    /// # Errors
    /// Returns `KeyResultNotFound` if the objective doesn't own `id`
    pub fn remove_key_result(&mut self, id: KeyResultId) -> ModelResult<KeyResult> {
        let position = self
            .key_results
            .iter()
            .position(|kr| kr.id() == id)
            .ok_or(ModelError::KeyResultNotFound(id))?;
        Ok(self.key_results.remove(position))
    }

    /// Record a check-in on one of this objective's key results
    ///
    /// # Errors
    /// - `KeyResultNotFound` if the objective doesn't own `id`
    /// - any error from [`KeyResult::record_check_in`]
    pub fn record_check_in(
        &mut self,
        id: KeyResultId,
        author: UserId,
        value: f64,
        notes: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> ModelResult<&CheckIn> {
        self.key_result_mut(id)
            .ok_or(ModelError::KeyResultNotFound(id))?
            .record_check_in(author, value, notes, timestamp)
    }

    /// Edit one of this objective's key results
    ///
    /// # Errors
    /// - `KeyResultNotFound` if the objective doesn't own `id`
    /// - any error from [`KeyResult::apply_edit`]
    pub fn edit_key_result(&mut self, id: KeyResultId, edit: KeyResultEdit) -> ModelResult<()> {
        self.key_result_mut(id)
            .ok_or(ModelError::KeyResultNotFound(id))?
            .apply_edit(edit)
    }

    /// Derived completion percentage
    #[inline]
    #[must_use]
    pub fn progress_percentage(&self, engine: &ProgressEngine) -> u8 {
        engine.objective_progress(&self.key_results)
    }
}

#[derive(Deserialize)]
struct ObjectiveData {
    id: ObjectiveId,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    key_results: Vec<KeyResult>,
}

impl TryFrom<ObjectiveData> for Objective {
    type Error = ModelError;

    fn try_from(data: ObjectiveData) -> ModelResult<Self> {
        Ok(Self {
            id: data.id,
            title: ensure_title("objective", data.title)?,
            description: data.description,
            key_results: data.key_results,
        })
    }
}
