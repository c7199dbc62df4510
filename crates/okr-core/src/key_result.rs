//! Key results
//!
//! A key result owns its numeric state and its check-in history. The current
//! value only moves through [`KeyResult::record_check_in`]; edits touch the
//! definition (title, type, target, unit) and never the history.

use crate::check_in::CheckIn;
use crate::error::{ensure_finite, ensure_title, ModelError, ModelResult};
use crate::ids::{KeyResultId, UserId};
use chrono::{DateTime, Utc};
use okr_progress::{KeyResultSnapshot, KeyResultType, Measurable, ProgressEngine};
use serde::{Deserialize, Serialize};

/// Quantitative measure of an objective
///
/// Deserializing applies the same checks as construction and check-ins, and
/// the stored current value must equal the latest check-in's value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "KeyResultData")]
pub struct KeyResult {
    id: KeyResultId,
    title: String,
    key_result_type: KeyResultType,
    unit: Option<String>,
    initial_value: f64,
    current_value: f64,
    target_value: f64,
    check_ins: Vec<CheckIn>,
}

impl KeyResult {
    /// Create key result; the current value starts at the initial value
    ///
    /// # Errors
    /// - `EmptyTitle` if `title` is blank
    /// - `NonFiniteValue` if either value is NaN or infinite
    pub fn new(
        title: impl Into<String>,
        key_result_type: KeyResultType,
        initial_value: f64,
        target_value: f64,
    ) -> ModelResult<Self> {
        let initial_value = ensure_finite("initial_value", initial_value)?;
        Ok(Self {
            id: KeyResultId::new(),
            title: ensure_title("key result", title.into())?,
            key_result_type,
            unit: None,
            initial_value,
            current_value: initial_value,
            target_value: ensure_finite("target_value", target_value)?,
            check_ins: Vec::new(),
        })
    }

    /// With explicit ID
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: KeyResultId) -> Self {
        self.id = id;
        self
    }

    /// With unit label
    #[inline]
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Key result ID
    #[inline]
    #[must_use]
    pub fn id(&self) -> KeyResultId {
        self.id
    }

    /// Title
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Measurement type
    #[inline]
    #[must_use]
    pub fn key_result_type(&self) -> KeyResultType {
        self.key_result_type
    }

    /// Unit label
    #[inline]
    #[must_use]
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    /// Baseline value
    #[inline]
    #[must_use]
    pub fn initial_value(&self) -> f64 {
        self.initial_value
    }

    /// Latest checked-in value (initial value before any check-in)
    #[inline]
    #[must_use]
    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    /// Target value
    #[inline]
    #[must_use]
    pub fn target_value(&self) -> f64 {
        self.target_value
    }

    /// Check-in history, oldest first
    #[inline]
    #[must_use]
    pub fn check_ins(&self) -> &[CheckIn] {
        &self.check_ins
    }

    /// Most recent check-in
    #[inline]
    #[must_use]
    pub fn latest_check_in(&self) -> Option<&CheckIn> {
        self.check_ins.last()
    }

    /// Record a new value
    ///
    /// Appends to the history and moves the current value.
    ///
    /// # Errors
    /// - `NonFiniteValue` if `value` is NaN or infinite
    /// - `CheckInOutOfOrder` if `timestamp` precedes the latest check-in
    pub fn record_check_in(
        &mut self,
        author: UserId,
        value: f64,
        notes: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> ModelResult<&CheckIn> {
        let check_in = CheckIn::new(author, value, notes, timestamp)?;
        ensure_in_order(self.latest_check_in(), &check_in)?;

        tracing::debug!(
            key_result = %self.id,
            author = %author,
            previous = self.current_value,
            value,
            "recorded check-in"
        );

        self.current_value = check_in.value();
        let recorded = self.check_ins.len();
        self.check_ins.push(check_in);
        Ok(&self.check_ins[recorded])
    }

    /// Apply an edit to the definition
    ///
    /// Check-in history and the initial and current values are left alone.
    ///
    /// # Errors
    /// - `EmptyTitle` if the new title is blank
    /// - `NonFiniteValue` if the new target is NaN or infinite
    ///
    /// Nothing is changed when an error is returned.
    pub fn apply_edit(&mut self, edit: KeyResultEdit) -> ModelResult<()> {
        let title = edit
            .title
            .map(|t| ensure_title("key result", t))
            .transpose()?;
        let target_value = edit
            .target_value
            .map(|v| ensure_finite("target_value", v))
            .transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(key_result_type) = edit.key_result_type {
            self.key_result_type = key_result_type;
        }
        if let Some(target_value) = target_value {
            self.target_value = target_value;
        }
        if let Some(unit) = edit.unit {
            self.unit = unit;
        }
        Ok(())
    }

    /// Completion percentage with the given engine
    #[inline]
    #[must_use]
    pub fn progress(&self, engine: &ProgressEngine) -> f64 {
        engine.key_result_progress(self)
    }
}

fn ensure_in_order(latest: Option<&CheckIn>, next: &CheckIn) -> ModelResult<()> {
    match latest {
        Some(latest) if next.timestamp() < latest.timestamp() => Err(ModelError::CheckInOutOfOrder {
            latest: latest.timestamp(),
            attempted: next.timestamp(),
        }),
        _ => Ok(()),
    }
}

#[derive(Deserialize)]
struct KeyResultData {
    id: KeyResultId,
    title: String,
    key_result_type: KeyResultType,
    #[serde(default)]
    unit: Option<String>,
    initial_value: f64,
    current_value: f64,
    target_value: f64,
    #[serde(default)]
    check_ins: Vec<CheckIn>,
}

impl TryFrom<KeyResultData> for KeyResult {
    type Error = ModelError;

    fn try_from(data: KeyResultData) -> ModelResult<Self> {
        let initial_value = ensure_finite("initial_value", data.initial_value)?;
        let current_value = ensure_finite("current_value", data.current_value)?;
        let target_value = ensure_finite("target_value", data.target_value)?;

        for pair in data.check_ins.windows(2) {
            ensure_in_order(Some(&pair[0]), &pair[1])?;
        }
        let expected = data.check_ins.last().map_or(initial_value, CheckIn::value);
        if current_value != expected {
            return Err(ModelError::CurrentValueMismatch {
                expected,
                found: current_value,
            });
        }

        Ok(Self {
            id: data.id,
            title: ensure_title("key result", data.title)?,
            key_result_type: data.key_result_type,
            unit: data.unit,
            initial_value,
            current_value,
            target_value,
            check_ins: data.check_ins,
        })
    }
}

impl Measurable for KeyResult {
    #[inline]
    fn snapshot(&self) -> Option<KeyResultSnapshot> {
        Some(KeyResultSnapshot::new(
            self.key_result_type,
            self.initial_value,
            self.current_value,
            self.target_value,
        ))
    }
}

/// Partial update of a key result's definition
///
/// `None` fields are left unchanged. `unit: Some(None)` clears the unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyResultEdit {
    /// New title
    pub title: Option<String>,
    /// New measurement type
    pub key_result_type: Option<KeyResultType>,
    /// New target
    pub target_value: Option<f64>,
    /// New unit, or `Some(None)` to clear
    ///
    /// An explicit `null` on the wire clears; an absent field leaves it alone.
    #[serde(deserialize_with = "present_or_null")]
    pub unit: Option<Option<String>>,
}

fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl KeyResultEdit {
    /// Empty edit
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With title
    #[inline]
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// With type
    #[inline]
    #[must_use]
    pub fn key_result_type(mut self, key_result_type: KeyResultType) -> Self {
        self.key_result_type = Some(key_result_type);
        self
    }

    /// With target
    #[inline]
    #[must_use]
    pub fn target_value(mut self, target_value: f64) -> Self {
        self.target_value = Some(target_value);
        self
    }

    /// With unit (`None` clears it)
    #[inline]
    #[must_use]
    pub fn unit(mut self, unit: Option<String>) -> Self {
        self.unit = Some(unit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn signups() -> KeyResult {
        KeyResult::new("Weekly signups", KeyResultType::IncreaseTo, 0.0, 200.0)
            .unwrap()
            .with_unit("users")
    }

    #[test]
    fn starts_at_initial_value() {
        let kr = KeyResult::new("Latency", KeyResultType::DecreaseTo, 400.0, 100.0).unwrap();
        assert_eq!(kr.current_value(), 400.0);
        assert!(kr.check_ins().is_empty());
        assert_eq!(kr.progress(&ProgressEngine::default()), 0.0);
    }

    #[test]
    fn rejects_invalid_definition() {
        assert_eq!(
            KeyResult::new(" ", KeyResultType::IncreaseTo, 0.0, 1.0),
            Err(ModelError::EmptyTitle("key result"))
        );
        assert!(KeyResult::new("x", KeyResultType::IncreaseTo, f64::NAN, 1.0).is_err());
        assert!(KeyResult::new("x", KeyResultType::IncreaseTo, 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn check_in_moves_current_value() {
        let mut kr = signups();
        let author = UserId::new();
        let now = Utc::now();

        let check_in = kr
            .record_check_in(author, 50.0, Some("launch week".into()), now)
            .unwrap();
        assert_eq!(check_in.author(), author);
        assert_eq!(check_in.notes(), Some("launch week"));

        kr.record_check_in(author, 100.0, None, now + Duration::days(7)).unwrap();

        assert_eq!(kr.current_value(), 100.0);
        assert_eq!(kr.check_ins().len(), 2);
        assert_eq!(kr.check_ins()[0].value(), 50.0);
        assert_eq!(kr.progress(&ProgressEngine::default()), 50.0);
    }

    #[test]
    fn check_in_at_same_instant_is_accepted() {
        let mut kr = signups();
        let now = Utc::now();
        kr.record_check_in(UserId::new(), 10.0, None, now).unwrap();
        kr.record_check_in(UserId::new(), 20.0, None, now).unwrap();
        assert_eq!(kr.current_value(), 20.0);
    }

    #[test]
    fn rejected_check_in_leaves_state_alone() {
        let mut kr = signups();
        let now = Utc::now();
        kr.record_check_in(UserId::new(), 10.0, None, now).unwrap();

        let err = kr
            .record_check_in(UserId::new(), 20.0, None, now - Duration::hours(1))
            .unwrap_err();
        assert!(matches!(err, ModelError::CheckInOutOfOrder { .. }));

        assert!(kr.record_check_in(UserId::new(), f64::NAN, None, now).is_err());

        assert_eq!(kr.current_value(), 10.0);
        assert_eq!(kr.check_ins().len(), 1);
    }

    #[test]
    fn edit_keeps_history_and_values() {
        let mut kr = signups();
        kr.record_check_in(UserId::new(), 80.0, None, Utc::now()).unwrap();
        let history = kr.check_ins().to_vec();

        kr.apply_edit(
            KeyResultEdit::new()
                .title("Monthly signups")
                .target_value(160.0)
                .unit(None),
        )
        .unwrap();

        assert_eq!(kr.title(), "Monthly signups");
        assert_eq!(kr.target_value(), 160.0);
        assert_eq!(kr.unit(), None);
        assert_eq!(kr.initial_value(), 0.0);
        assert_eq!(kr.current_value(), 80.0);
        assert_eq!(kr.check_ins(), history.as_slice());
        assert_eq!(kr.progress(&ProgressEngine::default()), 50.0);
    }

    #[test]
    fn edit_changes_type() {
        let mut kr = signups();
        kr.apply_edit(KeyResultEdit::new().key_result_type(KeyResultType::StayBelow))
            .unwrap();
        assert_eq!(kr.key_result_type(), KeyResultType::StayBelow);
        assert_eq!(kr.progress(&ProgressEngine::default()), 100.0);
    }

    #[test]
    fn invalid_edit_is_atomic() {
        let mut kr = signups();
        let before = kr.clone();
        let err = kr
            .apply_edit(KeyResultEdit::new().title("New").target_value(f64::NAN))
            .unwrap_err();
        assert!(matches!(err, ModelError::NonFiniteValue { field: "target_value", .. }));
        assert_eq!(kr, before);
    }

    #[test]
    fn edit_deserializes_partial_json() {
        let edit: KeyResultEdit = serde_json::from_str(r#"{"target_value": 5}"#).unwrap();
        assert_eq!(edit, KeyResultEdit::new().target_value(5.0));

        let edit: KeyResultEdit =
            serde_json::from_str(r#"{"key_result_type": "achieved_or_not"}"#).unwrap();
        assert_eq!(edit.key_result_type, Some(KeyResultType::AchievedOrNot));
        assert_eq!(edit.unit, None);
    }

    #[test]
    fn edit_with_null_unit_clears_it() {
        let edit: KeyResultEdit = serde_json::from_str(r#"{"unit": null}"#).unwrap();
        assert_eq!(edit, KeyResultEdit::new().unit(None));

        let edit: KeyResultEdit = serde_json::from_str(r#"{"unit": "%"}"#).unwrap();
        assert_eq!(edit.unit, Some(Some("%".to_string())));

        let mut kr = signups();
        kr.apply_edit(serde_json::from_str(r#"{"unit": null}"#).unwrap())
            .unwrap();
        assert_eq!(kr.unit(), None);

        let mut kr = signups();
        kr.apply_edit(serde_json::from_str(r#"{"title": "Signups"}"#).unwrap())
            .unwrap();
        assert_eq!(kr.unit(), Some("users"));
    }

    #[test]
    fn recorded_check_in_is_the_one_returned() {
        let mut kr = signups();
        let now = Utc::now();
        kr.record_check_in(UserId::new(), 5.0, None, now).unwrap();

        let author = UserId::new();
        let returned = kr
            .record_check_in(author, 7.0, Some("second".into()), now + Duration::days(1))
            .unwrap()
            .clone();
        assert_eq!(returned.value(), 7.0);
        assert_eq!(returned.author(), author);
        assert_eq!(kr.latest_check_in(), Some(&returned));
    }

    #[test]
    fn serde_round_trip_keeps_history() {
        let mut kr = signups();
        let now = Utc::now();
        kr.record_check_in(UserId::new(), 20.0, None, now).unwrap();
        kr.record_check_in(UserId::new(), 60.0, None, now + Duration::days(2))
            .unwrap();

        let json = serde_json::to_value(&kr).unwrap();
        let back: KeyResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, kr);
    }

    #[test]
    fn deserializing_rejects_inconsistent_state() {
        let mut kr = signups();
        let now = Utc::now();
        kr.record_check_in(UserId::new(), 20.0, None, now).unwrap();
        kr.record_check_in(UserId::new(), 60.0, None, now + Duration::days(2))
            .unwrap();
        let valid = serde_json::to_value(&kr).unwrap();
        let decode = |value: serde_json::Value| serde_json::from_value::<KeyResult>(value);

        let mut blank_title = valid.clone();
        blank_title["title"] = "  ".into();
        assert!(decode(blank_title).unwrap_err().to_string().contains("title must not be empty"));

        let mut wrong_current = valid.clone();
        wrong_current["current_value"] = 999.0.into();
        assert!(decode(wrong_current).unwrap_err().to_string().contains("does not match"));

        let mut reordered = valid.clone();
        reordered["check_ins"].as_array_mut().unwrap().reverse();
        reordered["current_value"] = 20.0.into();
        assert!(decode(reordered).unwrap_err().to_string().contains("earlier than"));

        let mut no_history = valid;
        no_history["check_ins"] = serde_json::json!([]);
        assert!(decode(no_history.clone()).is_err());
        no_history["current_value"] = 0.0.into();
        assert_eq!(decode(no_history).unwrap().current_value(), 0.0);
    }

    #[test]
    fn deserializing_rejects_non_finite_values() {
        let data = KeyResultData {
            id: KeyResultId::new(),
            title: "Latency".to_string(),
            key_result_type: KeyResultType::DecreaseTo,
            unit: None,
            initial_value: 400.0,
            current_value: 400.0,
            target_value: f64::NAN,
            check_ins: Vec::new(),
        };
        assert!(matches!(
            KeyResult::try_from(data),
            Err(ModelError::NonFiniteValue { field: "target_value", .. })
        ));
    }
}
