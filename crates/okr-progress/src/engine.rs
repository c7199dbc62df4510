//! Progress Engine
//!
//! Turns a key result's numeric state into a completion percentage and
//! rolls key results up into an objective score.
//!
//! # Contract
//! - Key result progress is always finite and within `[0, 100]`
//! - Objective progress is the rounded mean (half up) of its key results
//! - Nothing here fails: degenerate input maps to 0 progress

use crate::config::ProgressConfig;
use crate::kind::KeyResultType;
use serde::{Deserialize, Serialize};

/// The numeric state of a key result that progress is computed from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyResultSnapshot {
    /// How values map to completion
    pub key_result_type: KeyResultType,
    /// Baseline recorded at creation
    pub initial_value: f64,
    /// Value as of the latest check-in
    pub current_value: f64,
    /// Goal
    pub target_value: f64,
}

impl KeyResultSnapshot {
    /// Create snapshot
    #[inline]
    #[must_use]
    pub fn new(
        key_result_type: KeyResultType,
        initial_value: f64,
        current_value: f64,
        target_value: f64,
    ) -> Self {
        Self {
            key_result_type,
            initial_value,
            current_value,
            target_value,
        }
    }

    /// Completion percentage in `[0, 100]`
    #[must_use]
    pub fn progress(&self) -> f64 {
        let Self {
            initial_value: initial,
            current_value: current,
            target_value: target,
            ..
        } = *self;

        match self.key_result_type {
            // (initial - current) / (initial - target) is the same ratio
            KeyResultType::IncreaseTo | KeyResultType::DecreaseTo => linear(initial, current, target),
            KeyResultType::StayAbove | KeyResultType::AchievedOrNot => met(current >= target),
            KeyResultType::StayBelow => met(current <= target),
        }
    }
}

/// Anything progress can be computed for
///
/// Returns `None` when the record cannot be interpreted (for example an
/// unrecognized key result type coming from storage). Such records count
/// as 0 progress.
pub trait Measurable {
    /// Typed numeric state, if the record is interpretable
    fn snapshot(&self) -> Option<KeyResultSnapshot>;
}

impl Measurable for KeyResultSnapshot {
    #[inline]
    fn snapshot(&self) -> Option<KeyResultSnapshot> {
        Some(*self)
    }
}

impl<T: Measurable + ?Sized> Measurable for &T {
    #[inline]
    fn snapshot(&self) -> Option<KeyResultSnapshot> {
        (**self).snapshot()
    }
}

/// Progress computation with a fixed configuration
///
/// Holds no mutable state; share freely across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressEngine {
    config: ProgressConfig,
}

impl ProgressEngine {
    /// Create engine with configuration
    #[inline]
    #[must_use]
    pub fn new(config: ProgressConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ProgressConfig {
        &self.config
    }

    /// Completion percentage of a single key result, in `[0, 100]`
    #[must_use]
    pub fn key_result_progress<M: Measurable + ?Sized>(&self, key_result: &M) -> f64 {
        key_result.snapshot().map_or(0.0, |snapshot| snapshot.progress())
    }

    /// Objective percentage: mean of the counted key results, rounded half up
    ///
    /// An empty set, or one where the policy skips everything, is 0.
    #[must_use]
    pub fn objective_progress<I>(&self, key_results: I) -> u8
    where
        I: IntoIterator,
        I::Item: Measurable,
    {
        let mut values = Vec::new();
        let mut skipped = 0usize;

        for key_result in key_results {
            match key_result.snapshot() {
                Some(snapshot) if !self.config.aggregation.includes(snapshot.key_result_type) => {
                    skipped += 1;
                }
                Some(snapshot) => values.push(snapshot.progress()),
                None => values.push(0.0),
            }
        }

        if values.is_empty() {
            tracing::debug!(skipped, "no key results counted, objective progress is 0");
            return 0;
        }

        // Summation order is fixed so the result can't depend on input order.
        values.sort_by(f64::total_cmp);
        let mean = values.iter().sum::<f64>() / count_as_f64(values.len());
        let percent = round_half_up(mean);

        tracing::debug!(counted = values.len(), skipped, mean, percent, "aggregated objective progress");
        percent
    }
}

/// Key result progress with the default configuration
#[inline]
#[must_use]
pub fn compute_key_result_progress<M: Measurable + ?Sized>(key_result: &M) -> f64 {
    ProgressEngine::default().key_result_progress(key_result)
}

/// Objective progress with the default configuration
#[inline]
#[must_use]
pub fn compute_objective_progress<I>(key_results: I) -> u8
where
    I: IntoIterator,
    I::Item: Measurable,
{
    ProgressEngine::default().objective_progress(key_results)
}

fn linear(initial: f64, current: f64, target: f64) -> f64 {
    if target == initial {
        return 0.0;
    }
    let mut delta = current - initial;
    let mut span = target - initial;
    if !(delta.is_finite() && span.is_finite()) {
        // Differences of huge finite values overflow; halved ones can't.
        delta = current / 2.0 - initial / 2.0;
        span = target / 2.0 - initial / 2.0;
    }
    // Multiplying first keeps integer inputs exact (33 of 100 is 33.0).
    let scaled = delta * 100.0;
    let percent = if scaled.is_finite() {
        scaled / span
    } else {
        delta / span * 100.0
    };
    clamp_percent(percent)
}

fn met(condition: bool) -> f64 {
    if condition {
        100.0
    } else {
        0.0
    }
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() || value <= 0.0 {
        0.0
    } else if value >= 100.0 {
        100.0
    } else {
        value
    }
}

#[allow(clippy::cast_precision_loss)]
fn count_as_f64(count: usize) -> f64 {
    count as f64
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_half_up(value: f64) -> u8 {
    // Non-negative input, so round() (half away from zero) is half up.
    clamp_percent(value).round() as u8
}
