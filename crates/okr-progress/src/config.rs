//! Engine configuration

use crate::kind::KeyResultType;
use serde::{Deserialize, Serialize};

/// Which key results take part in objective aggregation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationPolicy {
    /// Every key result counts toward the objective
    #[default]
    AllKeyResults,
    /// Stay-above and stay-below key results are left out
    ExcludeThresholds,
}

impl AggregationPolicy {
    /// Whether a key result of this type is averaged into the objective
    #[inline]
    #[must_use]
    pub fn includes(&self, kind: KeyResultType) -> bool {
        match self {
            AggregationPolicy::AllKeyResults => true,
            AggregationPolicy::ExcludeThresholds => !kind.is_threshold(),
        }
    }
}

/// Progress engine configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Objective aggregation policy
    pub aggregation: AggregationPolicy,
}

impl ProgressConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With aggregation policy
    #[inline]
    #[must_use]
    pub fn with_aggregation(mut self, aggregation: AggregationPolicy) -> Self {
        self.aggregation = aggregation;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_counts_everything() {
        let config = ProgressConfig::new();
        for kind in KeyResultType::ALL {
            assert!(config.aggregation.includes(kind));
        }
    }

    #[test]
    fn exclude_thresholds_skips_stay_variants() {
        let policy = AggregationPolicy::ExcludeThresholds;
        assert!(!policy.includes(KeyResultType::StayAbove));
        assert!(!policy.includes(KeyResultType::StayBelow));
        assert!(policy.includes(KeyResultType::IncreaseTo));
        assert!(policy.includes(KeyResultType::DecreaseTo));
        assert!(policy.includes(KeyResultType::AchievedOrNot));
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let config: ProgressConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ProgressConfig::default());

        let config: ProgressConfig =
            serde_json::from_str(r#"{"aggregation":"exclude_thresholds"}"#).unwrap();
        assert_eq!(config.aggregation, AggregationPolicy::ExcludeThresholds);
    }
}
