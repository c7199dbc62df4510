//! Key result types
//!
//! The closed set of ways a key result can measure success. Persistence
//! stores these as snake_case strings; everything past the parsing boundary
//! works with [`KeyResultType`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a key result's numeric state maps to completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyResultType {
    /// Move the value up from the initial value to the target
    #[serde(rename = "should_increase_to")]
    IncreaseTo,
    /// Move the value down from the initial value to the target
    #[serde(rename = "should_decrease_to")]
    DecreaseTo,
    /// Keep the value at or above the target
    #[serde(rename = "should_stay_above")]
    StayAbove,
    /// Keep the value at or below the target
    #[serde(rename = "should_stay_below")]
    StayBelow,
    /// Binary outcome, done once the value reaches the target
    #[serde(rename = "achieved_or_not")]
    AchievedOrNot,
}

impl KeyResultType {
    /// All variants, in declaration order
    pub const ALL: [KeyResultType; 5] = [
        KeyResultType::IncreaseTo,
        KeyResultType::DecreaseTo,
        KeyResultType::StayAbove,
        KeyResultType::StayBelow,
        KeyResultType::AchievedOrNot,
    ];

    /// Wire name used by persistence
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyResultType::IncreaseTo => "should_increase_to",
            KeyResultType::DecreaseTo => "should_decrease_to",
            KeyResultType::StayAbove => "should_stay_above",
            KeyResultType::StayBelow => "should_stay_below",
            KeyResultType::AchievedOrNot => "achieved_or_not",
        }
    }

    /// Progress interpolates linearly between initial and target
    #[inline]
    #[must_use]
    pub fn is_linear(&self) -> bool {
        matches!(self, KeyResultType::IncreaseTo | KeyResultType::DecreaseTo)
    }

    /// Progress is a standing condition that holds or doesn't
    #[inline]
    #[must_use]
    pub fn is_threshold(&self) -> bool {
        matches!(self, KeyResultType::StayAbove | KeyResultType::StayBelow)
    }
}

impl fmt::Display for KeyResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyResultType {
    type Err = ParseKeyResultTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseKeyResultTypeError {
                value: s.to_string(),
            })
    }
}

/// Unrecognized key result type name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key result type: {value:?}")]
pub struct ParseKeyResultTypeError {
    /// The rejected name
    pub value: String,
}
