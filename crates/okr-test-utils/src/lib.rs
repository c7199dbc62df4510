//! Testing utilities for the OKR workspace
//!
//! Shared fixtures for integration tests.

#![allow(missing_docs)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use okr_core::{KeyResult, KeyResultId, Objective, ObjectiveDocument, UserId};
use okr_progress::{KeyResultRecord, KeyResultSnapshot, KeyResultType};

pub fn snapshot(kind: KeyResultType, initial: f64, current: f64, target: f64) -> KeyResultSnapshot {
    KeyResultSnapshot::new(kind, initial, current, target)
}

/// Increase-to key result from 0 to 100 sitting at `percent`
pub fn snapshot_at(percent: f64) -> KeyResultSnapshot {
    snapshot(KeyResultType::IncreaseTo, 0.0, percent, 100.0)
}

pub fn record(kind: &str, initial: f64, current: f64, target: f64) -> KeyResultRecord {
    KeyResultRecord::new(kind, initial, current, target)
}

/// Fixed point in time so history assertions are stable
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap()
}

pub fn days_after_base(days: i64) -> DateTime<Utc> {
    base_time() + Duration::days(days)
}

pub fn create_key_result(title: &str, kind: KeyResultType, initial: f64, target: f64) -> KeyResult {
    KeyResult::new(title, kind, initial, target).unwrap()
}

/// Objective with one key result per type, none checked in yet
pub fn create_mixed_objective() -> (Objective, Vec<KeyResultId>) {
    let mut objective = Objective::new("Launch the mobile app")
        .unwrap()
        .with_description("Q3 company objective");

    let ids = vec![
        objective.add_key_result(create_key_result("App store rating", KeyResultType::IncreaseTo, 3.0, 4.5)),
        objective.add_key_result(create_key_result("Crash rate", KeyResultType::DecreaseTo, 2.0, 0.5)),
        objective.add_key_result(create_key_result("Weekly actives", KeyResultType::StayAbove, 0.0, 1000.0)),
        objective.add_key_result(create_key_result("Support backlog", KeyResultType::StayBelow, 0.0, 50.0)),
        objective.add_key_result(create_key_result("Store listing live", KeyResultType::AchievedOrNot, 0.0, 1.0)),
    ];

    (objective, ids)
}

pub fn setup_test_author() -> UserId {
    UserId::new()
}

pub fn sample_document_json() -> serde_json::Value {
    serde_json::json!({
        "objective": {
            "id": "9b2e4f4a-1c7d-4e0b-8a63-5d2f7c1e9a01",
            "title": "Improve onboarding",
            "description": "Fewer drop-offs in the first week"
        },
        "key_results": [
            {
                "id": "c4a1e2b3-5d6f-4a7b-8c9d-0e1f2a3b4c5d",
                "title": "Activation rate",
                "unit": "%",
                "keyResultType": "should_increase_to",
                "initialValue": 20,
                "currentValue": 35,
                "targetValue": 50
            },
            {
                "id": "d5b2f3c4-6e7a-4b8c-9d0e-1f2a3b4c5d6e",
                "title": "Time to first value",
                "unit": "minutes",
                "keyResultType": "should_decrease_to",
                "initialValue": 30,
                "currentValue": 12,
                "targetValue": 10
            },
            {
                "id": "e6c3a4d5-7f8b-4c9d-8e1f-2a3b4c5d6e7f",
                "title": "Onboarding NPS",
                "keyResultType": "should_stay_above",
                "initialValue": 40,
                "currentValue": 38,
                "targetValue": 40
            }
        ]
    })
}

pub fn sample_document() -> ObjectiveDocument {
    serde_json::from_value(sample_document_json()).unwrap()
}
