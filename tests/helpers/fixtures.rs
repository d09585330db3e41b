// ABOUTME: Raw Garmin activity fixtures built from the camelCase wire shape
// ABOUTME: Keeps tests close to what the activity-search endpoint actually returns

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use garmin_activity_fetcher::models::RawActivity;
use serde_json::{json, Value};

/// Deserialize a raw activity from its JSON wire form
pub fn raw(value: Value) -> RawActivity {
    serde_json::from_value(value).expect("fixture must deserialize")
}

/// Minimal activity with a type key, display name, and name
pub fn typed(type_key: &str, display_name: &str, name: &str) -> RawActivity {
    raw(json!({
        "activityType": { "typeKey": type_key, "typeDisplayName": display_name },
        "activityName": name,
    }))
}

/// One-hour relevant walk starting at `start`, with coordinates
pub fn walk_at(id: u64, start: &str) -> RawActivity {
    raw(json!({
        "activityId": id,
        "activityName": "Morning Walk",
        "activityType": { "typeKey": "walking", "typeDisplayName": "Walking" },
        "distance": 5000.0,
        "duration": 3600.0,
        "elevationGain": 120.4,
        "startTimeLocal": start,
        "startLatitude": 42.8131,
        "startLongitude": -1.6458,
        "endLatitude": 42.8169,
        "endLongitude": -1.6432,
        "averageHR": 118,
        "calories": 310,
    }))
}

/// Pool swim that the relevance filter drops
pub fn pool_swim_at(id: u64, start: &str) -> RawActivity {
    raw(json!({
        "activityId": id,
        "activityName": "Pool Swim",
        "activityType": { "typeKey": "lap_swimming", "typeDisplayName": "Pool Swimming" },
        "distance": 1500.0,
        "duration": 2400.0,
        "startTimeLocal": start,
    }))
}
