// ABOUTME: Core data models for raw Garmin activities and the normalized fetch result
// ABOUTME: Defines RawActivity, ProcessedActivity, heart rate shaping, and the FetchResult envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! `RawActivity` mirrors the activity-search payload of Garmin Connect but
//! tolerates anything: every field is optional and a field of the wrong JSON
//! type is read as absent. `ProcessedActivity` and `FetchResult` are the
//! canonical output, serialized with the camelCase field names the journaling
//! application consumes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// Activity type descriptor as sent by Garmin (`activityType` object)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityTypeDescriptor {
    /// Machine key, e.g. `trail_running`
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub type_key: Option<String>,
    /// Display name, e.g. `Trail Running`
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub type_display_name: Option<String>,
}

/// Activity record as returned by the remote fitness service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawActivity {
    /// Identifier; numeric ids are stringified on read
    #[serde(
        default,
        deserialize_with = "lenient::identifier",
        skip_serializing_if = "Option::is_none"
    )]
    pub activity_id: Option<String>,
    /// User-facing activity name
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub activity_name: Option<String>,
    /// Type descriptor
    #[serde(
        default,
        deserialize_with = "lenient::descriptor",
        skip_serializing_if = "Option::is_none"
    )]
    pub activity_type: Option<ActivityTypeDescriptor>,
    /// Distance in meters
    #[serde(
        default,
        deserialize_with = "lenient::float",
        skip_serializing_if = "Option::is_none"
    )]
    pub distance: Option<f64>,
    /// Duration in seconds
    #[serde(
        default,
        deserialize_with = "lenient::float",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<f64>,
    /// Elevation gain in meters
    #[serde(
        default,
        deserialize_with = "lenient::float",
        skip_serializing_if = "Option::is_none"
    )]
    pub elevation_gain: Option<f64>,
    /// Local start timestamp, e.g. `2024-06-01 07:00:00`
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time_local: Option<String>,
    /// Start latitude
    #[serde(
        default,
        deserialize_with = "lenient::float",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_latitude: Option<f64>,
    /// Start longitude
    #[serde(
        default,
        deserialize_with = "lenient::float",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_longitude: Option<f64>,
    /// End latitude
    #[serde(
        default,
        deserialize_with = "lenient::float",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_latitude: Option<f64>,
    /// End longitude
    #[serde(
        default,
        deserialize_with = "lenient::float",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_longitude: Option<f64>,
    /// Average heart rate (bpm)
    #[serde(
        rename = "averageHR",
        default,
        deserialize_with = "lenient::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub average_hr: Option<Number>,
    /// Max heart rate (bpm)
    #[serde(
        rename = "maxHR",
        default,
        deserialize_with = "lenient::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_hr: Option<Number>,
    /// Calories, passed through untouched whatever their JSON type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<Value>,
}

impl RawActivity {
    /// Lowercased type key, empty when absent
    #[must_use]
    pub fn type_key(&self) -> String {
        self.activity_type
            .as_ref()
            .and_then(|t| t.type_key.as_deref())
            .unwrap_or_default()
            .to_lowercase()
    }

    /// Raw type display name, if any
    #[must_use]
    pub fn type_display_name(&self) -> Option<&str> {
        self.activity_type
            .as_ref()
            .and_then(|t| t.type_display_name.as_deref())
    }

    /// Lowercased activity name, empty when absent
    #[must_use]
    pub fn name_lowercase(&self) -> String {
        self.activity_name
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
    }
}

/// Heart rate summary; `max` falls back to `average`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRateData {
    /// Average heart rate
    pub average: Number,
    /// Max heart rate
    pub max: Number,
}

/// Canonical normalized activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedActivity {
    /// Identifier
    pub activity_id: String,
    /// Activity name
    pub name: String,
    /// Display type label
    pub activity_type: String,
    /// `YYYY-MM-DD`, or empty
    pub date: String,
    /// Geocoded start place
    pub start_location: String,
    /// Geocoded end place
    pub end_location: String,
    /// Distance in km, two decimals
    pub distance_km: f64,
    /// Elevation gain in whole meters
    pub elevation_gain_m: i64,
    /// Duration in whole minutes
    pub duration_minutes: i64,
    /// Average speed in km/h, two decimals
    pub average_speed_kmh: f64,
    /// ISO-8601 start, or the raw string when unparseable
    pub start_time: String,
    /// ISO-8601 end, or the raw string when unparseable
    pub end_time: String,
    /// Calories passthrough
    pub calories: Option<Value>,
    /// Heart rate summary
    pub heart_rate_data: Option<HeartRateData>,
}

/// Inclusive window of requested calendar days
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day, `YYYY-MM-DD`
    pub start: String,
    /// Last day, `YYYY-MM-DD`
    pub end: String,
}

/// Response envelope for one fetch invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FetchResultWire", into = "FetchResultWire")]
pub enum FetchResult {
    /// Fetch completed
    Success {
        /// Relevant activities, most recent first
        activities: Vec<ProcessedActivity>,
        /// Requested window
        date_range: DateRange,
    },
    /// Fetch failed; `error` is user-facing
    Failure {
        /// Error message
        error: String,
    },
}

impl FetchResult {
    /// Build a success envelope
    #[must_use]
    pub fn success(activities: Vec<ProcessedActivity>, date_range: DateRange) -> Self {
        Self::Success {
            activities,
            date_range,
        }
    }

    /// Build a failure envelope
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    /// Whether the fetch succeeded
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Activities of a successful fetch, empty on failure
    #[must_use]
    pub fn activities(&self) -> &[ProcessedActivity] {
        match self {
            Self::Success { activities, .. } => activities,
            Self::Failure { .. } => &[],
        }
    }

    /// Date range of a successful fetch
    #[must_use]
    pub const fn date_range(&self) -> Option<&DateRange> {
        match self {
            Self::Success { date_range, .. } => Some(date_range),
            Self::Failure { .. } => None,
        }
    }

    /// Error message of a failed fetch
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }
}

/// Flat wire shape with the `success` discriminator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FetchResultWire {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    activities: Option<Vec<ProcessedActivity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date_range: Option<DateRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<FetchResult> for FetchResultWire {
    fn from(result: FetchResult) -> Self {
        match result {
            FetchResult::Success {
                activities,
                date_range,
            } => Self {
                success: true,
                activities: Some(activities),
                date_range: Some(date_range),
                error: None,
            },
            FetchResult::Failure { error } => Self {
                success: false,
                activities: None,
                date_range: None,
                error: Some(error),
            },
        }
    }
}

impl TryFrom<FetchResultWire> for FetchResult {
    type Error = String;

    fn try_from(wire: FetchResultWire) -> Result<Self, Self::Error> {
        if wire.success {
            let date_range = wire
                .date_range
                .ok_or_else(|| "successful result is missing dateRange".to_owned())?;
            Ok(Self::success(wire.activities.unwrap_or_default(), date_range))
        } else {
            Ok(Self::failure(wire.error.unwrap_or_default()))
        }
    }
}

/// Deserializers that read a mistyped field as absent instead of failing
mod lenient {
    use super::{ActivityTypeDescriptor, Deserialize, Deserializer, Number, Value};

    pub fn float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(Value::as_f64))
    }

    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Number>, D::Error> {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Number(n)) => Some(n),
            _ => None,
        })
    }

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(s)) => Some(s),
            _ => None,
        })
    }

    pub fn identifier<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn descriptor<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<ActivityTypeDescriptor>, D::Error> {
        Ok(Option::<Value>::deserialize(deserializer)?
            .filter(Value::is_object)
            .and_then(|v| serde_json::from_value(v).ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_activity_tolerates_mistyped_fields() {
        let raw: RawActivity = serde_json::from_value(json!({
            "activityId": 18_234_567_890_u64,
            "activityName": null,
            "activityType": "running",
            "distance": "5000",
            "duration": 1800.5,
            "averageHR": 141,
            "calories": {"kcal": 300}
        }))
        .unwrap();

        assert_eq!(raw.activity_id.as_deref(), Some("18234567890"));
        assert_eq!(raw.activity_name, None);
        assert_eq!(raw.activity_type, None);
        assert_eq!(raw.distance, None);
        assert_eq!(raw.duration, Some(1800.5));
        assert_eq!(raw.average_hr, Some(Number::from(141)));
        assert_eq!(raw.calories, Some(json!({"kcal": 300})));
    }

    #[test]
    fn test_failure_envelope_wire_shape() {
        let value = serde_json::to_value(FetchResult::failure("boom")).unwrap();
        assert_eq!(value, json!({"success": false, "error": "boom"}));
    }

    #[test]
    fn test_success_envelope_wire_shape() {
        let result = FetchResult::success(
            Vec::new(),
            DateRange {
                start: "2024-05-02".to_owned(),
                end: "2024-06-01".to_owned(),
            },
        );
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "activities": [],
                "dateRange": {"start": "2024-05-02", "end": "2024-06-01"}
            })
        );
        let back: FetchResult = serde_json::from_value(value).unwrap();
        assert_eq!(back, result);
    }
}
