// ABOUTME: Converts one raw activity record into the canonical ProcessedActivity schema
// ABOUTME: Handles unit conversion, derived pace, time window reconstruction, and heart rate shaping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Activity Normalizer
//!
//! [`normalize_activity`] is total: a missing, null, zero, or malformed field
//! degrades to an empty/zero/null output value and never aborts the record.
//! Numeric fields follow "truthy" semantics, so a zero distance is treated
//! exactly like an absent one.
//!
//! Rounding is half-to-even, and timestamps are re-emitted in ISO-8601 form
//! (`YYYY-MM-DDTHH:MM:SS[.ffffff][+HH:MM]`).

use super::activity_classifier::display_type;
use super::location::LocationResolver;
use crate::constants::activity_types::UNNAMED_ACTIVITY;
use crate::constants::locations::UNKNOWN;
use crate::constants::units::{METERS_PER_KM, MPS_TO_KMH, SECONDS_PER_MINUTE};
use crate::models::{HeartRateData, ProcessedActivity, RawActivity};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, Timelike};
use serde_json::Number;
use tracing::debug;

/// Normalize one raw activity, geocoding its endpoints through `resolver`
pub async fn normalize_activity(
    activity: &RawActivity,
    resolver: &dyn LocationResolver,
) -> ProcessedActivity {
    let distance = truthy(activity.distance);
    let duration = truthy(activity.duration);
    let raw_start = activity.start_time_local.as_deref().unwrap_or_default();
    let (start_time, end_time) = time_window(raw_start, duration);

    let start_location =
        resolve_endpoint(activity.start_latitude, activity.start_longitude, resolver).await;
    let end_location =
        resolve_endpoint(activity.end_latitude, activity.end_longitude, resolver).await;

    ProcessedActivity {
        activity_id: activity.activity_id.clone().unwrap_or_default(),
        name: activity
            .activity_name
            .clone()
            .unwrap_or_else(|| UNNAMED_ACTIVITY.to_owned()),
        activity_type: display_type(activity),
        date: raw_start.chars().take(10).collect(),
        start_location,
        end_location,
        distance_km: distance.map_or(0.0, |d| round_to(d / METERS_PER_KM, 2)),
        elevation_gain_m: truthy(activity.elevation_gain).map_or(0, round_to_int),
        duration_minutes: duration.map_or(0, |d| round_to_int(d / SECONDS_PER_MINUTE)),
        average_speed_kmh: average_speed_kmh(distance, duration),
        start_time,
        end_time,
        calories: activity.calories.clone(),
        heart_rate_data: heart_rate_data(activity.average_hr.as_ref(), activity.max_hr.as_ref()),
    }
}

/// Keep a value only when it is present, finite, and non-zero
fn truthy(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}

fn number_is_truthy(value: &Number) -> bool {
    value.as_f64().is_some_and(|v| v != 0.0)
}

/// Round half-to-even at `decimals` places
///
/// The tie test runs on the scaled product `value * 10^decimals`, not on the
/// exact binary value. An input stored just below a decimal tie (`0.015` is
/// really `0.01499...`) can scale to an exact tie (`1.5`) and round to even
/// from there, giving `0.02`.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Round half-to-even to a whole number
#[must_use]
pub fn round_to_int(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// km/h from meters and seconds; zero unless both are present
#[must_use]
pub fn average_speed_kmh(distance_meters: Option<f64>, duration_seconds: Option<f64>) -> f64 {
    match (distance_meters, duration_seconds) {
        (Some(distance), Some(duration)) => round_to(distance / duration * MPS_TO_KMH, 2),
        _ => 0.0,
    }
}

fn heart_rate_data(average: Option<&Number>, max: Option<&Number>) -> Option<HeartRateData> {
    let average = average.filter(|n| number_is_truthy(n))?;
    let max = max.filter(|n| number_is_truthy(n)).unwrap_or(average);
    Some(HeartRateData {
        average: average.clone(),
        max: max.clone(),
    })
}

async fn resolve_endpoint(
    latitude: Option<f64>,
    longitude: Option<f64>,
    resolver: &dyn LocationResolver,
) -> String {
    // 0.0 doubles as the "no GPS fix" sentinel, so a real 0/0 point is skipped too
    match (truthy(latitude), truthy(longitude)) {
        (Some(lat), Some(lng)) => resolver.resolve_location(lat, lng).await,
        _ => UNKNOWN.to_owned(),
    }
}

/// Parsed start timestamp, with or without a UTC offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// No offset in the source string
    Naive(NaiveDateTime),
    /// Explicit offset (a trailing `Z` reads as `+00:00`)
    Offset(DateTime<FixedOffset>),
}

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

impl Timestamp {
    /// Parse an ISO-8601-like timestamp; `T` or a space separates date and time
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().replace('Z', "+00:00");

        OFFSET_FORMATS
            .iter()
            .find_map(|format| DateTime::parse_from_str(&normalized, format).ok())
            .map(Self::Offset)
            .or_else(|| {
                NAIVE_FORMATS
                    .iter()
                    .find_map(|format| NaiveDateTime::parse_from_str(&normalized, format).ok())
                    .map(Self::Naive)
            })
            .or_else(|| {
                NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
                    .map(Self::Naive)
            })
    }

    /// Add a (possibly fractional) number of seconds, microsecond precision
    #[must_use]
    pub fn checked_add_seconds(self, seconds: f64) -> Option<Self> {
        let micros = (seconds * 1_000_000.0).round_ties_even();
        if !micros.is_finite() || micros.abs() > i64::MAX as f64 {
            return None;
        }
        let delta = Duration::microseconds(micros as i64);
        match self {
            Self::Naive(dt) => dt.checked_add_signed(delta).map(Self::Naive),
            Self::Offset(dt) => dt.checked_add_signed(delta).map(Self::Offset),
        }
    }

    /// ISO-8601 rendering; microseconds only when non-zero
    #[must_use]
    pub fn to_iso_string(&self) -> String {
        let (naive, offset) = match self {
            Self::Naive(dt) => (*dt, None),
            Self::Offset(dt) => (dt.naive_local(), Some(dt.format("%:z").to_string())),
        };
        let mut rendered = naive.format("%Y-%m-%dT%H:%M:%S").to_string();
        let micros = naive.nanosecond() / 1_000;
        if micros != 0 {
            rendered.push_str(&format!(".{micros:06}"));
        }
        if let Some(offset) = offset {
            rendered.push_str(&offset);
        }
        rendered
    }
}

/// `(startTime, endTime)`: normalized when the start parses and a duration
/// exists, otherwise both are the raw start string
#[must_use]
pub fn time_window(raw_start: &str, duration_seconds: Option<f64>) -> (String, String) {
    let fallback = || (raw_start.to_owned(), raw_start.to_owned());
    let Some(duration) = duration_seconds.filter(|_| !raw_start.is_empty()) else {
        return fallback();
    };

    let Some(start) = Timestamp::parse(raw_start) else {
        debug!(raw_start, "Unparseable start timestamp, keeping raw value");
        return fallback();
    };

    start.checked_add_seconds(duration).map_or_else(fallback, |end| {
        (start.to_iso_string(), end.to_iso_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding_is_half_to_even() {
        assert_eq!(round_to_int(2.5), 2);
        assert_eq!(round_to_int(3.5), 4);
        assert_eq!(round_to_int(120.4), 120);
        assert!((round_to(5.0, 2) - 5.0).abs() < f64::EPSILON);
        assert!((round_to(12.3456, 2) - 12.35).abs() < 1e-9);
    }

    #[test]
    fn test_rounding_ties_on_scaled_value() {
        assert!((round_to(0.015, 2) - 0.02).abs() < 1e-12);
        assert!((round_to(0.045, 2) - 0.04).abs() < 1e-12);
        assert!((round_to(0.125, 2) - 0.12).abs() < 1e-12);
    }

    #[test]
    fn test_space_separated_local_time() {
        let (start, end) = time_window("2024-06-01 07:00:00", Some(3600.0));
        assert_eq!(start, "2024-06-01T07:00:00");
        assert_eq!(end, "2024-06-01T08:00:00");
    }

    #[test]
    fn test_trailing_z_is_utc() {
        let (start, end) = time_window("2024-06-01T23:30:00Z", Some(5400.0));
        assert_eq!(start, "2024-06-01T23:30:00+00:00");
        assert_eq!(end, "2024-06-02T01:00:00+00:00");
    }

    #[test]
    fn test_explicit_offset_preserved() {
        let (start, end) = time_window("2024-06-01T07:00:00+02:00", Some(90.0));
        assert_eq!(start, "2024-06-01T07:00:00+02:00");
        assert_eq!(end, "2024-06-01T07:01:30+02:00");
    }

    #[test]
    fn test_fractional_seconds_and_duration() {
        let (start, end) = time_window("2024-06-01T07:00:00.5", Some(1.25));
        assert_eq!(start, "2024-06-01T07:00:00.500000");
        assert_eq!(end, "2024-06-01T07:00:01.750000");
    }

    #[test]
    fn test_date_only_start() {
        let (start, end) = time_window("2024-06-01", Some(60.0));
        assert_eq!(start, "2024-06-01T00:00:00");
        assert_eq!(end, "2024-06-01T00:01:00");
    }

    #[test]
    fn test_unparseable_or_missing_duration_keeps_raw() {
        assert_eq!(
            time_window("yesterday morning", Some(600.0)),
            ("yesterday morning".to_owned(), "yesterday morning".to_owned())
        );
        assert_eq!(
            time_window("2024-06-01 07:00:00", None),
            (
                "2024-06-01 07:00:00".to_owned(),
                "2024-06-01 07:00:00".to_owned()
            )
        );
        assert_eq!(time_window("", Some(600.0)), (String::new(), String::new()));
    }

    #[test]
    fn test_heart_rate_max_defaults_to_average() {
        let avg = Number::from(132);
        let data = heart_rate_data(Some(&avg), None).unwrap();
        assert_eq!(data.max, avg);

        let zero = Number::from(0);
        assert_eq!(heart_rate_data(Some(&zero), Some(&avg)), None);
        assert_eq!(heart_rate_data(None, Some(&avg)), None);
    }
}
