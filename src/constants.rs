// ABOUTME: System-wide constants for activity classification and fetch result messages
// ABOUTME: Contains keyword tables, fallback strings, and environment defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Hardcoded tables and strings shared by the classifier, normalizer, and
//! orchestrator. Anything that can be overridden at runtime lives in
//! [`crate::config`] instead.

/// Service identity used in logs and HTTP user agents
pub mod service_names {
    /// Binary/service name
    pub const GARMIN_FETCH: &str = "garmin-fetch";

    /// User agent sent to the geocoding and Garmin endpoints
    #[must_use]
    pub fn user_agent() -> String {
        format!("{GARMIN_FETCH}/{}", env!("CARGO_PKG_VERSION"))
    }
}

/// Provider identifiers
pub mod providers {
    /// Garmin Connect
    pub const GARMIN: &str = "garmin";
    /// In-memory provider
    pub const SYNTHETIC: &str = "synthetic";
    /// Stub used when the Garmin client is switched off
    pub const UNAVAILABLE: &str = "unavailable";
}

/// Activity classification tables
pub mod activity_types {
    /// Ordered `(type key, display label)` pairs; earlier entries win ties
    pub const DISPLAY_TYPES: &[(&str, &str)] = &[
        ("walking", "Walking"),
        ("hiking", "Hiking"),
        ("running", "Running"),
        ("cycling", "Cycling"),
        ("trekking", "Trekking"),
        ("trail_running", "Trail Running"),
        ("road_biking", "Road Cycling"),
        ("mountain_biking", "Mountain Biking"),
        ("fitness_walking", "Fitness Walking"),
    ];

    /// Keywords that mark an activity as cardio/outdoor relevant
    pub const RELEVANT_KEYWORDS: &[&str] = &[
        "walk",
        "walking",
        "hike",
        "hiking",
        "trekking",
        "trek",
        "run",
        "running",
        "jog",
        "jogging",
        "cycle",
        "cycling",
        "bike",
        "biking",
        "pedestrian",
        "foot",
        "trail",
        "ramble",
        "stroll",
        "fitness",
        "cardio",
        "cardiovascular",
        "aerobic",
        "exercise",
        "workout",
        "elliptical",
        "treadmill",
        "indoor",
        "gym",
        "strength",
        "training",
    ];

    /// Shortest name token considered by the prefix fallback
    pub const MIN_PREFIX_TOKEN_LEN: usize = 3;

    /// Label used when nothing else matches and the raw type has no display name
    pub const OTHER_ACTIVITY: &str = "Other Activity";

    /// Name used when the raw activity has none
    pub const UNNAMED_ACTIVITY: &str = "Unnamed Activity";
}

/// Location fallbacks
pub mod locations {
    /// Endpoint had no usable coordinates
    pub const UNKNOWN: &str = "Unknown";
    /// Lookup was attempted and failed or returned nothing useful
    pub const UNKNOWN_LOCATION: &str = "Unknown Location";
}

/// Unit conversion factors
pub mod units {
    /// Meters per kilometer
    pub const METERS_PER_KM: f64 = 1000.0;
    /// Seconds per minute
    pub const SECONDS_PER_MINUTE: f64 = 60.0;
    /// m/s to km/h
    pub const MPS_TO_KMH: f64 = 3.6;
}

/// Fetch window defaults
pub mod fetch {
    /// Trailing window when the caller does not pass `--days`
    pub const DEFAULT_DAYS: u32 = 30;
    /// Date format used for the remote request and the `dateRange` envelope
    pub const DATE_FORMAT: &str = "%Y-%m-%d";
}

/// User-facing error messages placed in the `FetchResult` envelope
pub mod messages {
    /// Provider capability is missing
    pub const CLIENT_UNAVAILABLE: &str =
        "Garmin Connect client not available. Please enable it with GARMIN_CONNECT_ENABLED=true";
    /// Credentials were rejected
    pub const INVALID_CREDENTIALS: &str =
        "Invalid Garmin Connect credentials. Please check your email and password.";
    /// Remote service could not be reached
    pub const CONNECTIVITY: &str =
        "Unable to connect to Garmin Connect. Please check your internet connection.";
    /// Prefix for the catch-all failure message
    pub const FETCH_ERROR_PREFIX: &str = "Error fetching activities: ";
    /// `days` was zero
    pub const INVALID_DAYS: &str = "Days parameter must be a positive integer";
    /// User interrupted the process
    pub const CANCELLED: &str = "Operation cancelled by user";
    /// Prefix for anything the orchestrator did not capture
    pub const UNEXPECTED_ERROR_PREFIX: &str = "Unexpected error: ";
}
