// ABOUTME: Environment-based configuration for the Garmin client and geocoding service
// ABOUTME: Reads endpoint URLs, timeouts, and feature toggles with sensible defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! Every value has a default, so an empty environment yields a working
//! configuration pointed at the public Garmin Connect and BigDataCloud
//! endpoints.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Default reverse-geocoding endpoint
pub const DEFAULT_GEOCODING_URL: &str = "https://api.bigdatacloud.net/data/reverse-geocode-client";
/// Default Garmin SSO base URL
pub const DEFAULT_GARMIN_SSO_URL: &str = "https://sso.garmin.com/sso";
/// Default Garmin Connect base URL
pub const DEFAULT_GARMIN_CONNECT_URL: &str = "https://connect.garmin.com";

/// Top-level configuration for one fetch invocation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Garmin Connect client settings
    pub garmin: GarminApiConfig,
    /// Reverse geocoding settings
    pub geocoding: GeocodingServiceConfig,
}

/// Garmin Connect client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GarminApiConfig {
    /// When false the registry hands out the unavailable stub
    pub enabled: bool,
    /// SSO base URL (sign-in form lives under `/signin`)
    pub sso_url: String,
    /// Connect base URL (activity search lives under `/activitylist-service`)
    pub connect_url: String,
    /// Max records requested in the single date-bounded search
    pub activity_limit: u32,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GarminApiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sso_url: DEFAULT_GARMIN_SSO_URL.to_owned(),
            connect_url: DEFAULT_GARMIN_CONNECT_URL.to_owned(),
            activity_limit: 1000,
            timeout_secs: 30,
        }
    }
}

/// Reverse geocoding settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingServiceConfig {
    /// Geocoding service base URL
    pub base_url: String,
    /// Enable geocoding service
    pub enabled: bool,
    /// Lookup timeout in seconds
    pub timeout_secs: u64,
    /// `localityLanguage` parameter
    pub language: String,
}

impl Default for GeocodingServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEOCODING_URL.to_owned(),
            enabled: true,
            timeout_secs: 10,
            language: "en".to_owned(),
        }
    }
}

impl FetcherConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a boolean or numeric variable cannot be parsed
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            garmin: GarminApiConfig {
                enabled: env_var_or("GARMIN_CONNECT_ENABLED", "true")
                    .parse()
                    .context("Invalid GARMIN_CONNECT_ENABLED value")?,
                sso_url: env_var_or("GARMIN_SSO_URL", DEFAULT_GARMIN_SSO_URL),
                connect_url: env_var_or("GARMIN_CONNECT_BASE_URL", DEFAULT_GARMIN_CONNECT_URL),
                activity_limit: env_var_or("GARMIN_ACTIVITY_LIMIT", "1000")
                    .parse()
                    .context("Invalid GARMIN_ACTIVITY_LIMIT value")?,
                timeout_secs: env_var_or("GARMIN_HTTP_TIMEOUT_SECS", "30")
                    .parse()
                    .context("Invalid GARMIN_HTTP_TIMEOUT_SECS value")?,
            },
            geocoding: GeocodingServiceConfig {
                base_url: env_var_or("GEOCODING_BASE_URL", DEFAULT_GEOCODING_URL),
                enabled: env_var_or("GEOCODING_SERVICE_ENABLED", "true")
                    .parse()
                    .context("Invalid GEOCODING_SERVICE_ENABLED value")?,
                timeout_secs: env_var_or("GEOCODING_TIMEOUT_SECS", "10")
                    .parse()
                    .context("Invalid GEOCODING_TIMEOUT_SECS value")?,
                language: env_var_or("GEOCODING_LANGUAGE", "en"),
            },
        })
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
