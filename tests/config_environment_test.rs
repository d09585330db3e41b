// ABOUTME: Tests for environment-driven fetcher and logging configuration
// ABOUTME: Validates defaults, overrides, and rejection of malformed values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use garmin_activity_fetcher::config::environment::{
    DEFAULT_GARMIN_CONNECT_URL, DEFAULT_GARMIN_SSO_URL, DEFAULT_GEOCODING_URL,
};
use garmin_activity_fetcher::config::FetcherConfig;
use garmin_activity_fetcher::logging::{LogFormat, LoggingConfig};
use serial_test::serial;
use std::env;

const FETCHER_VARS: [&str; 9] = [
    "GARMIN_CONNECT_ENABLED",
    "GARMIN_SSO_URL",
    "GARMIN_CONNECT_BASE_URL",
    "GARMIN_ACTIVITY_LIMIT",
    "GARMIN_HTTP_TIMEOUT_SECS",
    "GEOCODING_BASE_URL",
    "GEOCODING_SERVICE_ENABLED",
    "GEOCODING_TIMEOUT_SECS",
    "GEOCODING_LANGUAGE",
];

fn clear_fetcher_env() {
    for key in FETCHER_VARS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_fetcher_env();
    let config = FetcherConfig::from_env().unwrap();

    assert!(config.garmin.enabled);
    assert_eq!(config.garmin.sso_url, DEFAULT_GARMIN_SSO_URL);
    assert_eq!(config.garmin.connect_url, DEFAULT_GARMIN_CONNECT_URL);
    assert_eq!(config.garmin.activity_limit, 1000);
    assert_eq!(config.garmin.timeout_secs, 30);

    assert!(config.geocoding.enabled);
    assert_eq!(config.geocoding.base_url, DEFAULT_GEOCODING_URL);
    assert_eq!(config.geocoding.timeout_secs, 10);
    assert_eq!(config.geocoding.language, "en");
}

#[test]
#[serial]
fn test_overrides_are_applied() {
    clear_fetcher_env();
    env::set_var("GARMIN_CONNECT_ENABLED", "false");
    env::set_var("GARMIN_ACTIVITY_LIMIT", "250");
    env::set_var("GEOCODING_SERVICE_ENABLED", "false");
    env::set_var("GEOCODING_LANGUAGE", "es");
    env::set_var("GEOCODING_BASE_URL", "http://localhost:8089/reverse");

    let config = FetcherConfig::from_env().unwrap();
    clear_fetcher_env();

    assert!(!config.garmin.enabled);
    assert_eq!(config.garmin.activity_limit, 250);
    assert!(!config.geocoding.enabled);
    assert_eq!(config.geocoding.language, "es");
    assert_eq!(config.geocoding.base_url, "http://localhost:8089/reverse");
}

#[test]
#[serial]
fn test_malformed_values_are_rejected() {
    clear_fetcher_env();
    env::set_var("GEOCODING_TIMEOUT_SECS", "soon");
    let error = FetcherConfig::from_env().unwrap_err();
    clear_fetcher_env();
    assert!(error.to_string().contains("GEOCODING_TIMEOUT_SECS"));

    env::set_var("GARMIN_CONNECT_ENABLED", "yes please");
    let error = FetcherConfig::from_env().unwrap_err();
    clear_fetcher_env();
    assert!(error.to_string().contains("GARMIN_CONNECT_ENABLED"));
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    env::set_var("LOG_FORMAT", "json");
    env::set_var("RUST_LOG", "warn");
    let config = LoggingConfig::from_env();
    env::remove_var("LOG_FORMAT");
    env::remove_var("RUST_LOG");

    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.level, "warn");
    assert_eq!(config.verbose().level, "debug");
}
