// ABOUTME: Main library entry point for the Garmin activity fetcher
// ABOUTME: Classifies, normalizes, and geocodes recent activities into a single JSON envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Garmin Activity Fetcher
//!
//! Retrieves a user's recent activities from Garmin Connect, keeps the
//! cardio/outdoor subset, and turns each raw record into a normalized
//! summary suitable for a journaling application.
//!
//! ## Architecture
//!
//! - **Providers**: remote activity service clients behind the `ActivityProvider` trait
//! - **Intelligence**: classification, normalization, and reverse geocoding
//! - **Services**: the fetch orchestrator that assembles the `FetchResult` envelope
//! - **Config / Logging**: environment-driven configuration and tracing setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use garmin_activity_fetcher::intelligence::location::DisabledLocationResolver;
//! use garmin_activity_fetcher::providers::core::GarminCredentials;
//! use garmin_activity_fetcher::providers::synthetic_provider::SyntheticProvider;
//! use garmin_activity_fetcher::services::activity_fetch::ActivityFetchService;
//!
//! # async fn example() {
//! let service = ActivityFetchService::new(
//!     Arc::new(SyntheticProvider::new()),
//!     Arc::new(DisabledLocationResolver),
//! );
//! let credentials = GarminCredentials::new("athlete@example.com", "secret");
//! let result = service.fetch_recent(&credentials, 30).await;
//! println!("{}", serde_json::to_string_pretty(&result).unwrap_or_default());
//! # }
//! ```

/// Environment-driven configuration
pub mod config;

/// Application constants: keyword tables, fallback strings, and user-facing messages
pub mod constants;

/// Process-level error types
pub mod errors;

/// Activity classification, normalization, and location enrichment
pub mod intelligence;

/// Structured logging setup
pub mod logging;

/// Raw and processed activity data models
pub mod models;

/// Remote activity service clients
pub mod providers;

/// Fetch orchestration
pub mod services;

/// Shared utilities
pub mod utils;
