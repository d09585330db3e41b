// ABOUTME: Configuration management module for the activity fetcher
// ABOUTME: Re-exports the environment-driven configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment configuration for the Garmin client and geocoding service
pub mod environment;

pub use environment::{FetcherConfig, GarminApiConfig, GeocodingServiceConfig};
