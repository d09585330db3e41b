// ABOUTME: Remote activity service integrations behind a single provider trait
// ABOUTME: Garmin Connect client plus in-memory and unavailable stand-ins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Provider trait and credential types
pub mod core;

/// Typed provider errors and fetch-failure classification
pub mod errors;

/// Garmin Connect client
pub mod garmin_provider;

/// Provider selection from configuration
pub mod registry;

/// In-memory provider backed by pre-loaded raw activities
pub mod synthetic_provider;

/// Stand-in reporting that no client is available
pub mod unavailable_provider;

pub use self::core::{ActivityProvider, GarminCredentials};
pub use errors::{classify_failure, classify_message, FetchFailure, ProviderError};
