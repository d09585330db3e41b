// ABOUTME: Activity intelligence: classification, normalization, and location enrichment
// ABOUTME: Turns raw provider records into canonical ProcessedActivity summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Display-type labelling and relevance filtering
pub mod activity_classifier;

/// Raw record to `ProcessedActivity` conversion
pub mod activity_normalizer;

/// Reverse geocoding of activity endpoints
pub mod location;

pub use activity_classifier::{display_type, is_relevant};
pub use activity_normalizer::normalize_activity;
pub use location::{BigDataCloudGeocoder, DisabledLocationResolver, LocationResolver};
