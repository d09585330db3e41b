// ABOUTME: Selects the activity provider for a run from configuration and CLI inputs
// ABOUTME: Falls back to the unavailable stub when the Garmin client is disabled or cannot be built
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::core::ActivityProvider;
use super::errors::ProviderError;
use super::garmin_provider::GarminConnectProvider;
use super::synthetic_provider::SyntheticProvider;
use super::unavailable_provider::UnavailableProvider;
use crate::config::FetcherConfig;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Build the provider for this run
///
/// A fixture file wins over the network client. Otherwise the Garmin client
/// is used when enabled; a disabled or unbuildable client yields
/// [`UnavailableProvider`], which the fetch service reports as a failure.
///
/// # Errors
///
/// Returns an error only when a fixture file is given and cannot be loaded
pub fn create_provider(
    config: &FetcherConfig,
    activities_file: Option<&Path>,
) -> Result<Arc<dyn ActivityProvider>, ProviderError> {
    if let Some(path) = activities_file {
        info!(path = %path.display(), "Using activities file instead of Garmin Connect");
        return Ok(Arc::new(SyntheticProvider::from_json_file(path)?));
    }

    if !config.garmin.enabled {
        info!("Garmin Connect client disabled by configuration");
        return Ok(Arc::new(UnavailableProvider));
    }

    match GarminConnectProvider::new(config.garmin.clone()) {
        Ok(provider) => Ok(Arc::new(provider)),
        Err(e) => {
            warn!(error = %e, "Failed to create Garmin Connect client");
            Ok(Arc::new(UnavailableProvider))
        }
    }
}
