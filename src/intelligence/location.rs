// ABOUTME: Reverse geocoding of activity start/end coordinates into place names
// ABOUTME: Every lookup failure degrades to the "Unknown Location" fallback and is only logged
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::GeocodingServiceConfig;
use crate::constants::locations::UNKNOWN_LOCATION;
use crate::errors::{AppError, AppResult};
use crate::utils::http_client::create_client_with_timeout;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

/// Upper bound on a single lookup, whatever the configuration says
pub const MAX_GEOCODING_TIMEOUT_SECS: u64 = 10;

/// Capability: coordinates in, place name (or fallback) out
///
/// Implementations must never fail; anything that goes wrong becomes
/// [`UNKNOWN_LOCATION`].
#[async_trait]
pub trait LocationResolver: Send + Sync {
    /// Resolve a coordinate pair to a place name
    async fn resolve_location(&self, latitude: f64, longitude: f64) -> String;
}

/// Resolver used when geocoding is switched off
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledLocationResolver;

#[async_trait]
impl LocationResolver for DisabledLocationResolver {
    async fn resolve_location(&self, latitude: f64, longitude: f64) -> String {
        debug!(lat = %latitude, lon = %longitude, "Geocoding disabled, using fallback");
        UNKNOWN_LOCATION.to_owned()
    }
}

/// Subset of the BigDataCloud reverse-geocode payload we read
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReverseGeocodeResponse {
    locality: Option<String>,
    city: Option<String>,
    principal_subdivision: Option<String>,
}

impl ReverseGeocodeResponse {
    /// Locality, then city, then principal subdivision; blanks are skipped
    fn place_name(self) -> Option<String> {
        [self.locality, self.city, self.principal_subdivision]
            .into_iter()
            .flatten()
            .find(|name| !name.is_empty())
    }
}

/// Reverse geocoder backed by the BigDataCloud client endpoint
#[derive(Debug, Clone)]
pub struct BigDataCloudGeocoder {
    client: Client,
    base_url: String,
    language: String,
    timeout: Duration,
}

impl BigDataCloudGeocoder {
    /// Creates a geocoder from configuration; the timeout is capped at
    /// [`MAX_GEOCODING_TIMEOUT_SECS`]
    #[must_use]
    pub fn with_config(config: &GeocodingServiceConfig) -> Self {
        let timeout_secs = config.timeout_secs.min(MAX_GEOCODING_TIMEOUT_SECS);
        let client = create_client_with_timeout(timeout_secs).unwrap_or_else(|e| {
            warn!(
                "Failed to create HTTP client for geocoding: {}, using default",
                e
            );
            Client::new()
        });

        Self {
            client,
            base_url: config.base_url.clone(),
            language: config.language.clone(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    fn lookup_url(&self, latitude: f64, longitude: f64) -> AppResult<Url> {
        Url::parse_with_params(
            &self.base_url,
            [
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("localityLanguage", self.language.clone()),
            ],
        )
        .map_err(|e| AppError::invalid_config(format!("Invalid geocoding URL: {e}")))
    }

    #[instrument(
        skip(self),
        fields(
            service = "bigdatacloud",
            api_call = "reverse_geocode",
            lat = %latitude,
            lon = %longitude,
        )
    )]
    async fn fetch_from_api(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<ReverseGeocodeResponse> {
        let url = self.lookup_url(latitude, longitude)?;

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                AppError::external_service(
                    "BigDataCloud",
                    format!("Failed to send reverse geocoding request: {e}"),
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::external_service(
                "BigDataCloud",
                format!("Reverse geocoding API returned status: {status}"),
            ));
        }

        response.json().await.map_err(|e| {
            AppError::external_service(
                "BigDataCloud",
                format!("Failed to parse reverse geocoding response: {e}"),
            )
        })
    }
}

#[async_trait]
impl LocationResolver for BigDataCloudGeocoder {
    async fn resolve_location(&self, latitude: f64, longitude: f64) -> String {
        match self.fetch_from_api(latitude, longitude).await {
            Ok(response) => response.place_name().unwrap_or_else(|| {
                debug!("Reverse geocoding returned no place fields");
                UNKNOWN_LOCATION.to_owned()
            }),
            Err(e) => {
                warn!(error = %e, "Reverse geocoding error");
                UNKNOWN_LOCATION.to_owned()
            }
        }
    }
}

/// Build the resolver selected by configuration
#[must_use]
pub fn resolver_from_config(config: &GeocodingServiceConfig) -> Box<dyn LocationResolver> {
    if config.enabled {
        Box::new(BigDataCloudGeocoder::with_config(config))
    } else {
        Box::new(DisabledLocationResolver)
    }
}
