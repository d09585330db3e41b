// ABOUTME: HTTP client construction with bounded timeouts for outbound lookups
// ABOUTME: Provides builders for the geocoding client and the cookie-backed Garmin session client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::service_names::user_agent;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Connection timeout shared by every client
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Create a new HTTP client with custom timeout settings
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized
pub fn create_client_with_timeout(timeout_secs: u64) -> reqwest::Result<Client> {
    create_custom_client(|builder| builder.timeout(Duration::from_secs(timeout_secs)))
}

/// Create a new HTTP client with custom configuration on top of the shared defaults
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized
pub fn create_custom_client<F>(config_fn: F) -> reqwest::Result<Client>
where
    F: FnOnce(ClientBuilder) -> ClientBuilder,
{
    let builder = ClientBuilder::new()
        .user_agent(user_agent())
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS));
    config_fn(builder).build()
}

/// Create a client that keeps cookies between requests (Garmin SSO session)
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized
pub fn session_client(timeout_secs: u64) -> reqwest::Result<Client> {
    create_custom_client(|builder| {
        builder
            .timeout(Duration::from_secs(timeout_secs))
            .cookie_store(true)
    })
}
