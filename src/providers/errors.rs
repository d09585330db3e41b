// ABOUTME: Structured error types for remote activity provider operations
// ABOUTME: Classifies provider failures into the user-facing fetch error categories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::messages;
use thiserror::Error;

/// Errors surfaced by an [`ActivityProvider`](super::core::ActivityProvider)
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No usable client for this provider
    #[error("Provider {provider} is not available")]
    Unavailable {
        /// Provider name
        provider: String,
    },

    /// Credentials rejected or session missing
    #[error("Authentication failed for {provider}: {reason}")]
    AuthenticationFailed {
        /// Provider name
        provider: String,
        /// What the remote side said
        reason: String,
    },

    /// Transport-level failure (DNS, connect, timeout)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Remote API answered with a non-success status
    #[error("{provider} API error ({status_code}): {message}")]
    ApiError {
        /// Provider name
        provider: String,
        /// HTTP status
        status_code: u16,
        /// Response detail
        message: String,
    },

    /// Response body could not be decoded
    #[error("Failed to parse {provider} response: {message}")]
    ParseError {
        /// Provider name
        provider: String,
        /// Decoder detail
        message: String,
    },

    /// Local misconfiguration (bad URL, poisoned lock, missing fixture)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl ProviderError {
    /// Map a reqwest failure: decode errors are parse errors, everything else is network
    #[must_use]
    pub fn from_transport(provider: &str, error: &reqwest::Error) -> Self {
        if error.is_decode() {
            Self::ParseError {
                provider: provider.to_owned(),
                message: error.to_string(),
            }
        } else {
            Self::NetworkError(format!("{provider} connection failed: {error}"))
        }
    }
}

/// User-facing failure categories of a fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// Provider capability missing
    Unavailable,
    /// Credentials rejected
    InvalidCredentials,
    /// Remote service unreachable
    Connectivity,
    /// Anything else, with the original detail
    Generic(String),
}

impl FetchFailure {
    /// Message placed in the `FetchResult` envelope
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Unavailable => messages::CLIENT_UNAVAILABLE.to_owned(),
            Self::InvalidCredentials => messages::INVALID_CREDENTIALS.to_owned(),
            Self::Connectivity => messages::CONNECTIVITY.to_owned(),
            Self::Generic(detail) => format!("{}{detail}", messages::FETCH_ERROR_PREFIX),
        }
    }
}

/// Classify a raw error message by substring
///
/// `"401"` (case-sensitive) or `"authentication"` means bad credentials,
/// `"network"` or `"connection"` means connectivity; the auth check wins.
#[must_use]
pub fn classify_message(message: &str) -> FetchFailure {
    let lowered = message.to_lowercase();
    if message.contains("401") || lowered.contains("authentication") {
        FetchFailure::InvalidCredentials
    } else if lowered.contains("network") || lowered.contains("connection") {
        FetchFailure::Connectivity
    } else {
        FetchFailure::Generic(message.to_owned())
    }
}

/// Classify a provider error, trusting the variant before sniffing the message
#[must_use]
pub fn classify_failure(error: &ProviderError) -> FetchFailure {
    match error {
        ProviderError::Unavailable { .. } => FetchFailure::Unavailable,
        ProviderError::AuthenticationFailed { .. } => FetchFailure::InvalidCredentials,
        ProviderError::NetworkError(_) => FetchFailure::Connectivity,
        ProviderError::ApiError { .. }
        | ProviderError::ParseError { .. }
        | ProviderError::ConfigurationError(_) => classify_message(&error.to_string()),
    }
}
