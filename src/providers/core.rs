// ABOUTME: Core provider trait and credential types for remote activity services
// ABOUTME: Models the remote client as an injected capability rather than a global flag
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Provider Contract
//!
//! The orchestrator talks to the remote activity service through
//! [`ActivityProvider`] only. Concrete providers:
//!
//! - `GarminConnectProvider`: real Garmin Connect session
//! - `SyntheticProvider`: pre-loaded records for tests and offline runs
//! - `UnavailableProvider`: reports the capability as missing
//!
//! Date arguments are `YYYY-MM-DD` strings, as the remote service expects.

use super::errors::ProviderError;
use crate::models::RawActivity;
use async_trait::async_trait;
use std::fmt;

/// Username/password pair for the remote service
#[derive(Clone, PartialEq, Eq)]
pub struct GarminCredentials {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

impl GarminCredentials {
    /// Create credentials
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for GarminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GarminCredentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Remote activity service client
#[async_trait]
pub trait ActivityProvider: Send + Sync {
    /// Provider identifier for logs
    fn name(&self) -> &'static str;

    /// Whether the client can be used at all; checked before any network action
    fn is_available(&self) -> bool {
        true
    }

    /// Authenticate with the remote service
    async fn login(&self, credentials: &GarminCredentials) -> Result<(), ProviderError>;

    /// Raw activities whose start falls within `[start_date, end_date]`
    async fn get_activities_by_date(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<RawActivity>, ProviderError>;
}
