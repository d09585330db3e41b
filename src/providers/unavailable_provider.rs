// ABOUTME: Provider stand-in used when no Garmin client can be constructed
// ABOUTME: Reports itself unavailable and refuses every operation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::core::{ActivityProvider, GarminCredentials};
use super::errors::ProviderError;
use crate::constants::providers::UNAVAILABLE;
use crate::models::RawActivity;
use async_trait::async_trait;

/// Provider for a disabled or unbuildable Garmin client
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableProvider;

impl UnavailableProvider {
    fn refuse() -> ProviderError {
        ProviderError::Unavailable {
            provider: UNAVAILABLE.to_owned(),
        }
    }
}

#[async_trait]
impl ActivityProvider for UnavailableProvider {
    fn name(&self) -> &'static str {
        UNAVAILABLE
    }

    fn is_available(&self) -> bool {
        false
    }

    async fn login(&self, _credentials: &GarminCredentials) -> Result<(), ProviderError> {
        Err(Self::refuse())
    }

    async fn get_activities_by_date(
        &self,
        _start_date: &str,
        _end_date: &str,
    ) -> Result<Vec<RawActivity>, ProviderError> {
        Err(Self::refuse())
    }
}
