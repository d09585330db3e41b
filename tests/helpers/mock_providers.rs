// ABOUTME: Scripted activity providers and deterministic location resolvers for tests
// ABOUTME: Lets tests inject provider failures and count geocoding calls without network access

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use async_trait::async_trait;
use garmin_activity_fetcher::intelligence::location::LocationResolver;
use garmin_activity_fetcher::models::RawActivity;
use garmin_activity_fetcher::providers::{ActivityProvider, GarminCredentials, ProviderError};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Which provider call should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Login,
    Fetch,
}

/// Provider whose login or fetch fails with a scripted error
pub struct FailingProvider {
    stage: FailAt,
    make_error: fn() -> ProviderError,
    pub fetch_calls: AtomicUsize,
}

impl FailingProvider {
    pub fn new(stage: FailAt, make_error: fn() -> ProviderError) -> Self {
        Self {
            stage,
            make_error,
            fetch_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ActivityProvider for FailingProvider {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn login(&self, _credentials: &GarminCredentials) -> Result<(), ProviderError> {
        if self.stage == FailAt::Login {
            return Err((self.make_error)());
        }
        Ok(())
    }

    async fn get_activities_by_date(
        &self,
        _start_date: &str,
        _end_date: &str,
    ) -> Result<Vec<RawActivity>, ProviderError> {
        self.fetch_calls.fetch_add(1, Ordering::Relaxed);
        Err((self.make_error)())
    }
}

/// Pure resolver: the place name is derived from the coordinates
#[derive(Default)]
pub struct CoordinateResolver {
    pub calls: AtomicUsize,
}

impl CoordinateResolver {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl LocationResolver for CoordinateResolver {
    async fn resolve_location(&self, latitude: f64, longitude: f64) -> String {
        self.calls.fetch_add(1, Ordering::Relaxed);
        format!("Place({latitude:.2},{longitude:.2})")
    }
}
