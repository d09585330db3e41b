// ABOUTME: Fetch orchestrator computing the date window and assembling the FetchResult envelope
// ABOUTME: Filters relevant activities, normalizes them in order, and classifies provider failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::fetch::DATE_FORMAT;
use crate::constants::messages;
use crate::intelligence::activity_classifier::is_relevant;
use crate::intelligence::activity_normalizer::normalize_activity;
use crate::intelligence::location::LocationResolver;
use crate::models::{DateRange, FetchResult, ProcessedActivity, RawActivity};
use crate::providers::{classify_failure, ActivityProvider, GarminCredentials, ProviderError};
use chrono::{DateTime, Duration, Local, NaiveDateTime};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Orchestrates one "recent activities" fetch
///
/// Every failure is captured in the returned [`FetchResult`]; nothing here
/// returns an `Err` to the caller.
#[derive(Clone)]
pub struct ActivityFetchService {
    provider: Arc<dyn ActivityProvider>,
    resolver: Arc<dyn LocationResolver>,
}

impl ActivityFetchService {
    /// Create a service over an injected provider and location resolver
    #[must_use]
    pub fn new(provider: Arc<dyn ActivityProvider>, resolver: Arc<dyn LocationResolver>) -> Self {
        Self { provider, resolver }
    }

    /// Fetch activities from the last `days` days, ending now
    pub async fn fetch_recent(&self, credentials: &GarminCredentials, days: u32) -> FetchResult {
        self.fetch_recent_at(credentials, days, Local::now()).await
    }

    /// Fetch activities from the `days` days ending at `now`
    #[instrument(skip(self, credentials, now), fields(provider = self.provider.name()))]
    pub async fn fetch_recent_at(
        &self,
        credentials: &GarminCredentials,
        days: u32,
        now: DateTime<Local>,
    ) -> FetchResult {
        if !self.provider.is_available() {
            warn!("Activity provider unavailable");
            return FetchResult::failure(messages::CLIENT_UNAVAILABLE);
        }
        if days == 0 {
            return FetchResult::failure(messages::INVALID_DAYS);
        }

        let Some(date_range) = date_window(now.naive_local(), days) else {
            return FetchResult::failure(format!(
                "{}date window of {days} days is out of range",
                messages::FETCH_ERROR_PREFIX
            ));
        };

        match self.collect(credentials, &date_range).await {
            Ok(activities) => FetchResult::success(activities, date_range),
            Err(e) => {
                let failure = classify_failure(&e);
                warn!(error = %e, "Activity fetch failed");
                FetchResult::failure(failure.message())
            }
        }
    }

    async fn collect(
        &self,
        credentials: &GarminCredentials,
        date_range: &DateRange,
    ) -> Result<Vec<ProcessedActivity>, ProviderError> {
        info!("Connecting to Garmin Connect...");
        self.provider.login(credentials).await?;

        info!(
            "Fetching activities from {} to {}",
            date_range.start, date_range.end
        );
        let raw = self
            .provider
            .get_activities_by_date(&date_range.start, &date_range.end)
            .await?;
        info!("Found {} activities", raw.len());

        Ok(self.process(&raw).await)
    }

    /// Relevance filter, sequential normalization, most recent first
    async fn process(&self, raw: &[RawActivity]) -> Vec<ProcessedActivity> {
        let mut processed = Vec::with_capacity(raw.len());
        for activity in raw.iter().filter(|a| is_relevant(a)) {
            processed.push(normalize_activity(activity, self.resolver.as_ref()).await);
        }
        sort_most_recent_first(&mut processed);
        processed
    }
}

/// Stable descending sort on the `startTime` string
pub fn sort_most_recent_first(activities: &mut [ProcessedActivity]) {
    activities.sort_by(|a, b| b.start_time.cmp(&a.start_time));
}

/// `[now - days, now]` as `YYYY-MM-DD` strings, counted on the local wall clock
///
/// Calendar days are subtracted from the naive local time, so a DST change
/// inside the window never shifts the start date.
#[must_use]
pub fn date_window(now: NaiveDateTime, days: u32) -> Option<DateRange> {
    let start = now.checked_sub_signed(Duration::try_days(i64::from(days))?)?;
    Some(DateRange {
        start: start.format(DATE_FORMAT).to_string(),
        end: now.format(DATE_FORMAT).to_string(),
    })
}
