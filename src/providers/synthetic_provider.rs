// ABOUTME: In-memory activity provider serving pre-loaded raw Garmin records
// ABOUTME: Backs offline fixture runs and tests without any network access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// RwLock/Mutex poisoning errors are converted to ProviderError::ConfigurationError

//! # Synthetic Activity Provider
//!
//! Serves raw activities from memory, filtered by the requested date window
//! the same way the remote search endpoint filters them: an activity is
//! returned when the `YYYY-MM-DD` prefix of its local start time lies within
//! `[start_date, end_date]`. Records without a start time are always returned.
//!
//! Any credentials are accepted. The provider remembers the last requested
//! window and counts logins so callers can assert on them.

use super::core::{ActivityProvider, GarminCredentials};
use super::errors::ProviderError;
use crate::constants::providers::SYNTHETIC;
use crate::models::RawActivity;
use async_trait::async_trait;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};
use tracing::debug;

/// Synthetic provider for offline runs and testing
///
/// # Examples
///
/// ```rust,no_run
/// use garmin_activity_fetcher::providers::synthetic_provider::SyntheticProvider;
/// use garmin_activity_fetcher::providers::ActivityProvider;
/// use garmin_activity_fetcher::models::RawActivity;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = SyntheticProvider::with_activities(vec![RawActivity::default()]);
/// let activities = provider.get_activities_by_date("2024-05-01", "2024-06-01").await?;
/// assert_eq!(activities.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct SyntheticProvider {
    activities: RwLock<Vec<RawActivity>>,
    last_range: Mutex<Option<(String, String)>>,
    login_count: AtomicUsize,
}

impl SyntheticProvider {
    /// Create a provider with no activities
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider pre-loaded with activities
    #[must_use]
    pub fn with_activities(activities: Vec<RawActivity>) -> Self {
        Self {
            activities: RwLock::new(activities),
            ..Self::default()
        }
    }

    /// Load raw activities from a JSON array file (the activity-search payload)
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read, or a parse
    /// error if it is not a JSON array of activity objects
    pub fn from_json_file(path: &Path) -> Result<Self, ProviderError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ProviderError::ConfigurationError(format!(
                "Failed to read activities file {}: {e}",
                path.display()
            ))
        })?;
        let activities: Vec<RawActivity> =
            serde_json::from_str(&content).map_err(|e| ProviderError::ParseError {
                provider: SYNTHETIC.to_owned(),
                message: format!("{}: {e}", path.display()),
            })?;
        debug!(
            count = activities.len(),
            path = %path.display(),
            "Loaded synthetic activities"
        );
        Ok(Self::with_activities(activities))
    }

    /// Add an activity
    ///
    /// # Errors
    ///
    /// Returns an error if the activity lock is poisoned
    pub fn add_activity(&self, activity: RawActivity) -> Result<(), ProviderError> {
        self.activities
            .write()
            .map_err(|e| ProviderError::ConfigurationError(format!("activities lock poisoned: {e}")))?
            .push(activity);
        Ok(())
    }

    /// Number of stored activities
    ///
    /// # Errors
    ///
    /// Returns an error if the activity lock is poisoned
    pub fn activity_count(&self) -> Result<usize, ProviderError> {
        Ok(self
            .activities
            .read()
            .map_err(|e| ProviderError::ConfigurationError(format!("activities lock poisoned: {e}")))?
            .len())
    }

    /// Last `(start_date, end_date)` passed to [`ActivityProvider::get_activities_by_date`]
    ///
    /// # Errors
    ///
    /// Returns an error if the range lock is poisoned
    pub fn last_requested_range(&self) -> Result<Option<(String, String)>, ProviderError> {
        Ok(self
            .last_range
            .lock()
            .map_err(|e| ProviderError::ConfigurationError(format!("range lock poisoned: {e}")))?
            .clone())
    }

    /// How many times `login` was called
    #[must_use]
    pub fn login_count(&self) -> usize {
        self.login_count.load(Ordering::Relaxed)
    }
}

/// Whether the date prefix of `start_time_local` falls in the inclusive window
fn within_window(activity: &RawActivity, start_date: &str, end_date: &str) -> bool {
    let Some(start) = activity.start_time_local.as_deref().filter(|s| !s.is_empty()) else {
        return true;
    };
    let day = start.get(..10).unwrap_or(start);
    day >= start_date && day <= end_date
}

#[async_trait]
impl ActivityProvider for SyntheticProvider {
    fn name(&self) -> &'static str {
        SYNTHETIC
    }

    async fn login(&self, credentials: &GarminCredentials) -> Result<(), ProviderError> {
        debug!(email = %credentials.email, "Synthetic login accepted");
        self.login_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn get_activities_by_date(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<RawActivity>, ProviderError> {
        *self
            .last_range
            .lock()
            .map_err(|e| ProviderError::ConfigurationError(format!("range lock poisoned: {e}")))? =
            Some((start_date.to_owned(), end_date.to_owned()));

        let activities = self
            .activities
            .read()
            .map_err(|e| ProviderError::ConfigurationError(format!("activities lock poisoned: {e}")))?;

        Ok(activities
            .iter()
            .filter(|activity| within_window(activity, start_date, end_date))
            .cloned()
            .collect())
    }
}
