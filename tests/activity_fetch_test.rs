// ABOUTME: Tests for the fetch orchestrator and its FetchResult envelope
// ABOUTME: Covers filtering, ordering, date windows, validation, and failure classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use chrono::{DateTime, Local, TimeZone};
use garmin_activity_fetcher::intelligence::location::DisabledLocationResolver;
use garmin_activity_fetcher::models::{DateRange, FetchResult};
use garmin_activity_fetcher::providers::synthetic_provider::SyntheticProvider;
use garmin_activity_fetcher::providers::unavailable_provider::UnavailableProvider;
use garmin_activity_fetcher::providers::{GarminCredentials, ProviderError};
use garmin_activity_fetcher::services::activity_fetch::sort_most_recent_first;
use garmin_activity_fetcher::services::ActivityFetchService;
use helpers::fixtures::{pool_swim_at, walk_at};
use helpers::mock_providers::{CoordinateResolver, FailAt, FailingProvider};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn credentials() -> GarminCredentials {
    GarminCredentials::new("athlete@example.com", "secret")
}

fn june_first() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn service_over(provider: SyntheticProvider) -> (ActivityFetchService, Arc<SyntheticProvider>) {
    let provider = Arc::new(provider);
    let service = ActivityFetchService::new(provider.clone(), Arc::new(DisabledLocationResolver));
    (service, provider)
}

fn failing_service(stage: FailAt, make_error: fn() -> ProviderError) -> ActivityFetchService {
    ActivityFetchService::new(
        Arc::new(FailingProvider::new(stage, make_error)),
        Arc::new(DisabledLocationResolver),
    )
}

#[tokio::test]
async fn test_relevant_activities_sorted_most_recent_first() {
    let (service, provider) = service_over(SyntheticProvider::with_activities(vec![
        walk_at(3, "2024-05-20T08:00:00"),
        walk_at(1, "2024-05-10T08:00:00"),
        pool_swim_at(9, "2024-05-25T08:00:00"),
        walk_at(5, "2024-05-30T08:00:00"),
    ]));

    let result = service.fetch_recent_at(&credentials(), 30, june_first()).await;

    assert!(result.is_success());
    let ids: Vec<&str> = result
        .activities()
        .iter()
        .map(|a| a.activity_id.as_str())
        .collect();
    assert_eq!(ids, ["5", "3", "1"]);
    assert_eq!(provider.login_count(), 1);
    assert_eq!(
        provider.last_requested_range().unwrap(),
        Some(("2024-05-02".to_owned(), "2024-06-01".to_owned()))
    );
}

#[tokio::test]
async fn test_empty_window_is_success_with_range() {
    let (service, _) = service_over(SyntheticProvider::new());
    let result = service.fetch_recent_at(&credentials(), 7, june_first()).await;

    assert_eq!(
        result,
        FetchResult::success(
            Vec::new(),
            DateRange {
                start: "2024-05-25".to_owned(),
                end: "2024-06-01".to_owned(),
            }
        )
    );
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "success": true,
            "activities": [],
            "dateRange": {"start": "2024-05-25", "end": "2024-06-01"}
        })
    );
}

#[tokio::test]
async fn test_only_irrelevant_activities_is_empty_success() {
    let (service, _) = service_over(SyntheticProvider::with_activities(vec![pool_swim_at(
        1,
        "2024-05-30T08:00:00",
    )]));
    let result = service.fetch_recent_at(&credentials(), 30, june_first()).await;
    assert!(result.is_success());
    assert!(result.activities().is_empty());
}

#[tokio::test]
async fn test_zero_days_rejected_before_login() {
    let (service, provider) = service_over(SyntheticProvider::new());
    let result = service.fetch_recent_at(&credentials(), 0, june_first()).await;
    assert_eq!(
        result.error(),
        Some("Days parameter must be a positive integer")
    );
    assert_eq!(provider.login_count(), 0);
    assert_eq!(provider.last_requested_range().unwrap(), None);
}

#[tokio::test]
async fn test_unavailable_provider_short_circuits() {
    let service =
        ActivityFetchService::new(Arc::new(UnavailableProvider), Arc::new(DisabledLocationResolver));
    let result = service.fetch_recent(&credentials(), 30).await;
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "success": false,
            "error": "Garmin Connect client not available. Please enable it with GARMIN_CONNECT_ENABLED=true"
        })
    );
}

#[tokio::test]
async fn test_rejected_login_is_credentials_error() {
    let provider = Arc::new(FailingProvider::new(FailAt::Login, || {
        ProviderError::AuthenticationFailed {
            provider: "garmin".to_owned(),
            reason: "SSO sign-in did not return a service ticket".to_owned(),
        }
    }));
    let service = ActivityFetchService::new(provider.clone(), Arc::new(DisabledLocationResolver));
    let result = service.fetch_recent_at(&credentials(), 30, june_first()).await;

    assert_eq!(
        result.error(),
        Some("Invalid Garmin Connect credentials. Please check your email and password.")
    );
    assert_eq!(provider.fetch_calls.load(Ordering::Relaxed), 0);
}

#[tokio::test]
async fn test_api_401_message_is_credentials_error() {
    let service = failing_service(FailAt::Fetch, || ProviderError::ApiError {
        provider: "garmin".to_owned(),
        status_code: 502,
        message: "upstream said 401 Unauthorized".to_owned(),
    });
    let result = service.fetch_recent_at(&credentials(), 30, june_first()).await;
    assert_eq!(
        result.error(),
        Some("Invalid Garmin Connect credentials. Please check your email and password.")
    );
}

#[tokio::test]
async fn test_network_failure_is_connectivity_error() {
    let service = failing_service(FailAt::Fetch, || {
        ProviderError::NetworkError("garmin connection failed: timed out".to_owned())
    });
    let result = service.fetch_recent_at(&credentials(), 30, june_first()).await;
    assert_eq!(
        result.error(),
        Some("Unable to connect to Garmin Connect. Please check your internet connection.")
    );
}

#[tokio::test]
async fn test_other_failures_keep_detail() {
    let service = failing_service(FailAt::Fetch, || ProviderError::ParseError {
        provider: "garmin".to_owned(),
        message: "expected value at line 1 column 1".to_owned(),
    });
    let result = service.fetch_recent_at(&credentials(), 30, june_first()).await;
    assert_eq!(
        result.error(),
        Some(
            "Error fetching activities: Failed to parse garmin response: expected value at line 1 column 1"
        )
    );
}

#[tokio::test]
async fn test_geocoding_runs_for_each_relevant_endpoint() {
    let resolver = Arc::new(CoordinateResolver::default());
    let provider = Arc::new(SyntheticProvider::with_activities(vec![
        walk_at(1, "2024-05-10T08:00:00"),
        pool_swim_at(2, "2024-05-11T08:00:00"),
        walk_at(3, "2024-05-12T08:00:00"),
    ]));
    let service = ActivityFetchService::new(provider, resolver.clone());
    let result = service.fetch_recent_at(&credentials(), 30, june_first()).await;

    assert_eq!(result.activities().len(), 2);
    assert_eq!(resolver.call_count(), 4);
}

#[test]
fn test_sort_is_descending_and_stable() {
    let mut activities: Vec<_> = [
        ("a", "2024-01-03T08:00:00"),
        ("b", "2024-01-01T08:00:00"),
        ("c", "2024-01-05T08:00:00"),
        ("d", "2024-01-03T08:00:00"),
    ]
    .into_iter()
    .map(|(id, start)| garmin_activity_fetcher::models::ProcessedActivity {
        activity_id: id.to_owned(),
        name: String::new(),
        activity_type: String::new(),
        date: start[..10].to_owned(),
        start_location: String::new(),
        end_location: String::new(),
        distance_km: 0.0,
        elevation_gain_m: 0,
        duration_minutes: 0,
        average_speed_kmh: 0.0,
        start_time: start.to_owned(),
        end_time: start.to_owned(),
        calories: None,
        heart_rate_data: None,
    })
    .collect();

    sort_most_recent_first(&mut activities);
    let ids: Vec<&str> = activities.iter().map(|a| a.activity_id.as_str()).collect();
    assert_eq!(ids, ["c", "a", "d", "b"]);
}
