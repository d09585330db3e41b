// ABOUTME: Domain service layer for the activity fetch pipeline
// ABOUTME: Hosts the orchestrator that turns a provider response into a FetchResult envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Services hold the business rules of a fetch and are independent of the
//! command-line entry point, so they can be driven directly from tests.

/// Fetch orchestration: date window, relevance filter, normalization, sorting
pub mod activity_fetch;

pub use activity_fetch::ActivityFetchService;
