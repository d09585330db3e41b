// ABOUTME: Shared test helpers and utilities for integration tests
// ABOUTME: Exports raw activity fixtures and scripted provider/resolver doubles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

pub mod fixtures;
pub mod mock_providers;
