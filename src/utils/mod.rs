// ABOUTME: Utility module aggregating shared helpers
// ABOUTME: Currently holds HTTP client construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// HTTP client construction with bounded timeouts
pub mod http_client;
