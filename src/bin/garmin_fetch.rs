// ABOUTME: garmin-fetch CLI - prints recent cardio/outdoor Garmin activities as a JSON envelope
// ABOUTME: Wires configuration, logging, provider, and geocoder, and maps outcomes to exit codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Last 30 days
//! garmin-fetch --email athlete@example.com --password secret
//!
//! # Last week, with debug logs on stderr
//! garmin-fetch --email athlete@example.com --password secret --days 7 --verbose
//!
//! # Offline run against a saved activity-search payload
//! garmin-fetch --email x --password x --activities-file activities.json
//! ```
//!
//! The JSON envelope goes to stdout; logs go to stderr.

use clap::Parser;
use garmin_activity_fetcher::config::FetcherConfig;
use garmin_activity_fetcher::constants::fetch::DEFAULT_DAYS;
use garmin_activity_fetcher::constants::messages;
use garmin_activity_fetcher::errors::{AppError, AppResult};
use garmin_activity_fetcher::intelligence::location::{resolver_from_config, LocationResolver};
use garmin_activity_fetcher::logging::LoggingConfig;
use garmin_activity_fetcher::models::FetchResult;
use garmin_activity_fetcher::providers::registry::create_provider;
use garmin_activity_fetcher::providers::GarminCredentials;
use garmin_activity_fetcher::services::ActivityFetchService;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "garmin-fetch",
    about = "Fetch recent Garmin Connect activities as JSON",
    long_about = "Fetches the cardio/outdoor activities of the last N days from Garmin Connect, \
                  normalizes them, and prints a single JSON document to stdout."
)]
struct Cli {
    /// Garmin Connect account email
    #[arg(long)]
    email: String,

    /// Garmin Connect account password
    #[arg(long)]
    password: String,

    /// Number of days to look back
    #[arg(long, default_value_t = DEFAULT_DAYS)]
    days: u32,

    /// Read raw activities from a JSON file instead of Garmin Connect
    #[arg(long)]
    activities_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

enum Outcome {
    Completed(FetchResult),
    Cancelled,
    Unexpected(AppError),
}

/// Exit status for a completed fetch, whether it succeeded or reported a failure
const EXIT_COMPLETED: u8 = 0;
/// Exit status for cancellation and unexpected errors
const EXIT_ABORTED: u8 = 1;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose { logging.verbose() } else { logging };
    if let Err(e) = logging.init() {
        eprintln!("{e}");
    }

    let (document, status) = render(run(cli).await);
    println!("{document}");
    ExitCode::from(status)
}

/// Stdout document and exit status for an outcome
///
/// Completed fetches are pretty-printed; cancellation and unexpected errors
/// produce a single-line failure envelope.
fn render(outcome: Outcome) -> (String, u8) {
    match outcome {
        Outcome::Completed(result) => match serde_json::to_string_pretty(&result) {
            Ok(json) => (json, EXIT_COMPLETED),
            Err(e) => render(Outcome::Unexpected(AppError::from(e))),
        },
        Outcome::Cancelled => (
            compact(&FetchResult::failure(messages::CANCELLED)),
            EXIT_ABORTED,
        ),
        Outcome::Unexpected(error) => (
            compact(&FetchResult::failure(format!(
                "{}{error}",
                messages::UNEXPECTED_ERROR_PREFIX
            ))),
            EXIT_ABORTED,
        ),
    }
}

fn compact(result: &FetchResult) -> String {
    serde_json::to_string(result).unwrap_or_else(|e| {
        error!(error = %e, "Failed to serialize failure envelope");
        String::new()
    })
}

async fn run(cli: Cli) -> Outcome {
    let service = match build_service(&cli) {
        Ok(service) => service,
        Err(e) => return Outcome::Unexpected(e),
    };
    let credentials = GarminCredentials::new(cli.email, cli.password);
    let days = cli.days;

    info!(days, "Starting activity fetch");
    let task = tokio::spawn(async move { service.fetch_recent(&credentials, days).await });

    tokio::select! {
        joined = task => match joined {
            Ok(result) => Outcome::Completed(result),
            Err(e) => {
                error!(error = %e, "Fetch task aborted");
                let message = format!("fetch task failed: {e}");
                Outcome::Unexpected(AppError::internal(message).with_source(e))
            }
        },
        Ok(()) = signal::ctrl_c() => {
            info!("Interrupted, abandoning fetch");
            Outcome::Cancelled
        }
    }
}

fn build_service(cli: &Cli) -> AppResult<ActivityFetchService> {
    let config = FetcherConfig::from_env()?;
    let provider = create_provider(&config, cli.activities_file.as_deref())
        .map_err(|e| AppError::invalid_config(e.to_string()))?;
    let resolver: Arc<dyn LocationResolver> = Arc::from(resolver_from_config(&config.geocoding));
    Ok(ActivityFetchService::new(provider, resolver))
}
