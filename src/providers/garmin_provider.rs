// ABOUTME: Garmin Connect client using the SSO sign-in form and a cookie session
// ABOUTME: Fetches the date-bounded activity list as raw records with typed error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::core::{ActivityProvider, GarminCredentials};
use super::errors::ProviderError;
use crate::config::GarminApiConfig;
use crate::constants::providers::GARMIN;
use crate::models::RawActivity;
use crate::utils::http_client::session_client;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

/// Source tag Garmin expects on the embedded sign-in form
const SSO_CLIENT_ID: &str = "GarminConnect";
/// Header required by the Connect proxy endpoints
const NK_HEADER: (&str, &str) = ("NK", "NT");

/// Established Connect session
#[derive(Debug, Clone)]
struct GarminSession {
    ticket: String,
    authenticated_at: DateTime<Utc>,
}

/// Garmin Connect provider
///
/// Signs in through the SSO form and reads activities from the cookie-authenticated
/// `/modern/proxy` endpoints. This path is best-effort: the current Connect API on
/// `connectapi.garmin.com` expects OAuth bearer tokens, which this client does not
/// obtain, so Garmin may refuse the session with 401/403. That surfaces as
/// [`ProviderError::AuthenticationFailed`] and the caller's failure envelope.
pub struct GarminConnectProvider {
    config: GarminApiConfig,
    client: Client,
    session: RwLock<Option<GarminSession>>,
}

impl GarminConnectProvider {
    /// Create a provider with its own cookie-backed HTTP client
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built
    pub fn new(config: GarminApiConfig) -> Result<Self, ProviderError> {
        let client = session_client(config.timeout_secs).map_err(|e| {
            ProviderError::ConfigurationError(format!("Failed to create Garmin HTTP client: {e}"))
        })?;
        Ok(Self {
            config,
            client,
            session: RwLock::new(None),
        })
    }

    fn service_url(&self) -> String {
        format!("{}/modern/", self.config.connect_url.trim_end_matches('/'))
    }

    fn signin_url(&self) -> String {
        format!("{}/signin", self.config.sso_url.trim_end_matches('/'))
    }

    fn activities_url(&self) -> String {
        format!(
            "{}/modern/proxy/activitylist-service/activities/search/activities",
            self.config.connect_url.trim_end_matches('/')
        )
    }

    fn sso_params(&self) -> Vec<(&'static str, String)> {
        let service = self.service_url();
        vec![
            ("service", service.clone()),
            ("webhost", service.clone()),
            ("source", format!("{}/signin/", self.config.sso_url)),
            ("redirectAfterAccountLoginUrl", service.clone()),
            ("redirectAfterAccountCreationUrl", service),
            ("gauthHost", self.config.sso_url.clone()),
            ("clientId", SSO_CLIENT_ID.to_owned()),
            ("consumeServiceTicket", "false".to_owned()),
            ("embedWidget", "false".to_owned()),
        ]
    }

    async fn send(request: RequestBuilder) -> Result<Response, ProviderError> {
        request
            .send()
            .await
            .map_err(|e| ProviderError::from_transport(GARMIN, &e))
    }

    async fn text(response: Response) -> Result<String, ProviderError> {
        response
            .text()
            .await
            .map_err(|e| ProviderError::from_transport(GARMIN, &e))
    }

    fn auth_failed(reason: impl Into<String>) -> ProviderError {
        ProviderError::AuthenticationFailed {
            provider: GARMIN.to_owned(),
            reason: reason.into(),
        }
    }

    /// Map non-success statuses; 401/403 mean the credentials or session were refused
    fn check_status(status: StatusCode, context: &str) -> Result<(), ProviderError> {
        if status.is_success() {
            return Ok(());
        }
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(Self::auth_failed(format!("{context} returned {status}")));
        }
        Err(ProviderError::ApiError {
            provider: GARMIN.to_owned(),
            status_code: status.as_u16(),
            message: format!("{context} returned {status}"),
        })
    }

    async fn fetch_csrf_token(&self) -> Result<Option<String>, ProviderError> {
        let response = Self::send(
            self.client
                .get(self.signin_url())
                .query(&self.sso_params()),
        )
        .await?;
        Self::check_status(response.status(), "SSO sign-in page")?;
        let body = Self::text(response).await?;
        extract_csrf_token(&body)
    }

    async fn exchange_ticket(&self, ticket: &str) -> Result<(), ProviderError> {
        let response = Self::send(
            self.client
                .get(self.service_url())
                .query(&[("ticket", ticket)]),
        )
        .await?;
        Self::check_status(response.status(), "Connect ticket exchange")
    }

    async fn current_session(&self) -> Result<GarminSession, ProviderError> {
        self.session
            .read()
            .await
            .clone()
            .ok_or_else(|| Self::auth_failed("not logged in"))
    }
}

#[async_trait]
impl ActivityProvider for GarminConnectProvider {
    fn name(&self) -> &'static str {
        GARMIN
    }

    #[instrument(skip_all, fields(provider = GARMIN))]
    async fn login(&self, credentials: &GarminCredentials) -> Result<(), ProviderError> {
        let csrf = self.fetch_csrf_token().await?;
        let mut form = vec![
            ("username", credentials.email.clone()),
            ("password", credentials.password.clone()),
            ("embed", "false".to_owned()),
        ];
        if let Some(token) = csrf {
            form.push(("_csrf", token));
        }

        let response = Self::send(
            self.client
                .post(self.signin_url())
                .query(&self.sso_params())
                .header(reqwest::header::ORIGIN, self.config.sso_url.as_str())
                .form(&form),
        )
        .await?;
        Self::check_status(response.status(), "SSO sign-in")?;
        let body = Self::text(response).await?;

        let ticket = extract_service_ticket(&body)?
            .ok_or_else(|| Self::auth_failed("SSO sign-in did not return a service ticket"))?;
        debug!("Received SSO service ticket");

        self.exchange_ticket(&ticket).await?;

        *self.session.write().await = Some(GarminSession {
            ticket,
            authenticated_at: Utc::now(),
        });
        info!("Authenticated with Garmin Connect");
        Ok(())
    }

    #[instrument(skip(self), fields(provider = GARMIN))]
    async fn get_activities_by_date(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<RawActivity>, ProviderError> {
        let session = self.current_session().await?;
        debug!(
            ticket_len = session.ticket.len(),
            authenticated_at = %session.authenticated_at,
            "Using Garmin Connect session"
        );

        let limit = self.config.activity_limit.to_string();
        let response = Self::send(
            self.client
                .get(self.activities_url())
                .header(NK_HEADER.0, NK_HEADER.1)
                .query(&[
                    ("startDate", start_date),
                    ("endDate", end_date),
                    ("start", "0"),
                    ("limit", limit.as_str()),
                ]),
        )
        .await?;
        Self::check_status(response.status(), "Activity search")?;

        let body = Self::text(response).await?;
        let activities = parse_activity_list(&body)?;
        info!("Received {} activities from Garmin Connect", activities.len());
        Ok(activities)
    }
}

/// Parse the activity-search body; an empty or `null` body means no activities
///
/// # Errors
///
/// Returns a parse error if the body is neither empty, `null`, nor a JSON array
pub fn parse_activity_list(body: &str) -> Result<Vec<RawActivity>, ProviderError> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).map_err(|e| ProviderError::ParseError {
        provider: GARMIN.to_owned(),
        message: e.to_string(),
    })
}

fn compile(pattern: &str) -> Result<Regex, ProviderError> {
    Regex::new(pattern)
        .map_err(|e| ProviderError::ConfigurationError(format!("Invalid pattern {pattern}: {e}")))
}

/// Pull the `_csrf` hidden input from the SSO sign-in page
///
/// # Errors
///
/// Returns a configuration error only if the pattern itself is invalid
pub fn extract_csrf_token(html: &str) -> Result<Option<String>, ProviderError> {
    let pattern = compile(r#"name="_csrf"\s+value="([^"]+)""#)?;
    Ok(pattern
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned()))
}

/// Pull the `ST-...` service ticket out of the SSO sign-in response
///
/// # Errors
///
/// Returns a configuration error only if the pattern itself is invalid
pub fn extract_service_ticket(html: &str) -> Result<Option<String>, ProviderError> {
    let pattern = compile(r#"ticket=(ST-[A-Za-z0-9._-]+)"#)?;
    Ok(pattern
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned()))
}
