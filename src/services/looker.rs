// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Looker API 4.0 client.
//!
//! Handles:
//! - API3 credential login and token refresh before expiry
//! - Paginated listing of scheduled plans and users
//! - User deletion with a rate-limit courtesy delay
//! - Retrying transport failures (HTTP error statuses are never retried)

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{Page, ScheduledPlan, User};
use crate::services::retry::{with_retry, RetryPolicy};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Margin before token expiration when we proactively re-authenticate.
const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

/// Field projection requested from `users/search`.
const USER_FIELDS: &str = "id,display_name,email";

/// Access token with expiry information.
#[derive(Clone)]
struct SessionToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl SessionToken {
    fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(TOKEN_REFRESH_MARGIN_SECS) >= self.expires_at
    }
}

/// Expiry for a token issued at `now` with a lifetime of `expires_in` seconds.
fn token_expiry(now: DateTime<Utc>, expires_in: i64) -> Result<DateTime<Utc>> {
    Duration::try_seconds(expires_in)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| AppError::Decode(format!("Token lifetime out of range: {}", expires_in)))
}

/// Login response from `POST /api/4.0/login`.
#[derive(Debug, Clone, Deserialize)]
struct LoginResponse {
    access_token: String,
    expires_in: i64,
}

/// Looker API client.
///
/// Owns its session token; callers never see it. Methods take `&mut self`
/// so the token can be replaced in place without locking.
pub struct LookerClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    call_delay: std::time::Duration,
    retry: RetryPolicy,
    token: Option<SessionToken>,
}

impl LookerClient {
    /// Create a client from the run configuration.
    pub fn new(config: &Config, retry: RetryPolicy) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            call_delay: config.call_delay,
            retry,
            token: None,
        }
    }

    /// Whether a session token is currently held.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Expiry of the current session token, if any.
    pub fn token_expires_at(&self) -> Option<DateTime<Utc>> {
        self.token.as_ref().map(|t| t.expires_at)
    }

    // ─── Token Management ────────────────────────────────────────────────────

    /// Exchange the client credentials for a fresh access token.
    pub async fn authenticate(&mut self) -> Result<()> {
        self.token = Some(self.login().await?);
        Ok(())
    }

    /// Return a token with more than the refresh margin left, logging in
    /// again first if the current one is missing or about to expire.
    async fn ensure_authenticated(&mut self) -> Result<String> {
        match &self.token {
            Some(token) if !token.needs_refresh(Utc::now()) => {
                return Ok(token.access_token.clone());
            }
            Some(_) => tracing::info!("Access token expiring, re-authenticating"),
            None => {}
        }

        let token = self.login().await?;
        let access_token = token.access_token.clone();
        self.token = Some(token);
        Ok(access_token)
    }

    async fn login(&self) -> Result<SessionToken> {
        let url = self.url("login");
        let http = &self.http;
        let form = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let response = with_retry(&self.retry, "login", || http.post(&url).form(&form).send())
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, "Looker login failed");
            return Err(AppError::Authentication {
                status: status.as_u16(),
                body,
            });
        }

        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| AppError::Decode(format!("Failed to parse login response: {}", e)))?;

        let expires_at = token_expiry(Utc::now(), login.expires_in)?;

        tracing::info!(expires_in = login.expires_in, "Authenticated with Looker API");
        Ok(SessionToken {
            access_token: login.access_token,
            expires_at,
        })
    }

    // ─── API Wrappers ────────────────────────────────────────────────────────

    /// List one page of scheduled plans across all users.
    pub async fn list_scheduled_plans(
        &mut self,
        page_size: u32,
        offset: u32,
    ) -> Result<Page<ScheduledPlan>> {
        let query = [
            ("all_users", "true".to_string()),
            ("limit", page_size.to_string()),
            ("offset", offset.to_string()),
        ];
        let plans: Vec<ScheduledPlan> = self
            .get_json("scheduled_plans", "list_scheduled_plans", &query)
            .await?;
        Ok(Page::new(plans, page_size))
    }

    /// List one page of users, sorted by id.
    pub async fn list_users(&mut self, page_size: u32, offset: u32) -> Result<Page<User>> {
        let query = [
            ("embed_user", "true".to_string()),
            ("limit", page_size.to_string()),
            ("offset", offset.to_string()),
            ("fields", USER_FIELDS.to_string()),
            ("sorts", "id".to_string()),
        ];
        let users: Vec<User> = self.get_json("users/search", "list_users", &query).await?;
        Ok(Page::new(users, page_size))
    }

    /// Delete a user, after the configured inter-call delay.
    pub async fn delete_user(&mut self, user_id: &str) -> Result<()> {
        tokio::time::sleep(self.call_delay).await;

        let access_token = self.ensure_authenticated().await?;
        let url = self.url(&format!("users/{}", user_id));
        let http = &self.http;

        let response = with_retry(&self.retry, "delete_user", || {
            http.delete(&url).bearer_auth(&access_token).send()
        })
        .await?;

        check_response(response).await
    }

    /// Authenticated GET with query parameters and a JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &mut self,
        endpoint: &str,
        operation: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let access_token = self.ensure_authenticated().await?;
        let url = self.url(endpoint);
        let http = &self.http;

        let response = with_retry(&self.retry, operation, || {
            http.get(&url).bearer_auth(&access_token).query(query).send()
        })
        .await?;

        check_response_json(response).await
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/api/4.0/{}", self.base_url, endpoint)
    }
}

/// Check response status and return error if not successful.
async fn check_response(response: reqwest::Response) -> Result<()> {
    if response.status().is_success() {
        return Ok(());
    }
    Err(api_error(response).await)
}

/// Check response and parse JSON body.
async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| AppError::Decode(format!("JSON parse error: {}", e)))
}

async fn api_error(response: reqwest::Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if status.as_u16() == 429 {
        tracing::warn!("Looker rate limit hit (429)");
    }

    AppError::Api {
        status: status.as_u16(),
        body,
    }
}
