// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use looker_user_cleanup::config::Config;
use looker_user_cleanup::services::{LookerClient, RetryPolicy};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Retry policy that keeps transport-failure tests fast.
#[allow(dead_code)]
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_retries: 2,
        base_delay: Duration::from_millis(1),
    }
}

/// Dry-run, zero-delay configuration pointing at a mock server.
#[allow(dead_code)]
pub fn test_config(server: &MockServer) -> Config {
    Config::test_default(&server.uri())
}

/// Client pointing at a mock server.
#[allow(dead_code)]
pub fn test_client(server: &MockServer) -> LookerClient {
    LookerClient::new(&test_config(server), fast_retry())
}

/// Mount a login endpoint issuing tokens valid for `expires_in` seconds.
#[allow(dead_code)]
pub async fn mount_login(server: &MockServer, expires_in: i64) {
    Mock::given(method("POST"))
        .and(path("/api/4.0/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-token",
            "token_type": "Bearer",
            "expires_in": expires_in,
        })))
        .mount(server)
        .await;
}

/// Scheduled plans with ids starting at `first_id`, owners cycling through
/// `owners` (`None` for ownerless plans).
#[allow(dead_code)]
pub fn plans(first_id: u64, count: usize, owners: &[Option<&str>]) -> Value {
    let plans: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "id": (first_id + i as u64).to_string(),
                "name": format!("Plan {}", first_id + i as u64),
                "user_id": owners[i % owners.len()],
            })
        })
        .collect();
    Value::Array(plans)
}

/// Users with consecutive ids `first_id..first_id + count`.
#[allow(dead_code)]
pub fn users(first_id: u64, count: usize) -> Value {
    let users: Vec<Value> = (first_id..first_id + count as u64)
        .map(|id| {
            json!({
                "id": id.to_string(),
                "display_name": format!("User {}", id),
                "email": format!("user{}@example.com", id),
            })
        })
        .collect();
    Value::Array(users)
}

/// Serve `body` for the scheduled plan page at `offset`.
#[allow(dead_code)]
pub async fn mount_plans_page(server: &MockServer, offset: u32, body: Value) {
    Mock::given(method("GET"))
        .and(path("/api/4.0/scheduled_plans"))
        .and(query_param("offset", offset.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Serve `body` for the user page at `offset`.
#[allow(dead_code)]
pub async fn mount_users_page(server: &MockServer, offset: u32, body: Value) {
    Mock::given(method("GET"))
        .and(path("/api/4.0/users/search"))
        .and(query_param("offset", offset.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}
