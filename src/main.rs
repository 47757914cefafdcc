// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Looker user cleanup tool
//!
//! Deletes Looker users that own no scheduled plan. Runs as a dry run
//! unless `--force-apply` is given.

use anyhow::Context;
use looker_user_cleanup::{config::Config, services::run_cleanup};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env may carry LOG_FORMAT / RUST_LOG, so load it before logging
    dotenvy::dotenv().ok();
    init_logging();

    // Load configuration before any network activity
    let config = Config::load().context("Failed to load configuration")?;
    tracing::info!(
        base_url = %config.base_url,
        dry_run = config.dry_run,
        delay_ms = config.call_delay.as_millis() as u64,
        "Starting Looker user cleanup"
    );

    let stats = run_cleanup(&config).await.map_err(|e| {
        tracing::error!(error = %e, "Cleanup aborted");
        e
    })?;

    if stats.errors > 0 {
        tracing::warn!(errors = stats.errors, "Some deletions failed");
    }
    Ok(())
}

/// Initialize structured JSON logging, or human-readable output when
/// `LOG_FORMAT=pretty`.
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("looker_user_cleanup=debug,info")
    });

    let pretty = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("pretty"));

    if pretty {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init();
    } else {
        let format = tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .with_current_span(true)
            .flatten_event(true);

        tracing_subscriber::registry().with(filter).with(format).init();
    }
}
