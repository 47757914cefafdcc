// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cleanup run orchestration.
//!
//! Handles the workflow:
//! 1. Wait out the grace period (live runs only)
//! 2. Collect scheduled plan owners from every plan page
//! 3. Walk every user page, deleting or reporting non-owners
//! 4. Log the summary

use crate::config::Config;
use crate::error::Result;
use crate::models::RunStats;
use crate::services::collector::collect_plan_owners;
use crate::services::retry::RetryPolicy;
use crate::services::{LookerClient, UserProcessor};

/// Run a cleanup with the default retry policy.
pub async fn run_cleanup(config: &Config) -> Result<RunStats> {
    let mut client = LookerClient::new(config, RetryPolicy::default());
    run_cleanup_with(config, &mut client).await
}

/// Run a cleanup with a caller-supplied client.
///
/// Authentication and page-fetch errors abort the run, including a failed
/// re-login in the middle of deleting. Other per-user deletion failures are
/// counted in the returned stats instead.
pub async fn run_cleanup_with(config: &Config, client: &mut LookerClient) -> Result<RunStats> {
    let mut stats = RunStats::new(config.dry_run);

    if config.dry_run {
        tracing::info!("Dry run: no users will be deleted");
    } else {
        tracing::warn!(
            grace_secs = config.startup_grace.as_secs(),
            "Live run: users will be deleted. Interrupt now to abort"
        );
        tokio::time::sleep(config.startup_grace).await;
    }

    // ─── Collect plan owners ──────────────────────────────────────────────
    let owners = collect_plan_owners(client, config.plan_page_size, config.call_delay).await?;
    stats.plans_seen = owners.plans_seen;
    stats.plan_owners = owners.len();

    // ─── Process users ────────────────────────────────────────────────────
    let mut processor = UserProcessor::new(client, &owners, config.dry_run);
    let page_size = config.user_page_size;
    let mut offset = 0;

    loop {
        let page = processor.client().list_users(page_size, offset).await?;
        tracing::debug!(offset, count = page.items.len(), "Fetched users page");

        processor.process_page(&page.items, &mut stats).await?;

        if !page.has_more {
            break;
        }
        offset += page_size;
        tokio::time::sleep(config.call_delay).await;
    }

    stats.log_summary();
    Ok(stats)
}
