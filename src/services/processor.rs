// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user decision: keep plan owners, delete (or report) everybody else.

use crate::error::{AppError, Result};
use crate::models::{RunStats, User};
use crate::services::{LookerClient, PlanOwners};

/// Processes pages of users against the plan-owner set.
pub struct UserProcessor<'a> {
    client: &'a mut LookerClient,
    owners: &'a PlanOwners,
    dry_run: bool,
}

impl<'a> UserProcessor<'a> {
    pub fn new(client: &'a mut LookerClient, owners: &'a PlanOwners, dry_run: bool) -> Self {
        Self {
            client,
            owners,
            dry_run,
        }
    }

    /// Access the client, e.g. to fetch the next page of users.
    pub fn client(&mut self) -> &mut LookerClient {
        self.client
    }

    /// Process one already-fetched page of users.
    ///
    /// A failed deletion is logged and counted; it never stops the page.
    /// Losing the session is different: if logging in again fails, no
    /// further deletion can succeed, so the error is returned.
    pub async fn process_page(&mut self, users: &[User], stats: &mut RunStats) -> Result<()> {
        for user in users {
            stats.total_users += 1;

            if self.owners.contains(&user.id) {
                tracing::debug!(user_id = %user.id, "Skipping scheduled plan owner");
                stats.skipped_plan_owner += 1;
                continue;
            }

            let name = user.display_name.as_deref().unwrap_or("");
            let email = user.email.as_deref().unwrap_or("");

            if self.dry_run {
                tracing::info!(user_id = %user.id, name, email, "Would delete user");
                stats.would_delete += 1;
                continue;
            }

            match self.client.delete_user(&user.id).await {
                Ok(()) => {
                    tracing::info!(user_id = %user.id, name, email, "Deleted user");
                    stats.deleted += 1;
                }
                Err(e @ AppError::Authentication { .. }) => {
                    tracing::error!(user_id = %user.id, error = %e, "Re-authentication failed");
                    return Err(e);
                }
                Err(e) => {
                    tracing::error!(user_id = %user.id, email, error = %e, "Failed to delete user");
                    stats.errors += 1;
                }
            }
        }

        Ok(())
    }
}
