//! Counters accumulated over a cleanup run.

use serde::Serialize;

/// Statistics for one run.
///
/// Updated in-line as each user is processed and reported once at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Whether the run was a dry run
    pub dry_run: bool,

    // ─── Collection Phase ────────────────────────────────────────
    /// Scheduled plans seen across all pages
    pub plans_seen: usize,
    /// Distinct users owning at least one plan
    pub plan_owners: usize,

    // ─── User Phase ──────────────────────────────────────────────
    /// Users seen across all pages
    pub total_users: usize,
    /// Users deleted (live run)
    pub deleted: usize,
    /// Users that would have been deleted (dry run)
    pub would_delete: usize,
    /// Users kept because they own a scheduled plan
    pub skipped_plan_owner: usize,
    /// Deletions that failed
    pub errors: usize,
}

impl RunStats {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    /// Log the final totals.
    pub fn log_summary(&self) {
        let summary = serde_json::to_string(self).unwrap_or_default();

        if self.dry_run {
            tracing::info!(
                total_users = self.total_users,
                skipped_plan_owner = self.skipped_plan_owner,
                would_delete = self.would_delete,
                summary = %summary,
                "Dry run complete: {} of {} users would be deleted ({} kept as plan owners)",
                self.would_delete,
                self.total_users,
                self.skipped_plan_owner
            );
        } else {
            tracing::info!(
                total_users = self.total_users,
                skipped_plan_owner = self.skipped_plan_owner,
                deleted = self.deleted,
                errors = self.errors,
                summary = %summary,
                "Cleanup complete: deleted {} of {} users ({} kept as plan owners, {} errors)",
                self.deleted,
                self.total_users,
                self.skipped_plan_owner,
                self.errors
            );
        }
    }
}
