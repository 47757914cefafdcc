// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Collects the ids of users who own at least one scheduled plan.

use std::collections::HashSet;
use std::time::Duration;

use crate::error::Result;
use crate::services::LookerClient;

/// Users protected from deletion because they own scheduled plans.
#[derive(Debug, Clone, Default)]
pub struct PlanOwners {
    ids: HashSet<String>,
    /// Scheduled plans seen across all pages
    pub plans_seen: usize,
}

impl PlanOwners {
    pub fn contains(&self, user_id: &str) -> bool {
        self.ids.contains(user_id)
    }

    /// Number of distinct owners.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<String> for PlanOwners {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
            plans_seen: 0,
        }
    }
}

/// Walk every page of scheduled plans and gather their owners.
///
/// Any page error aborts collection: a partial owner set could let a plan
/// owner be deleted.
pub async fn collect_plan_owners(
    client: &mut LookerClient,
    page_size: u32,
    delay: Duration,
) -> Result<PlanOwners> {
    let mut owners = PlanOwners::default();
    let mut offset = 0;

    loop {
        let page = client.list_scheduled_plans(page_size, offset).await?;
        tracing::debug!(offset, count = page.items.len(), "Fetched scheduled plans page");

        owners.plans_seen += page.items.len();
        owners
            .ids
            .extend(page.items.into_iter().filter_map(|plan| plan.user_id));

        if !page.has_more {
            break;
        }
        offset += page_size;
        tokio::time::sleep(delay).await;
    }

    tracing::info!(
        plans = owners.plans_seen,
        owners = owners.len(),
        "Collected scheduled plan owners"
    );
    Ok(owners)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_owners_collapse() {
        let owners: PlanOwners = ["10", "11", "10", "12", "11"]
            .into_iter()
            .map(String::from)
            .collect();

        assert_eq!(owners.len(), 3);
        assert!(owners.contains("10"));
        assert!(!owners.contains("13"));
    }

    #[test]
    fn test_default_is_empty() {
        let owners = PlanOwners::default();
        assert!(owners.is_empty());
        assert_eq!(owners.plans_seen, 0);
    }
}
