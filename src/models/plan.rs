//! Scheduled plan model.

use serde::Deserialize;

use super::user::{deserialize_id, deserialize_optional_id};

/// Scheduled plan as returned by `scheduled_plans?all_users=true`.
///
/// Only the fields needed to find plan owners are decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduledPlan {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Owning user; plans without an owner do not protect anybody
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub user_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_owner_variants() {
        let plans: Vec<ScheduledPlan> = serde_json::from_str(
            r#"[
                {"id": "1", "name": "Weekly", "user_id": "10"},
                {"id": 2, "user_id": 11},
                {"id": "3", "user_id": null},
                {"id": "4"}
            ]"#,
        )
        .unwrap();

        let owners: Vec<Option<&str>> = plans.iter().map(|p| p.user_id.as_deref()).collect();
        assert_eq!(owners, vec![Some("10"), Some("11"), None, None]);
        assert_eq!(plans[1].id, "2");
    }
}
