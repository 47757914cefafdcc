//! Looker user model and id handling.

use serde::{Deserialize, Deserializer};

/// Looker user as returned by `users/search` with the
/// `id,display_name,email` field projection.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    /// User ID (string in API 4.0, number on older instances)
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Display name (may be null for API-only users)
    #[serde(default)]
    pub display_name: Option<String>,
    /// Email address (may be null)
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// Accept an id given either as a JSON string or a JSON number.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

/// Nullable variant of [`deserialize_id`].
pub(crate) fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_with_string_id() {
        let user: User = serde_json::from_str(
            r#"{"id": "42", "display_name": "Ada Lovelace", "email": "ada@example.com"}"#,
        )
        .unwrap();
        assert_eq!(user.id, "42");
        assert_eq!(user.display_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(user.email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn test_user_with_numeric_id_and_missing_fields() {
        let user: User = serde_json::from_str(r#"{"id": 7, "email": null}"#).unwrap();
        assert_eq!(user.id, "7");
        assert!(user.display_name.is_none());
        assert!(user.email.is_none());
    }
}
