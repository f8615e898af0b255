//! Person profile as served by `/person/me`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The current user's profile.
///
/// Only the editable name fields are typed; anything else the backend sends
/// (ids, email, timestamps) is preserved in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Person {
    /// "First Last", trimmed. Empty when both names are blank.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// A string-valued extra field, e.g. `email` or `created_at`.
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }
}

/// Payload of a person response: `{ "person": {...} | null }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonPayload {
    #[serde(default)]
    pub person: Option<Person>,
}

/// Partial update body for `PUT /person/me`. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl PersonUpdate {
    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_fields_survive() {
        let person: Person = serde_json::from_value(json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com"
        }))
        .unwrap();
        assert_eq!(person.full_name(), "Ada Lovelace");
        assert_eq!(person.extra_str("email"), Some("ada@example.com"));

        let back = serde_json::to_value(&person).unwrap();
        assert_eq!(back["email"], "ada@example.com");
    }

    #[test]
    fn test_update_skips_unset_fields() {
        let body = serde_json::to_value(PersonUpdate::default().first_name("A")).unwrap();
        assert_eq!(body, json!({"first_name": "A"}));
    }

    #[test]
    fn test_null_person() {
        let payload: PersonPayload = serde_json::from_value(json!({"person": null})).unwrap();
        assert!(payload.person.is_none());
    }
}
