//! Todo items and the list filter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// A single todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Todo {
    pub fn new(id: impl Into<String>, title: impl Into<String>, is_completed: bool) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            is_completed,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Payload of a list response: `{ "todos": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPayload {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub todos: Vec<Todo>,
}

/// `"todos": null` reads as an empty list.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Todo>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Todo>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body for `POST /todo/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    pub title: String,
}

impl NewTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Partial update body for `PUT /todo/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl TodoUpdate {
    pub fn title(mut self, value: impl Into<String>) -> Self {
        self.title = Some(value.into());
        self
    }

    pub fn completed(mut self, value: bool) -> Self {
        self.is_completed = Some(value);
        self
    }
}

/// Which todos to list.
///
/// The UI speaks of "pending" todos; the backend filter keyword for the same
/// set is `incomplete`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TodoFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl TodoFilter {
    pub const ALL: [TodoFilter; 3] = [TodoFilter::All, TodoFilter::Pending, TodoFilter::Completed];

    /// Keyword sent as the `filter` query parameter.
    pub fn query_value(self) -> &'static str {
        match self {
            TodoFilter::All => "all",
            TodoFilter::Pending => "incomplete",
            TodoFilter::Completed => "completed",
        }
    }

    /// Name used by the UI.
    pub fn as_str(self) -> &'static str {
        match self {
            TodoFilter::All => "all",
            TodoFilter::Pending => "pending",
            TodoFilter::Completed => "completed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TodoFilter::All => "All",
            TodoFilter::Pending => "Pending",
            TodoFilter::Completed => "Completed",
        }
    }
}

impl fmt::Display for TodoFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown todo filter: {0}")]
pub struct UnknownFilter(pub String);

impl FromStr for TodoFilter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(TodoFilter::All),
            "pending" | "incomplete" => Ok(TodoFilter::Pending),
            "completed" => Ok(TodoFilter::Completed),
            other => Err(UnknownFilter(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_todo_list_is_empty() {
        let env: crate::models::Envelope<TodoPayload> =
            serde_json::from_value(json!({"success": true, "todos": null})).unwrap();
        assert!(env.success);
        assert!(env.payload.todos.is_empty());

        let env: crate::models::Envelope<TodoPayload> =
            serde_json::from_value(json!({"success": true})).unwrap();
        assert!(env.payload.todos.is_empty());
    }

    #[test]
    fn test_pending_maps_to_incomplete() {
        assert_eq!(TodoFilter::Pending.query_value(), "incomplete");
        assert_eq!(TodoFilter::All.query_value(), "all");
        assert_eq!(TodoFilter::Completed.query_value(), "completed");
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!("pending".parse::<TodoFilter>(), Ok(TodoFilter::Pending));
        assert_eq!("incomplete".parse::<TodoFilter>(), Ok(TodoFilter::Pending));
        assert_eq!("Completed".parse::<TodoFilter>(), Ok(TodoFilter::Completed));
        assert_eq!("".parse::<TodoFilter>(), Ok(TodoFilter::All));
        assert!("done".parse::<TodoFilter>().is_err());
    }

    #[test]
    fn test_todo_defaults() {
        let todo: Todo = serde_json::from_value(json!({"id": "1", "title": "Milk"})).unwrap();
        assert!(!todo.is_completed);
        assert!(todo.created_at.is_none());
    }

    #[test]
    fn test_update_body() {
        let body = serde_json::to_value(TodoUpdate::default().completed(true)).unwrap();
        assert_eq!(body, json!({"is_completed": true}));
    }
}
