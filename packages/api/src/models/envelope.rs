//! # Response envelope
//!
//! Every backend response is wrapped in the same JSON shape:
//!
//! ```json
//! { "success": true, "message": "optional", "...": "payload fields" }
//! ```
//!
//! [`Envelope`] keeps the two well-known keys and flattens everything else into
//! the payload type `T`. A body without a `success` key is treated as a failed
//! response rather than a decode error, so callers always get to inspect the
//! server message.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Payload for endpoints whose body carries nothing beyond the envelope keys.
pub type Ack = Map<String, Value>;

/// The `{success, message, ...payload}` wrapper used by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Envelope<T> {
    /// A successful envelope around `payload`.
    pub fn ok(payload: T) -> Self {
        Self {
            success: true,
            message: None,
            payload,
        }
    }

    /// The server message, ignoring blank strings.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}

/// Pull the `message` key out of an arbitrary JSON body, if it is a non-blank string.
pub(crate) fn message_of(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Count {
        count: u32,
    }

    #[test]
    fn test_payload_is_flattened() {
        let env: Envelope<Count> =
            serde_json::from_value(json!({"success": true, "count": 3})).unwrap();
        assert!(env.success);
        assert_eq!(env.payload, Count { count: 3 });
        assert!(env.message().is_none());
    }

    #[test]
    fn test_missing_success_reads_as_failure() {
        let env: Envelope<Ack> =
            serde_json::from_value(json!({"message": "nope"})).unwrap();
        assert!(!env.success);
        assert_eq!(env.message(), Some("nope"));
    }

    #[test]
    fn test_blank_message_is_ignored() {
        let env: Envelope<Ack> =
            serde_json::from_value(json!({"success": false, "message": "  "})).unwrap();
        assert!(env.message().is_none());
        assert!(message_of(&json!({"message": ""})).is_none());
        assert!(message_of(&json!({"message": 4})).is_none());
    }
}
