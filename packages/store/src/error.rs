use api::ApiError;

/// Why a store action failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No usable response: network failure, non-2xx status, or a bad body.
    Transport,
    /// The server answered with `success: false`.
    Rejected,
}

/// Error returned by store actions, carrying the message already shown to
/// the user.
///
/// The message is picked in priority order: the server's own message, then
/// the transport error's text, then the action's default.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct StoreError {
    pub kind: ErrorKind,
    pub message: String,
}

impl StoreError {
    pub fn rejected(server_message: Option<&str>, default: &str) -> Self {
        Self {
            kind: ErrorKind::Rejected,
            message: server_message.unwrap_or(default).to_string(),
        }
    }

    pub fn transport(err: &ApiError, default: &str) -> Self {
        let message = match err.server_message() {
            Some(message) => message.to_string(),
            None => {
                let text = err.to_string();
                if text.trim().is_empty() {
                    default.to_string()
                } else {
                    text
                }
            }
        };
        Self {
            kind: ErrorKind::Transport,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_priority() {
        let server = ApiError::Status {
            status: 422,
            message: Some("Title is required".to_string()),
        };
        assert_eq!(
            StoreError::transport(&server, "Failed to add todo").message,
            "Title is required"
        );

        let bare = ApiError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(
            StoreError::transport(&bare, "Failed to add todo").message,
            "Request failed with status code 500"
        );

        let silent = ApiError::Network(String::new());
        assert_eq!(
            StoreError::transport(&silent, "Failed to add todo").message,
            "Failed to add todo"
        );
    }

    #[test]
    fn test_rejected_falls_back_to_default() {
        let err = StoreError::rejected(None, "Failed to fetch todos");
        assert_eq!(err.kind, ErrorKind::Rejected);
        assert_eq!(err.to_string(), "Failed to fetch todos");
    }
}
