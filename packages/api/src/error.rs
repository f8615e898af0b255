//! Errors raised below the envelope: the request never produced a usable body.

/// A failed request.
///
/// Application-level failures (`success: false`) are not errors at this
/// layer; they come back as an [`Envelope`](crate::Envelope) for the caller
/// to inspect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server could not be reached, or the connection broke mid-request.
    #[error("{0}")]
    Network(String),
    /// The server answered with a non-2xx status.
    #[error("Request failed with status code {status}")]
    Status {
        status: u16,
        /// `message` from the JSON error body, if the server sent one.
        message: Option<String>,
    },
    /// The body was not the JSON shape we expected.
    #[error("Invalid response body: {0}")]
    Decode(String),
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// The message the server put in its error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if err.is_builder() {
            ApiError::InvalidUrl(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
