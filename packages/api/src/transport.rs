//! # Transport — the seam between typed endpoints and the network
//!
//! [`Transport`] moves one JSON request to the backend and hands back the JSON
//! body of a 2xx response. Everything above it ([`ApiClient`](crate::ApiClient)
//! and the stores) is written against the trait, so the same code runs on the
//! real network ([`HttpTransport`]) and against scripted replies
//! ([`MockTransport`](crate::MockTransport)).
//!
//! Contract for implementations:
//!
//! - 2xx → `Ok(body)`; an empty body becomes `Value::Null`.
//! - non-2xx → [`ApiError::Status`], carrying the body's `message` if present.
//! - connection failures → [`ApiError::Network`].

use std::fmt;

use serde_json::Value;

use crate::error::ApiError;
use crate::models::envelope::message_of;

/// HTTP verbs used by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One outgoing request. `path` is relative to the API base URL and may carry
/// a query string.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Async interface for sending requests to the backend.
pub trait Transport {
    fn send(
        &self,
        request: Request,
    ) -> impl std::future::Future<Output = Result<Value, ApiError>>;
}

/// [`Transport`] over HTTP, backed by a shared `reqwest::Client`.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Transport with default client settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Transport with a per-request timeout. Browsers manage their own
    /// timeouts, so the value is ignored on wasm.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, ApiError> {
        #[cfg(not(target_arch = "wasm32"))]
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        #[cfg(target_arch = "wasm32")]
        let client = {
            let _ = timeout;
            reqwest::Client::new()
        };
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Value, ApiError> {
        let url = self.url(&request.path);
        let mut builder = self.client.request(request.method.into(), &url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::Null);
            tracing::debug!("{} {} -> {}", request.method, url, status);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: message_of(&body),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let t = HttpTransport::new("http://localhost:8000/");
        assert_eq!(t.url("/todo/?filter=all"), "http://localhost:8000/todo/?filter=all");
        assert_eq!(t.url("person/me"), "http://localhost:8000/person/me");

        let t = HttpTransport::new("https://example.com/api");
        assert_eq!(t.url("/todo/bulk"), "https://example.com/api/todo/bulk");
    }

    #[test]
    fn test_request_display() {
        let req = Request::new(Method::Patch, "/todo/mark-all-completed");
        assert_eq!(req.to_string(), "PATCH /todo/mark-all-completed");
    }
}
