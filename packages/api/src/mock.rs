use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tokio::sync::oneshot;

use crate::error::ApiError;
use crate::transport::{Request, Transport};

type Reply = Result<Value, ApiError>;

enum Scripted {
    Ready(Reply),
    Deferred(oneshot::Receiver<Reply>),
}

#[derive(Default)]
struct MockState {
    replies: VecDeque<Scripted>,
    requests: Vec<Request>,
}

/// In-memory [`Transport`] with scripted replies, for tests and offline demos.
///
/// Replies are consumed in FIFO order, one per request. A deferred reply
/// parks the request until the test resolves it through the returned sender,
/// which is how out-of-order completions are simulated.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a 2xx reply with the given body.
    pub fn reply(&self, body: Value) -> &Self {
        self.lock().replies.push_back(Scripted::Ready(Ok(body)));
        self
    }

    /// Queue a failed reply.
    pub fn fail(&self, err: ApiError) -> &Self {
        self.lock().replies.push_back(Scripted::Ready(Err(err)));
        self
    }

    /// Queue a reply that is only delivered once the sender is used.
    pub fn defer(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.lock().replies.push_back(Scripted::Deferred(rx));
        tx
    }

    /// Every request seen so far, oldest first.
    pub fn requests(&self) -> Vec<Request> {
        self.lock().requests.clone()
    }

    pub fn last_request(&self) -> Option<Request> {
        self.lock().requests.last().cloned()
    }

    pub fn pending_replies(&self) -> usize {
        self.lock().replies.len()
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("MockTransport")
            .field("pending_replies", &state.replies.len())
            .field("requests", &state.requests)
            .finish()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: Request) -> Result<Value, ApiError> {
        let scripted = {
            let mut state = self.lock();
            state.requests.push(request);
            state.replies.pop_front()
        };
        match scripted {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Deferred(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(ApiError::Network("reply dropped".to_string()))),
            None => Err(ApiError::Network("no scripted reply".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_replies_in_order() {
        let mock = MockTransport::new();
        mock.reply(json!({"n": 1})).reply(json!({"n": 2}));

        let a = mock.send(Request::new(Method::Get, "/a")).await.unwrap();
        let b = mock.send(Request::new(Method::Get, "/b")).await.unwrap();
        assert_eq!(a["n"], 1);
        assert_eq!(b["n"], 2);
        assert_eq!(mock.requests().len(), 2);
        assert_eq!(mock.last_request().unwrap().path, "/b");
    }

    #[tokio::test]
    async fn test_unscripted_request_fails() {
        let mock = MockTransport::new();
        let err = mock.send(Request::new(Method::Get, "/x")).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn test_deferred_reply() {
        let mock = MockTransport::new();
        let tx = mock.defer();
        tx.send(Ok(json!({"late": true}))).unwrap();
        let body = mock.send(Request::new(Method::Get, "/late")).await.unwrap();
        assert_eq!(body["late"], true);
    }
}
