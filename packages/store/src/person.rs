//! # Person store — the signed-in user's profile
//!
//! Holds the last successful `/person/me` envelope. Both actions replace the
//! stored envelope wholesale with what the server returned; nothing is merged
//! with the previous value.
//!
//! | Action | Request | On success | Default failure message |
//! |--------|---------|------------|-------------------------|
//! | [`fetch_person`](PersonStore::fetch_person) | `GET /person/me` | replace state | `Failed to fetch person data` |
//! | [`update_person`](PersonStore::update_person) | `PUT /person/me` | replace state, success toast | `Failed to update person data` |
//!
//! On failure the store shows a failure toast, leaves state untouched, and
//! returns a [`StoreError`] carrying the same message.

use std::sync::Arc;

use tokio::sync::watch;

use api::{ApiClient, Envelope, Person, PersonPayload, PersonUpdate, Transport};

use crate::cell::{Loading, StateCell};
use crate::error::StoreError;
use crate::inflight::Ticket;
use crate::notify::{Notifier, Notify};

pub const FETCH_PERSON_FAILED: &str = "Failed to fetch person data";
pub const UPDATE_PERSON_FAILED: &str = "Failed to update person data";
pub const PERSON_UPDATED: &str = "Profile updated successfully";

/// Snapshot of the person store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonState {
    /// Last successful response, or `None` before the first one.
    pub person: Option<Envelope<PersonPayload>>,
    pub loading: bool,
}

impl PersonState {
    /// The nested profile, if one has been loaded.
    pub fn current_person(&self) -> Option<&Person> {
        self.person.as_ref().and_then(|env| env.payload.person.as_ref())
    }
}

impl Loading for PersonState {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}

struct Inner<T: Transport, N> {
    api: ApiClient<T>,
    notify: Notify<N>,
    cell: StateCell<PersonState>,
}

/// Client-side store for the current user's profile. Cheap to clone.
pub struct PersonStore<T: Transport, N> {
    inner: Arc<Inner<T, N>>,
}

impl<T: Transport, N> Clone for PersonStore<T, N> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport, N: Notifier> PersonStore<T, N> {
    pub fn new(api: ApiClient<T>, notify: Notify<N>) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                notify,
                cell: StateCell::new(PersonState::default()),
            }),
        }
    }

    pub fn state(&self) -> PersonState {
        self.inner.cell.snapshot()
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<PersonState> {
        self.inner.cell.subscribe()
    }

    pub fn current_person(&self) -> Option<Person> {
        self.inner.cell.read(|s| s.current_person().cloned())
    }

    pub fn is_loading(&self) -> bool {
        self.inner.cell.read(|s| s.loading)
    }

    /// Load the current user's profile.
    pub async fn fetch_person(&self) -> Result<(), StoreError> {
        tracing::debug!("fetching person");
        let ticket = self.inner.cell.begin();
        let read = self.inner.cell.begin_read();

        let outcome = self
            .accept(self.inner.api.get_person().await, read, FETCH_PERSON_FAILED);
        self.settle(ticket, outcome)
    }

    /// Send a partial profile update and adopt the server's answer.
    pub async fn update_person(&self, fields: PersonUpdate) -> Result<(), StoreError> {
        tracing::debug!(?fields, "updating person");
        let ticket = self.inner.cell.begin();
        let read = self.inner.cell.begin_read();

        let outcome = self.accept(
            self.inner.api.update_person(&fields).await,
            read,
            UPDATE_PERSON_FAILED,
        );
        if outcome.is_ok() {
            self.inner.notify.success(Some(PERSON_UPDATED));
        }
        self.settle(ticket, outcome)
    }

    fn accept(
        &self,
        response: Result<Envelope<PersonPayload>, api::ApiError>,
        read: Ticket,
        default: &str,
    ) -> Result<(), StoreError> {
        match response {
            Ok(env) if env.success => {
                self.inner.cell.publish(read, |s| s.person = Some(env));
                Ok(())
            }
            Ok(env) => Err(StoreError::rejected(env.message(), default)),
            Err(err) => Err(StoreError::transport(&err, default)),
        }
    }

    fn settle(&self, ticket: Ticket, outcome: Result<(), StoreError>) -> Result<(), StoreError> {
        if let Err(err) = &outcome {
            self.inner.notify.failure(Some(&err.message));
        }
        self.inner.cell.finish(ticket);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{NotifyKind, RecordingNotifier};
    use crate::ErrorKind;
    use api::{ApiError, MockTransport};
    use serde_json::json;

    type Store = PersonStore<MockTransport, RecordingNotifier>;

    fn setup() -> (Store, MockTransport, RecordingNotifier) {
        let mock = MockTransport::new();
        let notifier = RecordingNotifier::new();
        let store = PersonStore::new(ApiClient::new(mock.clone()), Notify::new(notifier.clone()));
        (store, mock, notifier)
    }

    fn ada() -> serde_json::Value {
        json!({
            "success": true,
            "person": {
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com"
            }
        })
    }

    #[tokio::test]
    async fn test_initial_state() {
        let (store, _, _) = setup();
        assert!(store.current_person().is_none());
        assert!(!store.is_loading());
        assert_eq!(store.state(), PersonState::default());
    }

    #[tokio::test]
    async fn test_fetch_stores_whole_envelope() {
        let (store, mock, notifier) = setup();
        mock.reply(ada());

        store.fetch_person().await.unwrap();

        let state = store.state();
        assert!(!state.loading);
        let env = state.person.as_ref().unwrap();
        assert!(env.success);
        let person = store.current_person().unwrap();
        assert_eq!(person.full_name(), "Ada Lovelace");
        assert_eq!(person.extra_str("email"), Some("ada@example.com"));
        assert!(notifier.notifications().is_empty());
        assert_eq!(mock.last_request().unwrap().path, "/person/me");
    }

    #[tokio::test]
    async fn test_null_person_reads_as_none() {
        let (store, mock, _) = setup();
        mock.reply(json!({"success": true, "person": null}));
        store.fetch_person().await.unwrap();
        assert!(store.state().person.is_some());
        assert!(store.current_person().is_none());
    }

    #[tokio::test]
    async fn test_rejected_fetch_keeps_state() {
        let (store, mock, notifier) = setup();
        mock.reply(ada());
        store.fetch_person().await.unwrap();
        let before = store.state();

        mock.reply(json!({"success": false, "message": "Session expired"}));
        let err = store.fetch_person().await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::Rejected);
        assert_eq!(err.message, "Session expired");
        assert_eq!(store.state(), before);
        assert!(!store.is_loading());
        assert_eq!(
            notifier.messages(),
            vec![(NotifyKind::Failure, "Session expired".to_string())]
        );
    }

    #[tokio::test]
    async fn test_rejected_fetch_without_message_uses_default() {
        let (store, mock, notifier) = setup();
        mock.reply(json!({"success": false}));
        let err = store.fetch_person().await.unwrap_err();
        assert_eq!(err.message, FETCH_PERSON_FAILED);
        assert_eq!(notifier.last().unwrap().message, FETCH_PERSON_FAILED);
        assert!(store.state().person.is_none());
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let (store, mock, notifier) = setup();
        mock.fail(ApiError::Network("connection refused".to_string()));

        let err = store.fetch_person().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Transport);
        assert_eq!(err.message, "connection refused");
        assert!(!store.is_loading());
        assert_eq!(notifier.last().unwrap().style.timeout_ms, 5000);
    }

    #[tokio::test]
    async fn test_update_replaces_without_merging() {
        let (store, mock, notifier) = setup();
        mock.reply(ada());
        store.fetch_person().await.unwrap();

        mock.reply(json!({"success": true, "person": {"first_name": "A"}}));
        store
            .update_person(PersonUpdate::default().first_name("A"))
            .await
            .unwrap();

        let person = store.current_person().unwrap();
        assert_eq!(person.first_name, "A");
        assert_eq!(person.last_name, "");
        assert!(person.extra.is_empty());

        let req = mock.last_request().unwrap();
        assert_eq!(req.method, api::Method::Put);
        assert_eq!(req.body, Some(json!({"first_name": "A"})));
        assert_eq!(
            notifier.messages(),
            vec![(NotifyKind::Success, PERSON_UPDATED.to_string())]
        );
    }

    #[tokio::test]
    async fn test_failed_update_reports_server_message() {
        let (store, mock, notifier) = setup();
        mock.fail(ApiError::Status {
            status: 422,
            message: Some("First name too long".to_string()),
        });

        let err = store
            .update_person(PersonUpdate::default().first_name("A".repeat(300)))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "First name too long");
        assert_eq!(
            notifier.messages(),
            vec![(NotifyKind::Failure, "First name too long".to_string())]
        );
        assert!(store.current_person().is_none());
    }

    #[tokio::test]
    async fn test_loading_while_in_flight() {
        let (store, mock, _) = setup();
        let reply = mock.defer();

        let (result, seen_loading) = tokio::join!(store.fetch_person(), async {
            tokio::task::yield_now().await;
            let loading = store.is_loading();
            let _ = reply.send(Ok(ada()));
            loading
        });

        assert!(result.is_ok());
        assert!(seen_loading);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_subscribers_see_updates() {
        let (store, mock, _) = setup();
        let mut rx = store.subscribe();
        mock.reply(ada());
        store.fetch_person().await.unwrap();

        assert!(rx.has_changed().unwrap());
        let state = rx.borrow_and_update().clone();
        assert_eq!(state.current_person().unwrap().first_name, "Ada");
    }
}
