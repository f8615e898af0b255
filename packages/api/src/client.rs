//! # Typed endpoints
//!
//! [`ApiClient`] wraps a [`Transport`] and exposes one method per backend
//! endpoint. Each method builds the request, sends it, and decodes the body
//! into an [`Envelope`]. It does not look at `success`: deciding what a
//! rejected envelope means is the caller's job.
//!
//! | Method | Verb | Path |
//! |--------|------|------|
//! | [`get_person`](ApiClient::get_person) | GET | `/person/me` |
//! | [`update_person`](ApiClient::update_person) | PUT | `/person/me` |
//! | [`list_todos`](ApiClient::list_todos) | GET | `/todo/?filter={all,incomplete,completed}` |
//! | [`create_todo`](ApiClient::create_todo) | POST | `/todo/` |
//! | [`update_todo`](ApiClient::update_todo) | PUT | `/todo/{id}` |
//! | [`delete_todo`](ApiClient::delete_todo) | DELETE | `/todo/{id}` |
//! | [`delete_completed`](ApiClient::delete_completed) | DELETE | `/todo/bulk` |
//! | [`mark_all_completed`](ApiClient::mark_all_completed) | PATCH | `/todo/mark-all-completed` |
//! | [`mark_all_pending`](ApiClient::mark_all_pending) | PATCH | `/todo/mark-all-pending` |

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::models::{
    Ack, Envelope, NewTodo, PersonPayload, PersonUpdate, TodoFilter, TodoPayload, TodoUpdate,
};
use crate::transport::{Method, Request, Transport};

pub const PERSON_ME: &str = "/person/me";
pub const TODO_ROOT: &str = "/todo/";
pub const TODO_BULK: &str = "/todo/bulk";
pub const TODO_MARK_ALL_COMPLETED: &str = "/todo/mark-all-completed";
pub const TODO_MARK_ALL_PENDING: &str = "/todo/mark-all-pending";

/// Typed client for the person and todo endpoints.
#[derive(Clone, Debug)]
pub struct ApiClient<T: Transport> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn call<R: DeserializeOwned>(&self, request: Request) -> Result<Envelope<R>, ApiError> {
        tracing::trace!("sending {}", request);
        let body = self.transport.send(request).await?;
        // A bare `null` body still has to decode into an envelope.
        let body = if body.is_null() {
            Value::Object(Default::default())
        } else {
            body
        };
        Ok(serde_json::from_value(body)?)
    }

    fn with_json<B: Serialize>(request: Request, body: &B) -> Result<Request, ApiError> {
        Ok(request.with_body(serde_json::to_value(body)?))
    }

    pub async fn get_person(&self) -> Result<Envelope<PersonPayload>, ApiError> {
        self.call(Request::new(Method::Get, PERSON_ME)).await
    }

    pub async fn update_person(
        &self,
        update: &PersonUpdate,
    ) -> Result<Envelope<PersonPayload>, ApiError> {
        let request = Self::with_json(Request::new(Method::Put, PERSON_ME), update)?;
        self.call(request).await
    }

    pub async fn list_todos(&self, filter: TodoFilter) -> Result<Envelope<TodoPayload>, ApiError> {
        let path = format!("{TODO_ROOT}?filter={}", filter.query_value());
        self.call(Request::new(Method::Get, path)).await
    }

    pub async fn create_todo(&self, todo: &NewTodo) -> Result<Envelope<Ack>, ApiError> {
        let request = Self::with_json(Request::new(Method::Post, TODO_ROOT), todo)?;
        self.call(request).await
    }

    pub async fn update_todo(
        &self,
        id: &str,
        update: &TodoUpdate,
    ) -> Result<Envelope<Ack>, ApiError> {
        let request = Self::with_json(Request::new(Method::Put, todo_path(id)), update)?;
        self.call(request).await
    }

    pub async fn delete_todo(&self, id: &str) -> Result<Envelope<Ack>, ApiError> {
        self.call(Request::new(Method::Delete, todo_path(id))).await
    }

    /// Delete every completed todo.
    pub async fn delete_completed(&self) -> Result<Envelope<Ack>, ApiError> {
        self.call(Request::new(Method::Delete, TODO_BULK)).await
    }

    pub async fn mark_all_completed(&self) -> Result<Envelope<Ack>, ApiError> {
        self.call(Request::new(Method::Patch, TODO_MARK_ALL_COMPLETED))
            .await
    }

    pub async fn mark_all_pending(&self) -> Result<Envelope<Ack>, ApiError> {
        self.call(Request::new(Method::Patch, TODO_MARK_ALL_PENDING))
            .await
    }
}

/// `/todo/{id}` with the id encoded as a single path segment.
fn todo_path(id: &str) -> String {
    format!("{TODO_ROOT}{}", urlencoding::encode(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use serde_json::json;

    fn client() -> ApiClient<MockTransport> {
        ApiClient::new(MockTransport::new())
    }

    #[tokio::test]
    async fn test_list_todos_request() {
        let api = client();
        api.transport().reply(json!({
            "success": true,
            "todos": [{"id": "t1", "title": "Milk", "is_completed": false}]
        }));

        let env = api.list_todos(TodoFilter::Pending).await.unwrap();
        assert!(env.success);
        assert_eq!(env.payload.todos.len(), 1);

        let req = api.transport().last_request().unwrap();
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.path, "/todo/?filter=incomplete");
        assert!(req.body.is_none());
    }

    #[tokio::test]
    async fn test_update_person_sends_partial_body() {
        let api = client();
        api.transport().reply(json!({"success": true, "person": {"first_name": "A"}}));

        let env = api
            .update_person(&PersonUpdate::default().first_name("A"))
            .await
            .unwrap();
        assert_eq!(env.payload.person.unwrap().first_name, "A");

        let req = api.transport().last_request().unwrap();
        assert_eq!(req.method, Method::Put);
        assert_eq!(req.path, "/person/me");
        assert_eq!(req.body, Some(json!({"first_name": "A"})));
    }

    #[tokio::test]
    async fn test_endpoint_paths() {
        let api = client();
        for _ in 0..6 {
            api.transport().reply(json!({"success": true}));
        }

        api.create_todo(&NewTodo::new("Bread")).await.unwrap();
        api.update_todo("t9", &TodoUpdate::default().title("Rye"))
            .await
            .unwrap();
        api.delete_todo("t9").await.unwrap();
        api.delete_completed().await.unwrap();
        api.mark_all_completed().await.unwrap();
        api.mark_all_pending().await.unwrap();

        let seen: Vec<(Method, String)> = api
            .transport()
            .requests()
            .into_iter()
            .map(|r| (r.method, r.path))
            .collect();
        assert_eq!(
            seen,
            vec![
                (Method::Post, "/todo/".to_string()),
                (Method::Put, "/todo/t9".to_string()),
                (Method::Delete, "/todo/t9".to_string()),
                (Method::Delete, "/todo/bulk".to_string()),
                (Method::Patch, "/todo/mark-all-completed".to_string()),
                (Method::Patch, "/todo/mark-all-pending".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_todo_id_is_one_path_segment() {
        let api = client();
        api.transport().reply(json!({"success": true}));
        api.transport().reply(json!({"success": true}));

        api.delete_todo("a/b?x").await.unwrap();
        assert_eq!(api.transport().last_request().unwrap().path, "/todo/a%2Fb%3Fx");

        api.update_todo("with space#1", &TodoUpdate::default().completed(true))
            .await
            .unwrap();
        assert_eq!(
            api.transport().last_request().unwrap().path,
            "/todo/with%20space%231"
        );
    }

    #[tokio::test]
    async fn test_null_body_decodes_as_failed_envelope() {
        let api = client();
        api.transport().reply(Value::Null);
        let env = api.delete_completed().await.unwrap();
        assert!(!env.success);
    }

    #[tokio::test]
    async fn test_transport_error_passes_through() {
        let api = client();
        api.transport().fail(ApiError::Status {
            status: 404,
            message: Some("Todo not found".to_string()),
        });
        let err = api.delete_todo("missing").await.unwrap_err();
        assert_eq!(err.server_message(), Some("Todo not found"));
    }
}
