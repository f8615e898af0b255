//! # Todo store — the user's todo list
//!
//! The server owns the list. [`TodoStore::fetch_todos`] is the only action that
//! writes the local collection; every mutation just reports whether the server
//! accepted it, and the caller re-fetches (usually through
//! [`TodoStore::refresh`]) to see the result.
//!
//! | Action | Request | Default failure message |
//! |--------|---------|-------------------------|
//! | [`fetch_todos`](TodoStore::fetch_todos) | `GET /todo/?filter=…` | `Failed to fetch todos` |
//! | [`add_todo`](TodoStore::add_todo) | `POST /todo/` | `Failed to add todo` |
//! | [`update_todo`](TodoStore::update_todo) | `PUT /todo/{id}` | `Failed to update todo` |
//! | [`delete_todo`](TodoStore::delete_todo) | `DELETE /todo/{id}` | `Failed to delete todo` |
//! | [`bulk_delete_todo`](TodoStore::bulk_delete_todo) | `DELETE /todo/bulk` | `Failed to delete completed todos` |
//! | [`mark_all_as_completed`](TodoStore::mark_all_as_completed) | `PATCH /todo/mark-all-completed` | `Failed to mark all as completed` |
//! | [`mark_all_as_pending`](TodoStore::mark_all_as_pending) | `PATCH /todo/mark-all-pending` | `Failed to mark all as pending` |
//!
//! `fetch_todos` reports its outcome as a `bool` after toasting any failure;
//! the mutations return `Result<(), StoreError>`.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use api::{Ack, ApiClient, ApiError, Envelope, NewTodo, Todo, TodoFilter, TodoPayload, TodoUpdate, Transport};

use crate::cell::{Loading, StateCell};
use crate::error::StoreError;
use crate::notify::{Notifier, Notify};

pub const FETCH_TODOS_FAILED: &str = "Failed to fetch todos";
pub const ADD_TODO_FAILED: &str = "Failed to add todo";
pub const UPDATE_TODO_FAILED: &str = "Failed to update todo";
pub const DELETE_TODO_FAILED: &str = "Failed to delete todo";
pub const BULK_DELETE_FAILED: &str = "Failed to delete completed todos";
pub const MARK_ALL_COMPLETED_FAILED: &str = "Failed to mark all as completed";
pub const MARK_ALL_PENDING_FAILED: &str = "Failed to mark all as pending";
pub const COMPLETED_CLEARED: &str = "Completed todos cleared";

/// Snapshot of the todo store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoState {
    /// Last successful list response, or `None` before the first one.
    pub todos: Option<Envelope<TodoPayload>>,
    pub loading: bool,
    /// Filter of the last applied fetch.
    pub filter: TodoFilter,
    /// Filter of the last fetch started, whether or not it succeeded.
    pub requested: TodoFilter,
}

impl TodoState {
    pub fn is_loaded(&self) -> bool {
        self.todos.is_some()
    }

    pub fn all_todos(&self) -> &[Todo] {
        self.todos
            .as_ref()
            .map(|env| env.payload.todos.as_slice())
            .unwrap_or_default()
    }

    pub fn active_todos(&self) -> Vec<&Todo> {
        self.all_todos().iter().filter(|t| !t.is_completed).collect()
    }

    pub fn completed_todos(&self) -> Vec<&Todo> {
        self.all_todos().iter().filter(|t| t.is_completed).collect()
    }

    pub fn todo_count(&self) -> usize {
        self.all_todos().len()
    }

    pub fn active_count(&self) -> usize {
        self.all_todos().iter().filter(|t| !t.is_completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.todo_count() - self.active_count()
    }
}

impl Loading for TodoState {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}

struct Inner<T: Transport, N> {
    api: ApiClient<T>,
    notify: Notify<N>,
    cell: StateCell<TodoState>,
}

/// Client-side store for the todo list. Cheap to clone.
pub struct TodoStore<T: Transport, N> {
    inner: Arc<Inner<T, N>>,
}

impl<T: Transport, N> Clone for TodoStore<T, N> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport, N: Notifier> TodoStore<T, N> {
    pub fn new(api: ApiClient<T>, notify: Notify<N>) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                notify,
                cell: StateCell::new(TodoState::default()),
            }),
        }
    }

    pub fn state(&self) -> TodoState {
        self.inner.cell.snapshot()
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<TodoState> {
        self.inner.cell.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.cell.read(|s| s.loading)
    }

    pub fn all_todos(&self) -> Vec<Todo> {
        self.inner.cell.read(|s| s.all_todos().to_vec())
    }

    pub fn active_todos(&self) -> Vec<Todo> {
        self.inner
            .cell
            .read(|s| s.active_todos().into_iter().cloned().collect())
    }

    pub fn completed_todos(&self) -> Vec<Todo> {
        self.inner
            .cell
            .read(|s| s.completed_todos().into_iter().cloned().collect())
    }

    pub fn todo_count(&self) -> usize {
        self.inner.cell.read(TodoState::todo_count)
    }

    pub fn active_count(&self) -> usize {
        self.inner.cell.read(TodoState::active_count)
    }

    /// Replace the local list with the server's view for `filter`.
    ///
    /// Returns `true` when the server answered successfully. A response that
    /// was overtaken by a newer fetch is dropped but still counts as success.
    pub async fn fetch_todos(&self, filter: TodoFilter) -> bool {
        tracing::debug!(%filter, "fetching todos");
        let cell = &self.inner.cell;
        let ticket = cell.begin();
        let read = cell.begin_read();
        cell.modify(|s| s.requested = filter);

        let outcome = match self.inner.api.list_todos(filter).await {
            Ok(env) if env.success => {
                cell.publish(read, |s| {
                    s.todos = Some(env);
                    s.filter = filter;
                });
                Ok(())
            }
            Ok(env) => Err(StoreError::rejected(env.message(), FETCH_TODOS_FAILED)),
            Err(err) => Err(StoreError::transport(&err, FETCH_TODOS_FAILED)),
        };

        if let Err(err) = &outcome {
            self.inner.notify.failure(Some(&err.message));
        }
        cell.finish(ticket);
        outcome.is_ok()
    }

    /// Re-fetch with the filter of the last requested fetch.
    pub async fn refresh(&self) -> bool {
        let filter = self.inner.cell.read(|s| s.requested);
        self.fetch_todos(filter).await
    }

    pub async fn add_todo(&self, todo: NewTodo) -> Result<(), StoreError> {
        tracing::debug!(title = %todo.title, "adding todo");
        self.mutate(self.inner.api.create_todo(&todo), ADD_TODO_FAILED, None)
            .await
    }

    pub async fn update_todo(&self, id: &str, update: TodoUpdate) -> Result<(), StoreError> {
        tracing::debug!(id, ?update, "updating todo");
        self.mutate(
            self.inner.api.update_todo(id, &update),
            UPDATE_TODO_FAILED,
            None,
        )
        .await
    }

    pub async fn delete_todo(&self, id: &str) -> Result<(), StoreError> {
        tracing::debug!(id, "deleting todo");
        self.mutate(self.inner.api.delete_todo(id), DELETE_TODO_FAILED, None)
            .await
    }

    /// Delete every completed todo.
    pub async fn bulk_delete_todo(&self) -> Result<(), StoreError> {
        tracing::debug!("deleting completed todos");
        self.mutate(
            self.inner.api.delete_completed(),
            BULK_DELETE_FAILED,
            Some(COMPLETED_CLEARED),
        )
        .await
    }

    pub async fn mark_all_as_completed(&self) -> Result<(), StoreError> {
        tracing::debug!("marking all todos completed");
        self.mutate(
            self.inner.api.mark_all_completed(),
            MARK_ALL_COMPLETED_FAILED,
            None,
        )
        .await
    }

    pub async fn mark_all_as_pending(&self) -> Result<(), StoreError> {
        tracing::debug!("marking all todos pending");
        self.mutate(
            self.inner.api.mark_all_pending(),
            MARK_ALL_PENDING_FAILED,
            None,
        )
        .await
    }

    async fn mutate(
        &self,
        call: impl Future<Output = Result<Envelope<Ack>, ApiError>>,
        default: &str,
        success: Option<&str>,
    ) -> Result<(), StoreError> {
        let ticket = self.inner.cell.begin();

        let outcome = match call.await {
            Ok(env) if env.success => Ok(()),
            Ok(env) => Err(StoreError::rejected(env.message(), default)),
            Err(err) => Err(StoreError::transport(&err, default)),
        };

        match &outcome {
            Ok(()) => {
                if let Some(message) = success {
                    self.inner.notify.success(Some(message));
                }
            }
            Err(err) => self.inner.notify.failure(Some(&err.message)),
        }
        self.inner.cell.finish(ticket);
        outcome
    }
}
