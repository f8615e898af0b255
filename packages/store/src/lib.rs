//! Client-side stores and the small utilities they share.
//!
//! The stores are plain Rust: state sits in a `tokio::sync::watch` channel and
//! actions are async methods, so the same code backs the Dioxus views in `ui`
//! and runs headless in tests against [`api::MockTransport`].

mod cell;
pub mod config;
pub mod datetime;
mod error;
pub mod inflight;
pub mod notify;
pub mod person;
pub mod todo;

pub use config::{ApiConfig, ClientConfig};
pub use error::{ErrorKind, StoreError};
pub use notify::{
    Notification, Notifier, Notify, NotifyColor, NotifyConfig, NotifyKind, NotifyPosition,
    NotifyStyle, RecordingNotifier,
};
pub use person::{PersonState, PersonStore};
pub use todo::{TodoState, TodoStore};
