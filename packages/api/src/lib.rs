//! # API crate — typed REST client for the person and todo backend
//!
//! This crate is the only place that knows how the backend is spoken to. The
//! stores in the `store` crate and the views in `ui` call [`ApiClient`]
//! methods and get back typed [`Envelope`]s.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Wire types: [`Envelope`], [`Person`], [`Todo`], request bodies, [`TodoFilter`] |
//! | [`transport`] | The [`Transport`] trait and the `reqwest`-backed [`HttpTransport`] |
//! | [`client`] | [`ApiClient`], one async method per endpoint |
//! | `mock` | [`MockTransport`], scripted in-memory replies |
//! | `error` | [`ApiError`] |
//!
//! ## Failure layers
//!
//! A call can fail in two distinct ways. If the request never yields a 2xx
//! JSON body, the method returns `Err(ApiError)`. If it does, the method
//! returns `Ok(envelope)` even when `envelope.success` is `false`; the server
//! message then lives in [`Envelope::message`].

pub mod client;
mod error;
mod mock;
pub mod models;
pub mod transport;

pub use client::ApiClient;
pub use error::ApiError;
pub use mock::MockTransport;
pub use models::{
    Ack, Envelope, NewTodo, Person, PersonPayload, PersonUpdate, Todo, TodoFilter, TodoPayload,
    TodoUpdate, UnknownFilter,
};
pub use transport::{HttpTransport, Method, Request, Transport};
