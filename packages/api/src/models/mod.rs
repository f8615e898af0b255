//! Wire models exchanged with the backend.

pub(crate) mod envelope;
mod person;
mod todo;

pub use envelope::{Ack, Envelope};
pub use person::{Person, PersonPayload, PersonUpdate};
pub use todo::{NewTodo, Todo, TodoFilter, TodoPayload, TodoUpdate, UnknownFilter};
