//! This crate contains all shared UI for the workspace.
//!
//! Wrap the app in [`ToastProvider`] and then [`StoreProvider`]; the views
//! reach the stores through the `use_*` hooks.

mod navbar;
pub use navbar::Navbar;

mod toast;
pub use toast::{use_toasts, Toast, ToastNotifier, ToastProvider, ToastQueue, Toaster};

mod stores;
pub use stores::{
    use_person_state, use_person_store, use_stores, use_todo_state, use_todo_store,
    AppPersonStore, AppTodoStore, StoreProvider, Stores,
};

mod todo_item;
pub use todo_item::TodoItem;

mod new_todo_form;
pub use new_todo_form::NewTodoForm;

pub mod views;
