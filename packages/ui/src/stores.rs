//! Store context and hooks for the UI.

use api::{ApiClient, HttpTransport};
use dioxus::prelude::*;
use store::{ClientConfig, Notify, PersonState, PersonStore, TodoState, TodoStore};

use crate::toast::{use_toasts, ToastNotifier};

pub type AppPersonStore = PersonStore<HttpTransport, ToastNotifier>;
pub type AppTodoStore = TodoStore<HttpTransport, ToastNotifier>;

/// Both stores, sharing one transport and one toast surface.
#[derive(Clone)]
pub struct Stores {
    pub person: AppPersonStore,
    pub todo: AppTodoStore,
}

impl Stores {
    pub fn new(config: &ClientConfig, notifier: ToastNotifier) -> Self {
        let transport = config.transport().unwrap_or_else(|e| {
            tracing::error!(error = %e, "falling back to default HTTP client");
            HttpTransport::new(config.api.base_url.clone())
        });
        let api = ApiClient::new(transport);

        Self {
            person: PersonStore::new(
                api.clone(),
                Notify::with_config(notifier.clone(), config.notify.clone()),
            ),
            todo: TodoStore::new(api, Notify::with_config(notifier, config.notify.clone())),
        }
    }
}

pub fn use_stores() -> Stores {
    use_context::<Stores>()
}

pub fn use_person_store() -> AppPersonStore {
    use_stores().person
}

pub fn use_todo_store() -> AppTodoStore {
    use_stores().todo
}

/// Person state, updated whenever the store publishes.
pub fn use_person_state() -> Signal<PersonState> {
    use_context::<Signal<PersonState>>()
}

/// Todo state, updated whenever the store publishes.
pub fn use_todo_state() -> Signal<TodoState> {
    use_context::<Signal<TodoState>>()
}

/// Provider component that owns the stores.
/// Must be nested inside [`ToastProvider`](crate::ToastProvider).
#[component]
pub fn StoreProvider(config: ClientConfig, children: Element) -> Element {
    let toasts = use_toasts();
    let stores = use_hook(|| Stores::new(&config, ToastNotifier::new(toasts)));

    let mut person_state = use_signal(|| stores.person.state());
    let mut todo_state = use_signal(|| stores.todo.state());

    // Mirror the watch channels into signals so components re-render.
    let person = stores.person.clone();
    use_future(move || {
        let mut rx = person.subscribe();
        async move {
            while rx.changed().await.is_ok() {
                let next = rx.borrow_and_update().clone();
                person_state.set(next);
            }
        }
    });

    let todo = stores.todo.clone();
    use_future(move || {
        let mut rx = todo.subscribe();
        async move {
            while rx.changed().await.is_ok() {
                let next = rx.borrow_and_update().clone();
                todo_state.set(next);
            }
        }
    });

    use_context_provider(|| stores);
    use_context_provider(|| person_state);
    use_context_provider(|| todo_state);

    rsx! {
        {children}
    }
}
