use api::TodoFilter;
use dioxus::prelude::*;
use store::StoreError;

use crate::{use_todo_state, use_todo_store, AppTodoStore, NewTodoForm, TodoItem};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

async fn refresh_after(store: &AppTodoStore, outcome: Result<(), StoreError>) {
    if outcome.is_ok() {
        store.refresh().await;
    }
}

#[component]
fn FilterTab(filter: TodoFilter, active: bool) -> Element {
    let store = use_todo_store();

    rsx! {
        button {
            class: if active { "filter-tab active" } else { "filter-tab" },
            onclick: move |_| {
                let store = store.clone();
                spawn(async move {
                    store.fetch_todos(filter).await;
                });
            },
            "{filter.label()}"
        }
    }
}

/// Shared todo list view: filter tabs, add form, items and bulk actions.
#[component]
pub fn TodoListView() -> Element {
    let store = use_todo_store();
    let state = use_todo_state();

    // Initial load with whatever filter was last requested.
    let loader = store.clone();
    use_hook(move || {
        spawn(async move {
            loader.refresh().await;
        });
    });

    let mark_all_completed = {
        let store = store.clone();
        move |_| {
            let store = store.clone();
            spawn(async move {
                let outcome = store.mark_all_as_completed().await;
                refresh_after(&store, outcome).await;
            });
        }
    };

    let mark_all_pending = {
        let store = store.clone();
        move |_| {
            let store = store.clone();
            spawn(async move {
                let outcome = store.mark_all_as_pending().await;
                refresh_after(&store, outcome).await;
            });
        }
    };

    let clear_completed = move |_| {
        let store = store.clone();
        spawn(async move {
            let outcome = store.bulk_delete_todo().await;
            refresh_after(&store, outcome).await;
        });
    };

    let current = state();
    let active = current.active_count();
    let completed = current.completed_count();
    let items_label = if active == 1 { "item" } else { "items" };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page",

            h1 { class: "view-title", "Todos" }

            NewTodoForm {}

            div {
                class: "todo-filters",
                for filter in TodoFilter::ALL {
                    FilterTab {
                        key: "{filter.as_str()}",
                        filter,
                        active: current.filter == filter,
                    }
                }
                if current.loading {
                    span { class: "loading-indicator", "Loading..." }
                }
            }

            if current.is_loaded() && current.todo_count() == 0 {
                p { class: "empty-state", "Nothing to do." }
            }

            ul {
                class: "todo-list",
                for todo in current.all_todos().iter().cloned() {
                    TodoItem { key: "{todo.id}", todo }
                }
            }

            div {
                class: "todo-footer",
                span { class: "todo-count", "{active} {items_label} left" }
                div {
                    class: "form-actions",
                    button {
                        class: "secondary",
                        disabled: current.loading,
                        onclick: mark_all_completed,
                        "Mark all completed"
                    }
                    button {
                        class: "secondary",
                        disabled: current.loading,
                        onclick: mark_all_pending,
                        "Mark all pending"
                    }
                    if completed > 0 {
                        button {
                            class: "secondary",
                            disabled: current.loading,
                            onclick: clear_completed,
                            "Clear completed ({completed})"
                        }
                    }
                }
            }
        }
    }
}
