use api::{Todo, TodoUpdate};
use dioxus::prelude::*;
use store::datetime::{format_date_and_time, get_relative_time};

use crate::use_todo_store;

/// One row of the todo list: checkbox, title (double-click to rename), delete.
#[component]
pub fn TodoItem(todo: Todo) -> Element {
    let store = use_todo_store();
    let mut editing = use_signal(|| false);
    let mut draft = use_signal(String::new);

    let id = todo.id.clone();
    let completed = todo.is_completed;

    let toggle = {
        let store = store.clone();
        let id = id.clone();
        move |_| {
            let store = store.clone();
            let id = id.clone();
            spawn(async move {
                let update = TodoUpdate::default().completed(!completed);
                if store.update_todo(&id, update).await.is_ok() {
                    store.refresh().await;
                }
            });
        }
    };

    let remove = {
        let store = store.clone();
        let id = id.clone();
        move |_| {
            let store = store.clone();
            let id = id.clone();
            spawn(async move {
                if store.delete_todo(&id).await.is_ok() {
                    store.refresh().await;
                }
            });
        }
    };

    let title = todo.title.clone();
    let start_edit = move |_| {
        draft.set(title.clone());
        editing.set(true);
    };

    let original = todo.title.clone();
    let commit = move || {
        editing.set(false);
        let next = draft().trim().to_string();
        if next.is_empty() || next == original {
            return;
        }
        let store = store.clone();
        let id = id.clone();
        spawn(async move {
            if store.update_todo(&id, TodoUpdate::default().title(next)).await.is_ok() {
                store.refresh().await;
            }
        });
    };
    let mut commit_on_key = commit.clone();
    let mut commit_on_blur = commit;

    let created = todo.created_at.as_deref();
    let age = get_relative_time(created);
    let stamp = format_date_and_time(created);

    rsx! {
        li {
            class: if completed { "todo-item completed" } else { "todo-item" },

            input {
                r#type: "checkbox",
                checked: completed,
                onchange: toggle,
            }

            if editing() {
                input {
                    class: "todo-title-input",
                    r#type: "text",
                    value: draft(),
                    autofocus: true,
                    oninput: move |evt| draft.set(evt.value()),
                    onkeydown: move |evt: KeyboardEvent| match evt.key() {
                        Key::Enter => commit_on_key(),
                        Key::Escape => editing.set(false),
                        _ => {}
                    },
                    onblur: move |_| {
                        if editing() {
                            commit_on_blur();
                        }
                    },
                }
            } else {
                span {
                    class: "todo-title",
                    ondoubleclick: start_edit,
                    "{todo.title}"
                }
            }

            span {
                class: "todo-age",
                title: "{stamp}",
                "{age}"
            }

            button {
                class: "todo-delete",
                title: "Delete",
                onclick: remove,
                "×"
            }
        }
    }
}
