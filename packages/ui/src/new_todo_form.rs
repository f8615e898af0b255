use api::NewTodo;
use dioxus::prelude::*;

use crate::use_todo_store;

/// Single-line form that adds a todo and re-fetches the list.
#[component]
pub fn NewTodoForm() -> Element {
    let store = use_todo_store();
    let mut title = use_signal(String::new);
    let mut submitting = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let text = title().trim().to_string();
        if text.is_empty() || submitting() {
            return;
        }
        let store = store.clone();
        spawn(async move {
            submitting.set(true);
            if store.add_todo(NewTodo::new(text)).await.is_ok() {
                title.set(String::new());
                store.refresh().await;
            }
            submitting.set(false);
        });
    };

    rsx! {
        form {
            class: "new-todo",
            onsubmit: handle_submit,
            input {
                r#type: "text",
                placeholder: "What needs to be done?",
                value: title(),
                oninput: move |evt| title.set(evt.value()),
            }
            button {
                class: "primary",
                r#type: "submit",
                disabled: submitting(),
                "Add"
            }
        }
    }
}
