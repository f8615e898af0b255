use dioxus::prelude::*;
use ui::views::TodoListView;

#[component]
pub fn Todos() -> Element {
    rsx! {
        TodoListView {}
    }
}
