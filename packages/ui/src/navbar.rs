use dioxus::prelude::*;

use crate::use_person_state;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Top bar: app title, route links passed as `children`, and the signed-in name.
#[component]
pub fn Navbar(#[props(default = "Todos".to_string())] title: String, children: Element) -> Element {
    let state = use_person_state();
    let name = state()
        .current_person()
        .map(|p| p.full_name())
        .filter(|n| !n.is_empty());

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        nav {
            class: "navbar",
            span { class: "navbar-title", "{title}" }
            div { class: "navbar-links", {children} }
            if let Some(name) = name {
                span { class: "navbar-user", "{name}" }
            }
        }
    }
}
