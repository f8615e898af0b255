use api::{Person, PersonUpdate};
use dioxus::prelude::*;
use store::datetime::format_date;

use crate::{use_person_state, use_person_store};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Name fields to show in the form for the stored person.
fn form_fields(person: Option<Person>) -> Option<(String, String)> {
    person.map(|p| (p.first_name, p.last_name))
}

/// Shared profile view: current person plus a name form.
#[component]
pub fn ProfileView() -> Element {
    let store = use_person_store();
    let state = use_person_state();
    let mut first_name = use_signal(String::new);
    let mut last_name = use_signal(String::new);
    let mut saving = use_signal(|| false);

    // Load on mount, then seed the form from whatever came back.
    let loader = store.clone();
    use_hook(move || {
        spawn(async move {
            if loader.fetch_person().await.is_ok() {
                if let Some((first, last)) = form_fields(loader.current_person()) {
                    first_name.set(first);
                    last_name.set(last);
                }
            }
        });
    });

    let handle_save = move |evt: FormEvent| {
        evt.prevent_default();
        if saving() {
            return;
        }
        let store = store.clone();
        let update = PersonUpdate::default()
            .first_name(first_name().trim())
            .last_name(last_name().trim());
        spawn(async move {
            saving.set(true);
            if store.update_person(update).await.is_ok() {
                if let Some((first, last)) = form_fields(store.current_person()) {
                    first_name.set(first);
                    last_name.set(last);
                }
            }
            saving.set(false);
        });
    };

    let current = state();
    let person = current.current_person().cloned();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page",

            h1 { class: "view-title", "Profile" }

            if current.loading && person.is_none() {
                p { class: "loading-indicator", "Loading..." }
            }

            if let Some(person) = person {
                div {
                    class: "profile-card",
                    h2 {
                        if person.full_name().is_empty() { "Unnamed" } else { "{person.full_name()}" }
                    }
                    if let Some(email) = person.extra_str("email") {
                        p { class: "profile-email", "{email}" }
                    }
                    if let Some(joined) = person.extra_str("created_at") {
                        p { class: "form-help", "Member since {format_date(joined)}" }
                    }
                }
            } else if current.person.is_some() {
                p { class: "empty-state", "No profile yet." }
            }

            form {
                class: "settings-section",
                onsubmit: handle_save,

                div {
                    class: "form-field",
                    label { r#for: "first-name", "First name" }
                    input {
                        id: "first-name",
                        r#type: "text",
                        value: first_name(),
                        oninput: move |evt| first_name.set(evt.value()),
                    }
                }

                div {
                    class: "form-field",
                    label { r#for: "last-name", "Last name" }
                    input {
                        id: "last-name",
                        r#type: "text",
                        value: last_name(),
                        oninput: move |evt| last_name.set(evt.value()),
                    }
                }

                div {
                    class: "form-actions",
                    button {
                        class: "primary",
                        r#type: "submit",
                        disabled: saving(),
                        if saving() { "Saving..." } else { "Save" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{ApiClient, MockTransport};
    use serde_json::json;
    use store::{Notify, PersonStore, RecordingNotifier};

    #[tokio::test]
    async fn test_form_follows_server_answer_after_save() {
        let mock = MockTransport::new();
        let store = PersonStore::new(
            ApiClient::new(mock.clone()),
            Notify::new(RecordingNotifier::new()),
        );
        mock.reply(json!({
            "success": true,
            "person": {"first_name": "Ada", "last_name": "Lovelace"}
        }));

        let sent = PersonUpdate::default().first_name("  ada ").last_name("lovelace");
        store.update_person(sent).await.unwrap();

        assert_eq!(
            form_fields(store.current_person()),
            Some(("Ada".to_string(), "Lovelace".to_string()))
        );
    }

    #[test]
    fn test_no_person_leaves_form_alone() {
        assert_eq!(form_fields(None), None);
    }
}
