use dioxus::prelude::*;

use store::ClientConfig;
use ui::{Navbar, StoreProvider, ToastProvider};
use views::{Profile, Todos};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Todos {},
        #[route("/profile")]
        Profile {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    init_tracing();

    dioxus::launch(App);
}

#[cfg(not(target_arch = "wasm32"))]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_config() -> ClientConfig {
    match ClientConfig::load() {
        Ok(config) => {
            tracing::info!(base_url = %config.api.base_url, "loaded client config");
            config
        }
        Err(e) => {
            tracing::warn!(error = %e, "invalid client config, using defaults");
            ClientConfig::default()
        }
    }
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        ToastProvider {
            StoreProvider {
                config,
                Router::<Route> {}
            }
        }
    }
}

/// Navbar over the routed page.
#[component]
fn Shell() -> Element {
    rsx! {
        Navbar {
            Link { to: Route::Todos {}, "Todos" }
            Link { to: Route::Profile {}, "Profile" }
        }
        Outlet::<Route> {}
    }
}
