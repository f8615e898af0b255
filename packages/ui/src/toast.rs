//! Toast notifications: the rendering side of [`store::Notifier`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;
use store::{Notification, Notifier, NotifyPosition};

const TOAST_CSS: Asset = asset!("/assets/styling/toast.css");

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
}

/// Toasts currently on screen, oldest first.
#[derive(Clone, Debug, Default)]
pub struct ToastQueue {
    pub toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }
}

pub fn use_toasts() -> Signal<ToastQueue> {
    use_context::<Signal<ToastQueue>>()
}

/// [`Notifier`] that pushes into the toast queue and removes each toast once
/// its style's timeout has elapsed.
#[derive(Clone)]
pub struct ToastNotifier {
    queue: Signal<ToastQueue>,
    next_id: Arc<AtomicU64>,
}

impl ToastNotifier {
    pub fn new(queue: Signal<ToastQueue>) -> Self {
        Self {
            queue,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, notification: Notification) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let timeout = Duration::from_millis(notification.style.timeout_ms);
        let mut queue = self.queue;
        queue.write().toasts.push(Toast { id, notification });

        // Outlives the component that triggered the toast.
        spawn_forever(async move {
            sleep(timeout).await;
            queue.write().dismiss(id);
        });
    }
}

async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

fn position_class(position: NotifyPosition) -> &'static str {
    match position {
        NotifyPosition::Top => "toast-stack toast-stack--top",
        NotifyPosition::TopLeft => "toast-stack toast-stack--top-left",
        NotifyPosition::TopRight => "toast-stack toast-stack--top-right",
        NotifyPosition::Bottom => "toast-stack toast-stack--bottom",
        NotifyPosition::BottomLeft => "toast-stack toast-stack--bottom-left",
        NotifyPosition::BottomRight => "toast-stack toast-stack--bottom-right",
        NotifyPosition::Center => "toast-stack toast-stack--center",
    }
}

/// Provides the toast queue and renders it above `children`.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    use_context_provider(|| Signal::new(ToastQueue::default()));

    rsx! {
        {children}
        Toaster {}
    }
}

/// Renders every queued toast, grouped by position. Click a toast to dismiss it.
#[component]
pub fn Toaster() -> Element {
    let mut queue = use_toasts();
    let toasts = queue().toasts;

    let mut positions: Vec<NotifyPosition> = Vec::new();
    for toast in &toasts {
        let position = toast.notification.style.position;
        if !positions.contains(&position) {
            positions.push(position);
        }
    }

    rsx! {
        document::Link { rel: "stylesheet", href: TOAST_CSS }

        for position in positions {
            div {
                key: "{position.as_str()}",
                class: position_class(position),
                for toast in toasts.iter().filter(|t| t.notification.style.position == position).cloned() {
                    div {
                        key: "{toast.id}",
                        class: "toast toast--{toast.notification.style.color.as_str()}",
                        role: "status",
                        onclick: move |_| queue.write().dismiss(toast.id),
                        "{toast.notification.message}"
                    }
                }
            }
        }
    }
}
