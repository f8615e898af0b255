//! # Notifications — semantic categories mapped to toast styling
//!
//! Stores never talk to a toast widget directly. They go through [`Notify`],
//! which turns a category ([`NotifyKind`]) and a message into a fully styled
//! [`Notification`] and hands it to whatever [`Notifier`] the application
//! installed (the Dioxus toaster in `ui`, or [`RecordingNotifier`] in tests).
//!
//! Styling lives in one table, [`NotifyConfig`], keyed by [`NotifyKind`]:
//!
//! | Kind | Color | Timeout |
//! |------|-------|---------|
//! | failure | negative | 5000 ms |
//! | success | positive | 3000 ms |
//! | info | info | 3000 ms |
//! | warning | warning | 4000 ms |
//!
//! All kinds default to the `top` position. The table can be overridden from
//! the `[notify]` section of the client config.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

pub const DEFAULT_FAILURE_MESSAGE: &str = "An error occurred";
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Success";

/// Semantic category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyKind {
    Failure,
    Success,
    Info,
    Warning,
}

impl NotifyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotifyKind::Failure => "failure",
            NotifyKind::Success => "success",
            NotifyKind::Info => "info",
            NotifyKind::Warning => "warning",
        }
    }
}

impl fmt::Display for NotifyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color token understood by the toast surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyColor {
    Negative,
    Positive,
    Info,
    Warning,
}

impl NotifyColor {
    pub fn as_str(self) -> &'static str {
        match self {
            NotifyColor::Negative => "negative",
            NotifyColor::Positive => "positive",
            NotifyColor::Info => "info",
            NotifyColor::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotifyPosition {
    #[default]
    Top,
    TopLeft,
    TopRight,
    Bottom,
    BottomLeft,
    BottomRight,
    Center,
}

impl NotifyPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            NotifyPosition::Top => "top",
            NotifyPosition::TopLeft => "top-left",
            NotifyPosition::TopRight => "top-right",
            NotifyPosition::Bottom => "bottom",
            NotifyPosition::BottomLeft => "bottom-left",
            NotifyPosition::BottomRight => "bottom-right",
            NotifyPosition::Center => "center",
        }
    }
}

/// How one category of notification is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyStyle {
    pub color: NotifyColor,
    #[serde(default)]
    pub position: NotifyPosition,
    /// Auto-dismiss delay in milliseconds.
    pub timeout_ms: u64,
}

impl NotifyStyle {
    pub const fn new(color: NotifyColor, timeout_ms: u64) -> Self {
        Self {
            color,
            position: NotifyPosition::Top,
            timeout_ms,
        }
    }
}

/// Styling table, one entry per [`NotifyKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default = "default_failure")]
    pub failure: NotifyStyle,
    #[serde(default = "default_success")]
    pub success: NotifyStyle,
    #[serde(default = "default_info")]
    pub info: NotifyStyle,
    #[serde(default = "default_warning")]
    pub warning: NotifyStyle,
}

fn default_failure() -> NotifyStyle {
    NotifyStyle::new(NotifyColor::Negative, 5000)
}

fn default_success() -> NotifyStyle {
    NotifyStyle::new(NotifyColor::Positive, 3000)
}

fn default_info() -> NotifyStyle {
    NotifyStyle::new(NotifyColor::Info, 3000)
}

fn default_warning() -> NotifyStyle {
    NotifyStyle::new(NotifyColor::Warning, 4000)
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            failure: default_failure(),
            success: default_success(),
            info: default_info(),
            warning: default_warning(),
        }
    }
}

impl NotifyConfig {
    pub fn style(&self, kind: NotifyKind) -> NotifyStyle {
        match kind {
            NotifyKind::Failure => self.failure,
            NotifyKind::Success => self.success,
            NotifyKind::Info => self.info,
            NotifyKind::Warning => self.warning,
        }
    }
}

/// A message ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotifyKind,
    pub message: String,
    pub style: NotifyStyle,
}

/// The rendering surface for notifications.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

/// Keeps every notification in memory instead of rendering it.
#[derive(Clone, Debug, Default)]
pub struct RecordingNotifier {
    seen: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    /// `(kind, message)` pairs, oldest first.
    pub fn messages(&self) -> Vec<(NotifyKind, String)> {
        self.lock()
            .iter()
            .map(|n| (n.kind, n.message.clone()))
            .collect()
    }

    pub fn last(&self) -> Option<Notification> {
        self.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.lock().push(notification);
    }
}

/// Category-aware front end over a [`Notifier`].
#[derive(Clone, Debug)]
pub struct Notify<N> {
    notifier: N,
    config: NotifyConfig,
}

impl<N: Notifier> Notify<N> {
    pub fn new(notifier: N) -> Self {
        Self::with_config(notifier, NotifyConfig::default())
    }

    pub fn with_config(notifier: N, config: NotifyConfig) -> Self {
        Self { notifier, config }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn config(&self) -> &NotifyConfig {
        &self.config
    }

    /// Style and dispatch a message of the given kind.
    pub fn show(&self, kind: NotifyKind, message: impl Into<String>) {
        let message = message.into();
        match kind {
            NotifyKind::Failure => tracing::warn!(%kind, "{message}"),
            _ => tracing::debug!(%kind, "{message}"),
        }
        self.notifier.notify(Notification {
            kind,
            message,
            style: self.config.style(kind),
        });
    }

    pub fn failure(&self, message: Option<&str>) {
        self.show(
            NotifyKind::Failure,
            message.unwrap_or(DEFAULT_FAILURE_MESSAGE),
        );
    }

    pub fn success(&self, message: Option<&str>) {
        self.show(
            NotifyKind::Success,
            message.unwrap_or(DEFAULT_SUCCESS_MESSAGE),
        );
    }

    pub fn info(&self, message: &str) {
        self.show(NotifyKind::Info, message);
    }

    pub fn warning(&self, message: &str) {
        self.show(NotifyKind::Warning, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let config = NotifyConfig::default();
        assert_eq!(
            config.style(NotifyKind::Failure),
            NotifyStyle::new(NotifyColor::Negative, 5000)
        );
        assert_eq!(
            config.style(NotifyKind::Success),
            NotifyStyle::new(NotifyColor::Positive, 3000)
        );
        assert_eq!(config.style(NotifyKind::Info).timeout_ms, 3000);
        assert_eq!(config.style(NotifyKind::Warning).timeout_ms, 4000);
        assert_eq!(config.style(NotifyKind::Warning).position, NotifyPosition::Top);
    }

    #[test]
    fn test_default_messages() {
        let notify = Notify::new(RecordingNotifier::new());
        notify.failure(None);
        notify.success(None);
        notify.failure(Some("Disk full"));

        assert_eq!(
            notify.notifier().messages(),
            vec![
                (NotifyKind::Failure, "An error occurred".to_string()),
                (NotifyKind::Success, "Success".to_string()),
                (NotifyKind::Failure, "Disk full".to_string()),
            ]
        );
    }

    #[test]
    fn test_info_and_warning_carry_their_style() {
        let notify = Notify::new(RecordingNotifier::new());
        notify.info("Syncing");
        notify.warning("Offline");

        let seen = notify.notifier().notifications();
        assert_eq!(seen[0].style.color, NotifyColor::Info);
        assert_eq!(seen[0].style.timeout_ms, 3000);
        assert_eq!(seen[1].style.color, NotifyColor::Warning);
        assert_eq!(seen[1].style.timeout_ms, 4000);
    }

    #[test]
    fn test_custom_table() {
        let mut config = NotifyConfig::default();
        config.failure.timeout_ms = 8000;
        config.failure.position = NotifyPosition::Bottom;
        let notify = Notify::with_config(RecordingNotifier::new(), config);
        notify.failure(None);

        let last = notify.notifier().last().unwrap();
        assert_eq!(last.style.timeout_ms, 8000);
        assert_eq!(last.style.position, NotifyPosition::Bottom);
    }
}
