//! User-facing notifications raised by effects.
//!
//! Notifications carry a translation key and its parameters. Resolving the
//! key into text is the job of whoever displays the message.

use std::collections::BTreeMap;

use serde::Serialize;

/// Key used when an effect fails in a way its feature did not anticipate.
pub const GENERAL_FAILURE_KEY: &str = "app.general-effect-failure";

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Error,
}

/// A localized, parameterized message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: Level,
    pub key: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
}

impl Notification {
    pub fn info(key: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            key: key.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn error(key: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            key: key.into(),
            params: BTreeMap::new(),
        }
    }

    /// The notification raised for general (unexpected) effect failures.
    pub fn general_failure() -> Self {
        Self::error(GENERAL_FAILURE_KEY)
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(name.into(), value.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

/// Fire-and-forget sink for notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Notifier that emits every notification as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            Level::Info => {
                tracing::info!(key = %notification.key, params = ?notification.params, "notification")
            }
            Level::Error => {
                tracing::error!(key = %notification.key, params = ?notification.params, "notification")
            }
        }
    }
}

/// Notifier that keeps every notification for later inspection.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    recorded: std::sync::Mutex<Vec<Notification>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn recorded(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        self.recorded
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Everything recorded so far, in order.
    pub fn notifications(&self) -> Vec<Notification> {
        self.recorded().clone()
    }

    pub fn errors(&self) -> Vec<Notification> {
        self.notifications()
            .into_iter()
            .filter(Notification::is_error)
            .collect()
    }

    pub fn infos(&self) -> Vec<Notification> {
        self.notifications()
            .into_iter()
            .filter(|n| !n.is_error())
            .collect()
    }

    pub fn clear(&self) {
        self.recorded().clear();
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.recorded().push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_builders() {
        let note = Notification::info("comic-import.started").with_param("count", 3);
        assert_eq!(note.level, Level::Info);
        assert_eq!(note.key, "comic-import.started");
        assert_eq!(note.params.get("count"), Some(&"3".to_string()));
        assert!(!note.is_error());
    }

    #[test]
    fn general_failure_uses_shared_key() {
        let note = Notification::general_failure();
        assert!(note.is_error());
        assert_eq!(note.key, GENERAL_FAILURE_KEY);
        assert!(note.params.is_empty());
    }

    #[test]
    fn recording_notifier_splits_levels() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notification::info("a"));
        notifier.notify(Notification::error("b"));
        notifier.notify(Notification::info("c"));

        assert_eq!(notifier.notifications().len(), 3);
        assert_eq!(notifier.errors().len(), 1);
        assert_eq!(notifier.infos().len(), 2);

        notifier.clear();
        assert!(notifier.notifications().is_empty());
    }
}
