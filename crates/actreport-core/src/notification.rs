//! User-facing notifications
//!
//! The form never fails loudly: validation problems, rejected files and
//! submission failures all end up as a [`Notification`] handed to a
//! [`Notifier`]. Front ends decide how to show them; the CLI logs them and the
//! tests collect them in memory.

use std::sync::Mutex;

use serde::Serialize;

use crate::error::{ErrorMetadata, LogLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Default,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
        }
    }

    /// Build the destructive notification describing `err`
    pub fn from_error<E: ErrorMetadata + ?Sized>(err: &E) -> Self {
        Self::destructive(err.notification_title(), err.client_message())
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == NotificationVariant::Destructive
    }
}

/// Receives notifications meant for the person filling the form
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Emits notifications as log events
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.variant {
            NotificationVariant::Default => tracing::info!(
                title = %notification.title,
                "{}",
                notification.description
            ),
            NotificationVariant::Destructive => tracing::warn!(
                title = %notification.title,
                "{}",
                notification.description
            ),
        }
    }
}

/// Keeps every notification in memory, in order
#[derive(Default)]
pub struct MemoryNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .map(|list| list.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<Notification> {
        self.notifications
            .lock()
            .ok()
            .and_then(|list| list.last().cloned())
    }

    pub fn len(&self) -> usize {
        self.notifications.lock().map(|list| list.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut list) = self.notifications.lock() {
            list.push(notification);
        }
    }
}

/// Log `err` at the level its metadata asks for
pub fn log_error<E: ErrorMetadata + std::fmt::Display + ?Sized>(err: &E) {
    match err.log_level() {
        LogLevel::Debug => tracing::debug!(error = %err, "{}", err.notification_title()),
        LogLevel::Warn => tracing::warn!(error = %err, "{}", err.notification_title()),
        LogLevel::Error => tracing::error!(error = %err, "{}", err.notification_title()),
    }
}
