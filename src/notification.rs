//! Decode notifications.
//!
//! The decoder never prints and never reads global state to decide what to
//! report. Every diagnostic produced by a session lands in the
//! [`NotificationCollection`] owned by that session, filtered by the
//! [`DebugLevel`] the caller configured.

use std::fmt;

/// Verbosity of a decode session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DebugLevel {
    /// Only warnings, errors and not-implemented notes are kept.
    #[default]
    None,
    /// Per-record trace lines are kept as well.
    Debug,
}

/// Category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// Trace output, recorded only at [`DebugLevel::Debug`].
    Debug,
    /// A record kind the decoder skips on purpose.
    NotImplemented,
    /// Non-fatal problem (missing member, absent end block).
    Warning,
    /// A record failed to decode and was skipped.
    Error,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "Debug"),
            Self::NotImplemented => write!(f, "NotImplemented"),
            Self::Warning => write!(f, "Warning"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// One diagnostic line. Messages about a record start with its handle.
#[derive(Debug, Clone)]
pub struct Notification {
    pub notification_type: NotificationType,
    pub message: String,
}

impl Notification {
    pub fn new(notification_type: NotificationType, message: impl Into<String>) -> Self {
        Self {
            notification_type,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.notification_type, self.message)
    }
}

/// Diagnostics of one decode session.
#[derive(Debug, Clone, Default)]
pub struct NotificationCollection {
    level: DebugLevel,
    items: Vec<Notification>,
}

impl NotificationCollection {
    /// Create an empty collection at [`DebugLevel::None`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty collection with an explicit verbosity.
    pub fn with_level(level: DebugLevel) -> Self {
        Self {
            level,
            items: Vec::new(),
        }
    }

    /// Active verbosity.
    pub fn level(&self) -> DebugLevel {
        self.level
    }

    /// Record a notification. `Debug` and `NotImplemented` entries are
    /// dropped unless the collection runs at [`DebugLevel::Debug`].
    pub fn notify(&mut self, notification_type: NotificationType, message: impl Into<String>) {
        if matches!(
            notification_type,
            NotificationType::Debug | NotificationType::NotImplemented
        ) && self.level == DebugLevel::None
        {
            return;
        }
        self.items.push(Notification::new(notification_type, message));
    }

    /// Shorthand for a [`NotificationType::Debug`] entry.
    pub fn debug(&mut self, message: impl Into<String>) {
        self.notify(NotificationType::Debug, message);
    }

    /// Shorthand for a [`NotificationType::Warning`] entry.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.notify(NotificationType::Warning, message);
    }

    /// Shorthand for a [`NotificationType::Error`] entry.
    pub fn error(&mut self, message: impl Into<String>) {
        self.notify(NotificationType::Error, message);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Notifications in the order they were recorded.
    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    /// Entries of one category.
    pub fn of_type(&self, nt: NotificationType) -> Vec<&Notification> {
        self.items.iter().filter(|n| n.notification_type == nt).collect()
    }

    pub fn has_type(&self, nt: NotificationType) -> bool {
        self.items.iter().any(|n| n.notification_type == nt)
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
