//! Transient, non-blocking user notifications.

use chrono::{DateTime, Duration, Utc};
use std::collections::VecDeque;

/// Maximum number of notifications kept at once.
pub const MAX_NOTIFICATIONS: usize = 5;

/// How long a notification stays visible.
pub const NOTIFICATION_TTL_SECS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Bounded queue of notifications, newest last.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    entries: VecDeque<Notification>,
    /// Total ever pushed; lets callers notice a push even when the queue is full.
    pushed: u64,
}

impl Notifications {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a notification stamped with the current time.
    pub fn push(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.push_at(level, message, Utc::now());
    }

    /// Queues a notification with an explicit timestamp.
    ///
    /// # Parameters
    ///
    /// - `level`: severity, which picks the colour
    /// - `message`: text shown in the toast
    /// - `now`: time the toast was raised, used for expiry
    ///
    /// The oldest entry is dropped when the queue is full.
    pub fn push_at(&mut self, level: NotificationLevel, message: impl Into<String>, now: DateTime<Utc>) {
        let message = message.into();
        tracing::debug!(?level, %message, "notification");
        if self.entries.len() == MAX_NOTIFICATIONS {
            self.entries.pop_front();
        }
        self.entries.push_back(Notification {
            level,
            message,
            created_at: now,
        });
        self.pushed += 1;
    }

    /// Count of notifications ever pushed, including dropped ones.
    #[must_use]
    pub const fn pushed(&self) -> u64 {
        self.pushed
    }

    /// Shorthand for an info-level [`push`](Self::push).
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NotificationLevel::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NotificationLevel::Success, message);
    }

    /// Shorthand for an error-level push.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NotificationLevel::Error, message);
    }

    /// Drops notifications older than the TTL. Returns whether any expired.
    pub fn expire(&mut self, now: DateTime<Utc>) -> bool {
        let ttl = Duration::seconds(NOTIFICATION_TTL_SECS);
        let before = self.entries.len();
        self.entries.retain(|n| now - n.created_at < ttl);
        before != self.entries.len()
    }

    /// The notification shown in the status line.
    #[must_use]
    pub fn latest(&self) -> Option<&Notification> {
        self.entries.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Live notifications, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_is_capped() {
        let mut notes = Notifications::new();
        for i in 0..8 {
            notes.info(format!("note {i}"));
        }
        assert_eq!(notes.len(), MAX_NOTIFICATIONS);
        assert_eq!(notes.iter().next().map(|n| n.message.as_str()), Some("note 3"));
        assert_eq!(notes.latest().map(|n| n.message.as_str()), Some("note 7"));
        assert_eq!(notes.pushed(), 8);
    }

    #[test]
    fn entries_expire_after_ttl() {
        let start = Utc::now();
        let mut notes = Notifications::new();
        notes.push_at(NotificationLevel::Error, "old", start);
        notes.push_at(NotificationLevel::Success, "new", start + Duration::seconds(4));

        assert!(!notes.expire(start + Duration::seconds(4)));
        assert!(notes.expire(start + Duration::seconds(6)));
        assert_eq!(notes.latest().map(|n| n.message.as_str()), Some("new"));
        assert!(notes.expire(start + Duration::seconds(10)));
        assert!(notes.is_empty());
    }
}
