//! Notifications
//!
//! Ephemeral toast messages. Expiry is deadline-based so the center itself
//! needs no timer; the UI schedules `remove` (or calls `prune_expired`).

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

const DEFAULT_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    notifications: Vec<Notification>,
}

/// Shared handle to the list of visible notifications
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    inner: Arc<Mutex<Inner>>,
    ttl: Duration,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl NotificationCenter {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Appends a notification and returns its id
    pub fn add(&self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        let message = message.into();
        log::debug!("notification #{} ({:?}): {}", id, kind, message);
        inner.notifications.push(Notification {
            id,
            message,
            kind,
            created_at: Utc::now(),
        });
        id
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.add(message, NotificationKind::Info)
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.add(message, NotificationKind::Success)
    }

    pub fn warning(&self, message: impl Into<String>) -> u64 {
        self.add(message, NotificationKind::Warning)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.add(message, NotificationKind::Error)
    }

    /// Returns whether a notification with that id was present
    pub fn remove(&self, id: u64) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.notifications.len();
        inner.notifications.retain(|n| n.id != id);
        inner.notifications.len() != before
    }

    /// Drops everything older than the TTL as of `now`; returns how many went
    pub fn prune_expired(&self, now: DateTime<Utc>) -> usize {
        let ttl = TimeDelta::milliseconds(self.ttl.as_millis() as i64);
        let mut inner = self.inner.lock();
        let before = inner.notifications.len();
        inner.notifications.retain(|n| now - n.created_at < ttl);
        before - inner.notifications.len()
    }

    /// Oldest first
    pub fn notifications(&self) -> Vec<Notification> {
        self.inner.lock().notifications.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().notifications.is_empty()
    }
}
