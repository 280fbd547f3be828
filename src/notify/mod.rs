//! Transient notifications shown to the signed-in user.
//!
//! Notifications expire after a fixed lifetime. Expired entries are dropped
//! whenever a new one is raised or the list is read, so the queue never
//! holds more than what was raised within one lifetime.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NotificationCenter {
    ttl: Duration,
    next_id: u64,
    active: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new(ttl: std::time::Duration) -> Self {
        Self {
            ttl: Duration::from_std(ttl).unwrap_or_else(|_| Duration::days(365)),
            next_id: 1,
            active: Vec::new(),
        }
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(NotificationKind::Success, message.into())
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(NotificationKind::Error, message.into())
    }

    fn push(&mut self, kind: NotificationKind, message: String) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        let created_at = Utc::now();
        self.prune(created_at);
        let expires_at = created_at
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        tracing::debug!(id, ?kind, %message, "Notification raised");
        self.active.push(Notification {
            id,
            kind,
            message,
            created_at,
            expires_at,
        });
        id
    }

    /// Remove a notification. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.active.len();
        self.active.retain(|n| n.id != id);
        before != self.active.len()
    }

    /// Notifications still visible at `now`.
    pub fn active(&self, now: DateTime<Utc>) -> Vec<Notification> {
        self.active
            .iter()
            .filter(|n| n.expires_at > now)
            .cloned()
            .collect()
    }

    /// Drop every notification that expired at or before `now`.
    pub fn prune(&mut self, now: DateTime<Utc>) {
        self.active.retain(|n| n.expires_at > now);
    }
}
