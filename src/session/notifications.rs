//! Notification queue with deadline-driven auto-expiry.
//!
//! Expiry never uses wall-clock timers. Each timed notification pushes a
//! `(deadline, id)` pair onto a min-heap; the event loop calls
//! [`NotificationQueue::expire_due`] with the current instant each tick, and
//! tests drive the same path with synthetic instants. A deadline whose
//! notification was already removed by hand falls through the idempotent
//! remove and does nothing.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;
use std::time::{Duration, Instant};

use super::store::SessionCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NotificationId(pub u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notification-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// An action button attached to a notification. The original design carried
/// a callback; here the payload is a plain command the shell dispatches, so
/// notifications stay inert data.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationAction {
    pub label: String,
    pub command: SessionCommand,
    pub primary: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub duration: Option<Duration>,
    pub actions: Vec<NotificationAction>,
    pub created_at: Instant,
}

/// Everything the caller supplies; id and timestamp are assigned on add.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRequest {
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub duration: Option<Duration>,
    pub actions: Vec<NotificationAction>,
}

impl NotificationRequest {
    pub fn new(
        severity: Severity,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
            duration: None,
            actions: Vec::new(),
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, title, message)
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Success, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, title, message)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_action(mut self, action: NotificationAction) -> Self {
        self.actions.push(action);
        self
    }
}

#[derive(Debug)]
pub struct NotificationQueue {
    entries: Vec<Notification>,
    deadlines: BinaryHeap<Reverse<(Instant, NotificationId)>>,
    next_id: u64,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            deadlines: BinaryHeap::new(),
            next_id: 1,
        }
    }

    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.entries.iter().find(|n| n.id == id)
    }

    /// Assigns identity and timestamp, appends, and schedules expiry when a
    /// positive duration was requested.
    pub fn add(&mut self, request: NotificationRequest, now: Instant) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        if let Some(duration) = request.duration
            && duration > Duration::ZERO
        {
            self.deadlines.push(Reverse((now + duration, id)));
        }
        tracing::debug!(
            notification_id = %id,
            severity = request.severity.as_str(),
            "queued notification"
        );
        self.entries.push(Notification {
            id,
            title: request.title,
            message: request.message,
            severity: request.severity,
            duration: request.duration,
            actions: request.actions,
            created_at: now,
        });
        id
    }

    /// Idempotent removal: removing twice, or after expiry already fired,
    /// leaves the queue unchanged.
    pub fn remove(&mut self, id: NotificationId) {
        self.entries.retain(|n| n.id != id);
    }

    /// Empties the queue and drops every pending deadline.
    pub fn clear_all(&mut self) {
        self.entries.clear();
        self.deadlines.clear();
    }

    /// Removes every notification whose deadline has passed; returns the ids
    /// that actually expired. Deadlines for ids no longer present are
    /// discarded silently.
    pub fn expire_due(&mut self, now: Instant) -> Vec<NotificationId> {
        let mut expired = Vec::new();
        while let Some(Reverse((deadline, id))) = self.deadlines.peek().copied() {
            if deadline > now {
                break;
            }
            self.deadlines.pop();
            if self.get(id).is_some() {
                self.remove(id);
                expired.push(id);
            }
        }
        expired
    }

    /// The soonest pending deadline, for callers that want to sleep no
    /// longer than necessary.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.peek().map(|Reverse((deadline, _))| *deadline)
    }
}
