//! Toast notifications published by screens
//!
//! Screens publish a [`Notification`] after every user-visible outcome (saved,
//! deleted, failed to load). The render layer subscribes and shows them.
//!
//! ```rust,ignore
//! let bus = NotificationBus::new(64);
//! let mut rx = bus.subscribe();
//!
//! bus.success("Student saved");
//!
//! if let Ok(toast) = rx.recv().await {
//!     println!("{:?}: {}", toast.level, toast.message);
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Severity of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A single toast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

/// Broadcast-based toast channel
///
/// Cheap to clone. Publishing never fails: with no subscribers the toast is
/// dropped, and slow subscribers see `Lagged` on their next `recv()`.
#[derive(Debug, Clone)]
pub struct NotificationBus {
    sender: broadcast::Sender<Notification>,
}

impl NotificationBus {
    /// Create a bus buffering up to `capacity` toasts per subscriber
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish a toast. Returns the number of subscribers reached.
    pub fn publish(&self, notification: Notification) -> usize {
        self.sender.send(notification).unwrap_or(0)
    }

    pub fn success(&self, message: impl Into<String>) -> usize {
        self.publish(Notification::new(NotificationLevel::Success, message))
    }

    pub fn info(&self, message: impl Into<String>) -> usize {
        self.publish(Notification::new(NotificationLevel::Info, message))
    }

    pub fn warning(&self, message: impl Into<String>) -> usize {
        self.publish(Notification::new(NotificationLevel::Warning, message))
    }

    pub fn error(&self, message: impl Into<String>) -> usize {
        self.publish(Notification::new(NotificationLevel::Error, message))
    }

    /// Subscribe to toasts published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new(64)
    }
}
