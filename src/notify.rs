// 🔔 Notification Sink - transient user-facing messages
//
// Notifications are informational only: nothing reads them back to make a decision.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Default display time, matching the toast duration of the sale counter
pub const DEFAULT_DURATION: Duration = Duration::from_millis(2000);

/// How many notifications the queue keeps before dropping the oldest
const QUEUE_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Notification {
            kind: NotificationKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Notification {
            kind: NotificationKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

/// Fire-and-forget receiver of notifications
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

fn log_notification(notification: &Notification) {
    match notification.kind {
        NotificationKind::Success => tracing::info!(
            title = %notification.title,
            message = %notification.message,
            "notification"
        ),
        NotificationKind::Error => tracing::warn!(
            title = %notification.title,
            message = %notification.message,
            "notification"
        ),
    }
}

// ============================================================================
// QUEUE (TUI status bar)
// ============================================================================

/// Notifications that auto-dismiss after a fixed duration.
pub struct NotificationQueue {
    entries: VecDeque<(Notification, Instant)>,
    duration: Duration,
}

impl NotificationQueue {
    pub fn new(duration: Duration) -> Self {
        NotificationQueue {
            entries: VecDeque::new(),
            duration,
        }
    }

    /// Newest notification that has not expired yet
    pub fn current(&self) -> Option<&Notification> {
        self.current_at(Instant::now())
    }

    pub fn current_at(&self, now: Instant) -> Option<&Notification> {
        self.entries
            .back()
            .filter(|(_, shown_at)| now.saturating_duration_since(*shown_at) < self.duration)
            .map(|(notification, _)| notification)
    }

    /// Drop everything older than the display duration
    pub fn prune(&mut self) {
        self.prune_at(Instant::now());
    }

    pub fn prune_at(&mut self, now: Instant) {
        let duration = self.duration;
        self.entries
            .retain(|(_, shown_at)| now.saturating_duration_since(*shown_at) < duration);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push_at(&mut self, notification: Notification, now: Instant) {
        if self.entries.len() == QUEUE_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back((notification, now));
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}

impl Notifier for NotificationQueue {
    fn notify(&mut self, notification: Notification) {
        log_notification(&notification);
        self.push_at(notification, Instant::now());
    }
}

// ============================================================================
// CONSOLE (CLI subcommands)
// ============================================================================

/// Prints notifications straight to the terminal.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, notification: Notification) {
        log_notification(&notification);
        match notification.kind {
            NotificationKind::Success => {
                println!("✓ {}: {}", notification.title, notification.message)
            }
            NotificationKind::Error => {
                eprintln!("❌ {}: {}", notification.title, notification.message)
            }
        }
    }
}

/// Keeps every notification; used by store tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub received: Vec<Notification>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&Notification> {
        self.received.last()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notification: Notification) {
        self.received.push(notification);
    }
}
