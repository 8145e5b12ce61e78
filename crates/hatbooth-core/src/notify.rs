//! Transient status notifications.
//!
//! At most one status is visible. Each new notification replaces the current
//! one and restarts the dismiss window, so there is exactly one pending
//! deadline at any time and the latest message always wins.
//!
//! The notifier has no clock of its own; the host passes a monotonic
//! timestamp in milliseconds (e.g. `performance.now()`).

use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Success,
}

/// A status message with its dismiss deadline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub message: String,
    pub severity: Severity,
    /// Timestamp (ms) at which the status disappears
    pub expires_at_ms: f64,
}

/// Single-slot notifier with debounced expiry.
#[derive(Debug, Clone)]
pub struct StatusNotifier {
    window_ms: f64,
    current: Option<Status>,
}

impl Default for StatusNotifier {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl StatusNotifier {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            window_ms: config.notification_window_ms,
            current: None,
        }
    }

    /// Show a message, replacing any current one and restarting the window.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity, now_ms: f64) {
        self.current = Some(Status {
            message: message.into(),
            severity,
            expires_at_ms: now_ms + self.window_ms,
        });
    }

    /// The visible status at `now_ms`, if any.
    pub fn current(&self, now_ms: f64) -> Option<&Status> {
        self.current
            .as_ref()
            .filter(|status| now_ms < status.expires_at_ms)
    }

    /// Deadline of the pending dismissal, for hosts that schedule a timer.
    pub fn pending_deadline(&self) -> Option<f64> {
        self.current.as_ref().map(|status| status.expires_at_ms)
    }

    /// Drop the status once its window has passed. Returns true if it was
    /// dismissed by this call.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        match &self.current {
            Some(status) if now_ms >= status.expires_at_ms => {
                self.current = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let notifier = StatusNotifier::default();
        assert!(notifier.current(0.0).is_none());
        assert!(notifier.pending_deadline().is_none());
    }

    #[test]
    fn test_message_expires_after_window() {
        let mut notifier = StatusNotifier::default();
        notifier.notify("Image loaded successfully", Severity::Success, 100.0);

        let status = notifier.current(500.0).unwrap();
        assert_eq!(status.message, "Image loaded successfully");
        assert_eq!(status.severity, Severity::Success);
        assert!(notifier.current(1099.0).is_some());
        assert!(notifier.current(1100.0).is_none());
    }

    #[test]
    fn test_new_message_restarts_window() {
        let mut notifier = StatusNotifier::default();
        notifier.notify("first", Severity::Success, 0.0);
        notifier.notify("second", Severity::Error, 900.0);

        // The first deadline (1000) no longer applies
        let status = notifier.current(1500.0).unwrap();
        assert_eq!(status.message, "second");
        assert_eq!(notifier.pending_deadline(), Some(1900.0));
        assert!(notifier.current(1900.0).is_none());
    }

    #[test]
    fn test_tick_dismisses_once() {
        let mut notifier = StatusNotifier::default();
        notifier.notify("bye", Severity::Error, 0.0);
        assert!(!notifier.tick(999.0));
        assert!(notifier.tick(1000.0));
        assert!(!notifier.tick(2000.0));
        assert!(notifier.pending_deadline().is_none());
    }

    #[test]
    fn test_custom_window() {
        let config = EditorConfig {
            notification_window_ms: 250.0,
            ..EditorConfig::default()
        };
        let mut notifier = StatusNotifier::new(&config);
        notifier.notify("quick", Severity::Success, 0.0);
        assert!(notifier.current(249.0).is_some());
        assert!(notifier.current(250.0).is_none());
    }
}
