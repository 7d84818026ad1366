// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for toast lifecycle tracking.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Where a notification came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationSource {
    /// Direct call on the manager.
    Direct,
    /// Request posted through a `Notifier` handle.
    Notifier,
    /// Adopted from a server-rendered status banner.
    StatusMessage,
    /// Produced by an inbound application event.
    Event { name: String },
    /// Produced by response headers.
    Response,
}

/// A diagnostic event with its capture time.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self::with_timestamp(kind, Instant::now())
    }

    #[must_use]
    pub fn with_timestamp(kind: DiagnosticEventKind, timestamp: Instant) -> Self {
        Self { timestamp, kind }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// A toast was appended to the container.
    NotificationShown {
        id: String,
        severity: String,
        /// `None` for persistent toasts.
        #[serde(skip_serializing_if = "Option::is_none")]
        duration_ms: Option<u64>,
        source: NotificationSource,
    },

    /// A toast entered its exit animation.
    NotificationHidden { id: String },

    /// A toast was detached and unregistered.
    NotificationRemoved { id: String },

    /// The page session started.
    SessionStarted {
        status_messages: usize,
        forms: usize,
    },

    /// The page session ended.
    SessionEnded { cancelled_timers: usize },

    /// A submit control switched to its loading label.
    SubmitLocked { form: usize },

    /// A submit control got its label back.
    SubmitRestored { form: usize },

    /// Non-critical warning (ignored event, unreadable page, ...).
    Warning { message: String },

    /// Error at an edge of the system (config, page loading, transport).
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_event_new_sets_timestamp() {
        let before = Instant::now();
        let event = DiagnosticEvent::new(DiagnosticEventKind::Warning {
            message: "w".into(),
        });
        let after = Instant::now();

        assert!(event.timestamp >= before);
        assert!(event.timestamp <= after);
    }

    #[test]
    fn shown_event_serializes_with_source() {
        let kind = DiagnosticEventKind::NotificationShown {
            id: "notification-7".into(),
            severity: "success".into(),
            duration_ms: Some(3000),
            source: NotificationSource::Event {
                name: "cart:item-added".into(),
            },
        };

        let json = serde_json::to_string(&kind).expect("serialization should succeed");
        assert!(json.contains("\"type\":\"notification_shown\""));
        assert!(json.contains("\"kind\":\"event\""));
        assert!(json.contains("\"name\":\"cart:item-added\""));
        assert!(json.contains("\"duration_ms\":3000"));
    }

    #[test]
    fn persistent_toast_omits_duration() {
        let kind = DiagnosticEventKind::NotificationShown {
            id: "notification-1".into(),
            severity: "info".into(),
            duration_ms: None,
            source: NotificationSource::Direct,
        };

        let json = serde_json::to_string(&kind).expect("serialization should succeed");
        assert!(!json.contains("duration_ms"));
    }

    #[test]
    fn warning_deserializes_from_json() {
        let json = r#"{"type":"warning","message":"ignored"}"#;
        let event: DiagnosticEventKind =
            serde_json::from_str(json).expect("deserialization should succeed");

        assert_eq!(
            event,
            DiagnosticEventKind::Warning {
                message: "ignored".into()
            }
        );
    }
}
