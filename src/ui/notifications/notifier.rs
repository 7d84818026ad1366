// SPDX-License-Identifier: MPL-2.0
//! Cloneable handle for posting notifications from outside the UI loop.
//!
//! The manager is owned by the UI thread. Code that runs elsewhere (async
//! request middleware, background tasks) gets a [`Notifier`] instead; its
//! requests are applied by `Manager::tick`.

use super::notification::{Lifetime, NotificationId, Severity};
use crate::diagnostics::NotificationSource;
use crossbeam_channel::Sender;

/// A request queued for the manager.
#[derive(Debug, Clone)]
pub(crate) enum Request {
    Show {
        id: NotificationId,
        message: String,
        severity: Severity,
        /// `None` selects the manager's default duration.
        lifetime: Option<Lifetime>,
        source: NotificationSource,
    },
    Hide(NotificationId),
    HideAll,
}

/// Handle exposing the public notification API to any thread.
///
/// Ids are allocated when the request is posted, so `show` can return one
/// immediately even though the toast appears on the manager's next tick.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: Sender<Request>,
}

impl Notifier {
    pub(crate) fn new(tx: Sender<Request>) -> Self {
        Self { tx }
    }

    fn post(
        &self,
        message: String,
        severity: Severity,
        lifetime: Option<Lifetime>,
        source: NotificationSource,
    ) -> NotificationId {
        let id = NotificationId::new();
        // A closed channel means the manager is gone; the id is simply unused.
        let _ = self.tx.send(Request::Show {
            id,
            message,
            severity,
            lifetime,
            source,
        });
        id
    }

    pub fn show(
        &self,
        message: impl Into<String>,
        severity: Severity,
        lifetime: Lifetime,
    ) -> NotificationId {
        self.post(
            message.into(),
            severity,
            Some(lifetime),
            NotificationSource::Notifier,
        )
    }

    /// Shows a message with the manager's default duration.
    pub fn show_typed(&self, message: impl Into<String>, type_name: &str) -> NotificationId {
        self.post(
            message.into(),
            Severity::from_type(type_name),
            None,
            NotificationSource::Notifier,
        )
    }

    pub(crate) fn show_from_response(&self, message: String, type_name: &str) -> NotificationId {
        self.post(
            message,
            Severity::from_type(type_name),
            None,
            NotificationSource::Response,
        )
    }

    pub fn success(&self, message: impl Into<String>) -> NotificationId {
        self.show(message, Severity::Success, Severity::Success.default_lifetime())
    }

    pub fn error(&self, message: impl Into<String>) -> NotificationId {
        self.show(message, Severity::Error, Severity::Error.default_lifetime())
    }

    pub fn warning(&self, message: impl Into<String>) -> NotificationId {
        self.show(message, Severity::Warning, Severity::Warning.default_lifetime())
    }

    pub fn info(&self, message: impl Into<String>) -> NotificationId {
        self.show(message, Severity::Info, Severity::Info.default_lifetime())
    }

    pub fn hide(&self, id: NotificationId) {
        let _ = self.tx.send(Request::Hide(id));
    }

    pub fn hide_all(&self) {
        let _ = self.tx.send(Request::HideAll);
    }
}
