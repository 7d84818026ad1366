// SPDX-License-Identifier: MPL-2.0
//! Page session: the presenter wired to one loaded page.
//!
//! [`Session::start`] performs the startup sequence: it adopts the page's
//! server-rendered status banners as toasts (hiding the originals), starts
//! routing storefront events and enables submit feedback on POST forms.
//! [`Session::shutdown`] tears everything down at the end of the page
//! session; afterwards the session ignores every input.

use crate::clock::SharedClock;
use crate::config::{Config, NetworkConfig};
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle, NotificationSource};
use crate::error::Result;
use crate::events::StorefrontEvent;
use crate::forms::SubmitFeedback;
use crate::net::NotifyingFetch;
use crate::page::{Document, FormId};
use crate::ui::notifications::{Manager, NotificationId, Notifier, Settings};
use std::time::Instant;

/// A running page session.
#[derive(Debug)]
pub struct Session {
    document: Document,
    manager: Manager,
    feedback: SubmitFeedback,
    network: NetworkConfig,
    diagnostics: Option<DiagnosticsHandle>,
    active: bool,
}

impl Session {
    /// Starts a session on `document`.
    pub fn start(
        document: Document,
        config: &Config,
        clock: SharedClock,
        diagnostics: Option<DiagnosticsHandle>,
    ) -> Self {
        let mut manager = Manager::with_clock(
            Settings::from_config(&config.notifications),
            clock.clone(),
        );
        let mut feedback = SubmitFeedback::from_config(&config.forms, clock);
        if let Some(handle) = &diagnostics {
            manager.set_diagnostics(handle.clone());
            feedback.set_diagnostics(handle.clone());
        }

        let mut session = Self {
            document,
            manager,
            feedback,
            network: config.network.clone(),
            diagnostics,
            active: true,
        };
        let adopted = session.adopt_status_messages();

        if let Some(handle) = &session.diagnostics {
            handle.log_at(
                DiagnosticEventKind::SessionStarted {
                    status_messages: adopted,
                    forms: session.document.forms().len(),
                },
                session.manager.now(),
            );
        }
        session
    }

    /// Converts every visible banner with text into a toast and hides it.
    fn adopt_status_messages(&mut self) -> usize {
        let lifetime = self.manager.settings().status_message_lifetime;
        let mut adopted = 0;
        for element in self.document.status_elements_mut() {
            if element.is_hidden() || element.text().is_empty() {
                continue;
            }
            self.manager.show_from(
                NotificationSource::StatusMessage,
                element.text().to_string(),
                element.severity(),
                lifetime,
            );
            element.hide();
            adopted += 1;
        }
        adopted
    }

    /// Routes an inbound event to the manager.
    ///
    /// Returns `None` once the session has ended.
    pub fn dispatch(&mut self, event: &StorefrontEvent) -> Option<NotificationId> {
        if !self.active {
            return None;
        }
        let request = event.to_request();
        let lifetime = request
            .lifetime
            .unwrap_or(self.manager.settings().default_lifetime);
        Some(self.manager.show_from(
            NotificationSource::Event {
                name: event.name().to_string(),
            },
            request.message,
            request.severity,
            lifetime,
        ))
    }

    /// Decodes a JSON event envelope and dispatches it.
    ///
    /// Undecodable events are logged as warnings and returned as errors.
    pub fn dispatch_json(&mut self, json: &str) -> Result<Option<NotificationId>> {
        match StorefrontEvent::from_json(json) {
            Ok(event) => Ok(self.dispatch(&event)),
            Err(err) => {
                if let Some(handle) = &self.diagnostics {
                    handle.log_warning(format!("ignored event: {}", err));
                }
                Err(err.into())
            }
        }
    }

    /// Handles a submit event on a form of the page.
    pub fn submit(&mut self, form: FormId) -> bool {
        self.active && self.feedback.on_submit(&mut self.document, form)
    }

    /// Fires due timers and applies requests posted through notifiers.
    pub fn tick(&mut self) {
        if !self.active {
            return;
        }
        self.manager.tick();
        self.feedback.tick(&mut self.document);
    }

    /// Ends the session: cancels every pending timer and drops all toasts.
    ///
    /// Returns the number of cancelled timers. Calling it again does nothing.
    pub fn shutdown(&mut self) -> usize {
        if !self.active {
            return 0;
        }
        self.active = false;
        let cancelled = self.manager.shutdown() + self.feedback.shutdown();
        if let Some(handle) = &self.diagnostics {
            handle.log_at(
                DiagnosticEventKind::SessionEnded {
                    cancelled_timers: cancelled,
                },
                self.manager.now(),
            );
        }
        cancelled
    }

    /// Wraps a request primitive with the response middleware.
    pub fn wrap_fetch<F>(&self, inner: F) -> NotifyingFetch<F> {
        NotifyingFetch::from_config(inner, self.manager.notifier(), &self.network)
    }

    #[must_use]
    pub fn notifier(&self) -> Notifier {
        self.manager.notifier()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn manager(&self) -> &Manager {
        &self.manager
    }

    /// Direct access to the manager (`show`, `hide`, `hide_all`, ...).
    pub fn manager_mut(&mut self) -> &mut Manager {
        &mut self.manager
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub fn feedback(&self) -> &SubmitFeedback {
        &self.feedback
    }

    /// Whether any timer or queued request still needs ticks.
    #[must_use]
    pub fn has_pending_work(&self) -> bool {
        self.active && (self.manager.has_pending_work() || self.feedback.pending() > 0)
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.manager.next_deadline(), self.feedback.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::diagnostics::{BufferCapacity, DiagnosticsCollector};
    use crate::ui::notifications::{Lifetime, Severity};

    const PAGE: &str = r#"<html><body>
        <div class="messages">
          <div class="alert alert-success">Order placed</div>
          <div class="alert alert-warning">  </div>
        </div>
        <div class="alert error">Paiement refusé</div>
        <form method="post" action="/cart/add/7/">
          <button type="submit">Ajouter</button>
        </form>
    </body></html>"#;

    fn start(html: &str) -> (Session, ManualClock) {
        let clock = ManualClock::new();
        let document = Document::parse(html).expect("page parses");
        let session = Session::start(document, &Config::default(), clock.shared(), None);
        (session, clock)
    }

    #[test]
    fn start_adopts_status_messages() {
        let (session, _) = start(PAGE);
        let shown: Vec<_> = session.manager().visible().collect();
        assert_eq!(shown.len(), 2);

        assert_eq!(shown[0].message(), "Order placed");
        assert_eq!(shown[0].severity(), Severity::Success);
        assert_eq!(shown[0].lifetime(), Lifetime::from_millis(4000));
        assert_eq!(shown[1].severity(), Severity::Error);

        let elements = session.document().status_elements();
        assert!(elements[0].is_hidden());
        // Empty banners are neither adopted nor hidden.
        assert!(!elements[1].is_hidden());
        assert!(elements[2].is_hidden());
    }

    #[test]
    fn dispatch_routes_cart_events() {
        let (mut session, _) = start("<html></html>");
        let id = session
            .dispatch(&StorefrontEvent::CartItemAdded {
                product_name: "Rose Oud".to_string(),
            })
            .expect("active session");

        let shown = session.manager().get(id).expect("shown");
        assert_eq!(shown.message(), "Rose Oud ajouté au panier");
        assert_eq!(shown.severity(), Severity::Success);
        assert_eq!(shown.lifetime(), Lifetime::from_millis(3000));
    }

    #[test]
    fn dispatch_json_uses_default_duration_when_missing() {
        let (mut session, _) = start("<html></html>");
        let id = session
            .dispatch_json(r#"{"event": "notification:show", "detail": {"message": "Bonjour"}}"#)
            .expect("valid event")
            .expect("active session");
        assert_eq!(
            session.manager().get(id).map(|n| n.lifetime()),
            Some(Lifetime::from_millis(4000))
        );
    }

    #[test]
    fn bad_events_are_logged() {
        let clock = ManualClock::new();
        let mut collector = DiagnosticsCollector::new(BufferCapacity::default());
        let mut session = Session::start(
            Document::new(),
            &Config::default(),
            clock.shared(),
            Some(collector.handle()),
        );

        assert!(session.dispatch_json(r#"{"event": "nope"}"#).is_err());
        collector.process_pending();
        assert!(collector
            .iter()
            .any(|e| matches!(e.kind, DiagnosticEventKind::Warning { .. })));
        assert!(session.manager().is_empty());
    }

    #[test]
    fn submit_feedback_runs_on_tick() {
        let (mut session, clock) = start(PAGE);
        let form = session.document().forms()[0].id();
        assert!(session.submit(form));

        let label = |s: &Session| {
            s.document().forms()[0]
                .submit_control()
                .map(|c| c.label.clone())
        };
        assert_eq!(label(&session).as_deref(), Some("Chargement..."));

        clock.advance_ms(2000);
        session.tick();
        assert_eq!(label(&session).as_deref(), Some("Ajouter"));
    }

    #[test]
    fn shutdown_stops_everything() {
        let (mut session, clock) = start(PAGE);
        let form = session.document().forms()[0].id();
        session.submit(form);
        let kept = session.notifier();

        // Two reveals, two auto-hides and one restore.
        assert_eq!(session.shutdown(), 5);
        assert!(!session.is_active());
        assert!(session.manager().is_empty());
        assert_eq!(session.shutdown(), 0);

        kept.warning("posted after shutdown");
        assert!(!session.manager().has_pending_work());
        assert!(session.dispatch(&StorefrontEvent::CartUpdated).is_none());
        assert!(!session.submit(form));
        clock.advance_ms(10_000);
        session.tick();
        assert!(!session.has_pending_work());
    }

    #[test]
    fn notifier_posts_reach_the_manager() {
        let (mut session, _) = start("<html></html>");
        let notifier = session.notifier();
        let id = std::thread::spawn(move || notifier.error("Erreur réseau"))
            .join()
            .expect("thread");

        session.tick();
        assert_eq!(
            session.manager().get(id).map(|n| n.severity()),
            Some(Severity::Error)
        );
    }
}
