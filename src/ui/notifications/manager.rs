// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Manager` owns the toast container (display order = call order), the
//! registry of live toasts and their timers. Every timer is a cancellable
//! token: entry reveal on the next tick, auto-dismiss after the toast's
//! duration, and removal once the exit animation delay has elapsed.

use super::notification::{ExitDelay, Lifetime, Notification, NotificationId, Phase, Severity};
use super::notifier::{Notifier, Request};
use crate::clock::{self, SharedClock};
use crate::config::{NotificationsConfig, DEFAULT_DURATION_MS, SERVER_MESSAGE_DURATION_MS};
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle, NotificationSource};
use crate::scheduler::{Scheduler, TimerToken};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::time::Instant;

/// Messages for notification state changes.
#[derive(Debug, Clone)]
pub enum Message {
    /// Dismiss a specific notification by ID (close affordance).
    Dismiss(NotificationId),
    /// Fire due timers.
    Tick,
}

/// Lifecycle settings resolved from the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Lifetime used when a caller does not pick one.
    pub default_lifetime: Lifetime,
    /// Lifetime of toasts adopted from server-rendered banners.
    pub status_message_lifetime: Lifetime,
    pub exit_delay: ExitDelay,
    /// Cap on toasts that are not exiting. `None` stacks without limit.
    pub max_visible: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_lifetime: Lifetime::from_millis(DEFAULT_DURATION_MS),
            status_message_lifetime: Lifetime::from_millis(SERVER_MESSAGE_DURATION_MS),
            exit_delay: ExitDelay::default(),
            max_visible: None,
        }
    }
}

impl Settings {
    #[must_use]
    pub fn from_config(config: &NotificationsConfig) -> Self {
        let defaults = Self::default();
        Self {
            default_lifetime: config
                .default_duration_ms
                .map_or(defaults.default_lifetime, Lifetime::from_millis),
            status_message_lifetime: config
                .server_message_duration_ms
                .map_or(defaults.status_message_lifetime, Lifetime::from_millis),
            exit_delay: config
                .exit_delay_ms
                .map_or(defaults.exit_delay, ExitDelay::new),
            max_visible: config.max_visible.filter(|cap| *cap > 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    Reveal(NotificationId),
    AutoHide(NotificationId),
    Remove(NotificationId),
}

/// A container slot: the toast plus its pending timers.
#[derive(Debug)]
struct Entry {
    notification: Notification,
    reveal: Option<TimerToken>,
    auto_hide: Option<TimerToken>,
    removal: Option<TimerToken>,
}

/// Manages the toast container and the lifecycle of every toast in it.
#[derive(Debug)]
pub struct Manager {
    /// Attached toasts in call order. Doubles as the id registry.
    container: Vec<Entry>,
    timers: Scheduler<Timer>,
    clock: SharedClock,
    settings: Settings,
    diagnostics: Option<DiagnosticsHandle>,
    request_tx: Sender<Request>,
    request_rx: Receiver<Request>,
}

impl Default for Manager {
    fn default() -> Self {
        Self::new()
    }
}

impl Manager {
    /// Creates an empty manager on the system clock with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Settings::default(), clock::system())
    }

    #[must_use]
    pub fn with_clock(settings: Settings, clock: SharedClock) -> Self {
        let (request_tx, request_rx) = unbounded();
        Self {
            container: Vec::new(),
            timers: Scheduler::new(),
            clock,
            settings,
            diagnostics: None,
            request_tx,
            request_rx,
        }
    }

    /// Sets the diagnostics handle used to log lifecycle events.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns a handle that posts requests to this manager.
    #[must_use]
    pub fn notifier(&self) -> Notifier {
        Notifier::new(self.request_tx.clone())
    }

    #[must_use]
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    // =========================================================================
    // Public API
    // =========================================================================

    /// Shows a toast and returns its id immediately.
    pub fn show(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        lifetime: Lifetime,
    ) -> NotificationId {
        self.show_from(
            NotificationSource::Direct,
            message.into(),
            severity,
            lifetime,
        )
    }

    /// Shows an info toast with the default duration.
    pub fn show_default(&mut self, message: impl Into<String>) -> NotificationId {
        let lifetime = self.settings.default_lifetime;
        self.show(message, Severity::Info, lifetime)
    }

    /// Shows a toast from a loosely typed request: unknown type names become
    /// info, a missing duration becomes the default one.
    pub fn show_typed(
        &mut self,
        message: impl Into<String>,
        type_name: Option<&str>,
        lifetime: Option<Lifetime>,
    ) -> NotificationId {
        let severity = type_name.map(Severity::from_type).unwrap_or_default();
        let lifetime = lifetime.unwrap_or(self.settings.default_lifetime);
        self.show(message, severity, lifetime)
    }

    pub fn success(&mut self, message: impl Into<String>) -> NotificationId {
        self.show(message, Severity::Success, Severity::Success.default_lifetime())
    }

    pub fn success_for(&mut self, message: impl Into<String>, lifetime: Lifetime) -> NotificationId {
        self.show(message, Severity::Success, lifetime)
    }

    pub fn error(&mut self, message: impl Into<String>) -> NotificationId {
        self.show(message, Severity::Error, Severity::Error.default_lifetime())
    }

    pub fn error_for(&mut self, message: impl Into<String>, lifetime: Lifetime) -> NotificationId {
        self.show(message, Severity::Error, lifetime)
    }

    pub fn warning(&mut self, message: impl Into<String>) -> NotificationId {
        self.show(message, Severity::Warning, Severity::Warning.default_lifetime())
    }

    pub fn warning_for(&mut self, message: impl Into<String>, lifetime: Lifetime) -> NotificationId {
        self.show(message, Severity::Warning, lifetime)
    }

    pub fn info(&mut self, message: impl Into<String>) -> NotificationId {
        self.show(message, Severity::Info, Severity::Info.default_lifetime())
    }

    pub fn info_for(&mut self, message: impl Into<String>, lifetime: Lifetime) -> NotificationId {
        self.show(message, Severity::Info, lifetime)
    }

    /// Starts the exit animation of a toast.
    ///
    /// Returns `false` if the id is unknown or the toast is already exiting.
    pub fn hide(&mut self, id: NotificationId) -> bool {
        let now = self.clock.now();
        self.hide_at(id, now)
    }

    /// Hides every toast registered at call time.
    pub fn hide_all(&mut self) {
        let now = self.clock.now();
        let ids: Vec<NotificationId> = self.container.iter().map(|e| e.notification.id()).collect();
        for id in ids {
            self.hide_at(id, now);
        }
    }

    /// Fires due timers, then applies requests posted through notifiers.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        while let Some((deadline, timer)) = self.timers.pop_due(now) {
            match timer {
                Timer::Reveal(id) => self.reveal(id),
                Timer::AutoHide(id) => {
                    if let Some(pos) = self.position(id) {
                        self.container[pos].auto_hide = None;
                    }
                    self.hide_at(id, deadline);
                }
                Timer::Remove(id) => self.remove(id, deadline),
            }
        }
        self.process_requests();
    }

    /// Handles a notification message.
    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.hide(*id);
            }
            Message::Tick => self.tick(),
        }
    }

    /// Cancels every timer, detaches every toast and drops queued requests.
    ///
    /// Notifiers handed out before the call are disconnected: whatever they
    /// post afterwards is discarded at the send.
    ///
    /// Returns the number of cancelled timers.
    pub fn shutdown(&mut self) -> usize {
        let cancelled = self.timers.len();
        self.timers.clear();
        self.container.clear();
        let (request_tx, request_rx) = unbounded();
        self.request_tx = request_tx;
        // Dropping the old receiver discards its queue and fails later sends.
        drop(std::mem::replace(&mut self.request_rx, request_rx));
        cancelled
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the attached toasts in display order.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.container.iter().map(|entry| &entry.notification)
    }

    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.position(id).map(|pos| &self.container[pos].notification)
    }

    #[must_use]
    pub fn contains(&self, id: NotificationId) -> bool {
        self.position(id).is_some()
    }

    /// Returns the number of attached toasts (exiting ones included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.container.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }

    /// Whether the UI needs to keep ticking.
    #[must_use]
    pub fn has_pending_work(&self) -> bool {
        !self.timers.is_empty() || !self.request_rx.is_empty()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    pub(crate) fn show_from(
        &mut self,
        source: NotificationSource,
        message: String,
        severity: Severity,
        lifetime: Lifetime,
    ) -> NotificationId {
        let id = NotificationId::new();
        self.insert(id, source, message, severity, lifetime);
        id
    }

    fn insert(
        &mut self,
        id: NotificationId,
        source: NotificationSource,
        message: String,
        severity: Severity,
        lifetime: Lifetime,
    ) {
        let now = self.clock.now();

        // Ids never repeat, but a replayed request must not leave an orphan.
        if let Some(pos) = self.position(id) {
            let stale = self.container.remove(pos);
            self.cancel_timers(&stale);
        }

        let reveal = Some(self.timers.schedule_at(now, Timer::Reveal(id)));
        let auto_hide = lifetime
            .duration()
            .map(|duration| self.timers.schedule_after(now, duration, Timer::AutoHide(id)));

        self.container.push(Entry {
            notification: Notification::new(id, severity, message, lifetime, now),
            reveal,
            auto_hide,
            removal: None,
        });

        self.log(
            DiagnosticEventKind::NotificationShown {
                id: id.to_string(),
                severity: severity.as_str().to_string(),
                duration_ms: lifetime.duration().map(|d| d.as_millis() as u64),
                source,
            },
            now,
        );

        self.enforce_cap(now);
    }

    fn enforce_cap(&mut self, now: Instant) {
        let Some(cap) = self.settings.max_visible else {
            return;
        };
        loop {
            let live: Vec<NotificationId> = self
                .container
                .iter()
                .filter(|e| e.notification.phase() != Phase::Exiting)
                .map(|e| e.notification.id())
                .collect();
            if live.len() <= cap {
                break;
            }
            self.hide_at(live[0], now);
        }
    }

    fn hide_at(&mut self, id: NotificationId, at: Instant) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        if self.container[pos].notification.phase() == Phase::Exiting {
            return false;
        }

        if let Some(token) = self.container[pos].auto_hide.take() {
            self.timers.cancel(token);
        }
        if let Some(token) = self.container[pos].reveal.take() {
            self.timers.cancel(token);
        }

        let removal = self.timers.schedule_after(
            at,
            self.settings.exit_delay.as_duration(),
            Timer::Remove(id),
        );
        let entry = &mut self.container[pos];
        entry.removal = Some(removal);
        entry.notification.set_phase(Phase::Exiting);

        self.log(
            DiagnosticEventKind::NotificationHidden { id: id.to_string() },
            at,
        );
        true
    }

    fn reveal(&mut self, id: NotificationId) {
        if let Some(pos) = self.position(id) {
            let entry = &mut self.container[pos];
            entry.reveal = None;
            if entry.notification.phase() == Phase::Entering {
                entry.notification.set_phase(Phase::Visible);
            }
        }
    }

    fn remove(&mut self, id: NotificationId, at: Instant) {
        if let Some(pos) = self.position(id) {
            let entry = self.container.remove(pos);
            self.cancel_timers(&entry);
            self.log(
                DiagnosticEventKind::NotificationRemoved { id: id.to_string() },
                at,
            );
        }
    }

    fn cancel_timers(&mut self, entry: &Entry) {
        for token in [entry.reveal, entry.auto_hide, entry.removal]
            .into_iter()
            .flatten()
        {
            self.timers.cancel(token);
        }
    }

    fn process_requests(&mut self) {
        while let Ok(request) = self.request_rx.try_recv() {
            match request {
                Request::Show {
                    id,
                    message,
                    severity,
                    lifetime,
                    source,
                } => {
                    let lifetime = lifetime.unwrap_or(self.settings.default_lifetime);
                    self.insert(id, source, message, severity, lifetime);
                }
                Request::Hide(id) => {
                    self.hide(id);
                }
                Request::HideAll => self.hide_all(),
            }
        }
    }

    fn position(&self, id: NotificationId) -> Option<usize> {
        self.container
            .iter()
            .position(|entry| entry.notification.id() == id)
    }

    fn log(&self, kind: DiagnosticEventKind, at: Instant) {
        if let Some(handle) = &self.diagnostics {
            handle.log_at(kind, at);
        }
    }
}
