// SPDX-License-Identifier: MPL-2.0
//! Loading feedback on POST form submission.
//!
//! Submitting a POST form disables its submit control and swaps its label
//! for a loading text. Both are restored after a fixed delay, whether or not
//! the submission has completed by then.

use crate::clock::SharedClock;
use crate::config::{FormsConfig, LOADING_LABEL, SUBMIT_RESTORE_DELAY_MS};
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle};
use crate::page::{Document, FormId};
use crate::scheduler::{Scheduler, TimerToken};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// State of a submit control before it was locked.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Saved {
    label: String,
    disabled: bool,
}

#[derive(Debug)]
struct Locked {
    saved: Saved,
    restore: TimerToken,
}

/// Applies and reverts the submit loading state.
#[derive(Debug)]
pub struct SubmitFeedback {
    loading_label: String,
    restore_delay: Duration,
    clock: SharedClock,
    timers: Scheduler<FormId>,
    locked: HashMap<FormId, Locked>,
    diagnostics: Option<DiagnosticsHandle>,
}

impl SubmitFeedback {
    pub fn new(loading_label: impl Into<String>, restore_delay: Duration, clock: SharedClock) -> Self {
        Self {
            loading_label: loading_label.into(),
            restore_delay,
            clock,
            timers: Scheduler::new(),
            locked: HashMap::new(),
            diagnostics: None,
        }
    }

    pub fn from_config(config: &FormsConfig, clock: SharedClock) -> Self {
        Self::new(
            config.loading_label.as_deref().unwrap_or(LOADING_LABEL),
            Duration::from_millis(config.restore_delay_ms.unwrap_or(SUBMIT_RESTORE_DELAY_MS)),
            clock,
        )
    }

    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    #[must_use]
    pub fn loading_label(&self) -> &str {
        &self.loading_label
    }

    /// Handles a submit event on `form`.
    ///
    /// Returns `true` if the submit control was put in its loading state.
    /// Non-POST forms and forms without a submit control are left alone.
    /// Submitting again while locked only pushes the restore back; the
    /// label saved by the first submit is kept.
    pub fn on_submit(&mut self, document: &mut Document, form: FormId) -> bool {
        let Some(target) = document.form_mut(form) else {
            return false;
        };
        if !target.is_post() {
            return false;
        }
        let Some(control) = target.submit_control_mut() else {
            return false;
        };

        let now = self.clock.now();
        let saved = match self.locked.remove(&form) {
            Some(previous) => {
                self.timers.cancel(previous.restore);
                previous.saved
            }
            None => Saved {
                label: control.label.clone(),
                disabled: control.disabled,
            },
        };

        control.disabled = true;
        control.label.clone_from(&self.loading_label);

        let restore = self.timers.schedule_after(now, self.restore_delay, form);
        self.locked.insert(form, Locked { saved, restore });
        self.log(DiagnosticEventKind::SubmitLocked { form: form.value() }, now);
        true
    }

    /// Restores every control whose delay has elapsed.
    ///
    /// Returns the number of controls restored. Forms that left the page in
    /// the meantime are skipped.
    pub fn tick(&mut self, document: &mut Document) -> usize {
        let now = self.clock.now();
        let mut restored = 0;
        while let Some((deadline, form)) = self.timers.pop_due(now) {
            let Some(locked) = self.locked.remove(&form) else {
                continue;
            };
            let Some(control) = document.form_mut(form).and_then(|f| f.submit_control_mut())
            else {
                continue;
            };
            control.label = locked.saved.label;
            control.disabled = locked.saved.disabled;
            restored += 1;
            self.log(DiagnosticEventKind::SubmitRestored { form: form.value() }, deadline);
        }
        restored
    }

    #[must_use]
    pub fn is_locked(&self, form: FormId) -> bool {
        self.locked.contains_key(&form)
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Cancels every pending restore. Returns the number cancelled.
    pub fn shutdown(&mut self) -> usize {
        let cancelled = self.timers.len();
        self.timers.clear();
        self.locked.clear();
        cancelled
    }

    fn log(&self, kind: DiagnosticEventKind, at: Instant) {
        if let Some(handle) = &self.diagnostics {
            handle.log_at(kind, at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::page::{SubmitControl, SubmitKind};

    fn setup() -> (SubmitFeedback, Document, ManualClock) {
        let clock = ManualClock::new();
        let feedback = SubmitFeedback::new(
            "Chargement...",
            Duration::from_millis(2000),
            clock.shared(),
        );
        (feedback, Document::new(), clock)
    }

    fn label(document: &Document, form: FormId) -> (String, bool) {
        let control = document
            .form(form)
            .and_then(|f| f.submit_control())
            .expect("control");
        (control.label.clone(), control.disabled)
    }

    #[test]
    fn post_submit_locks_then_restores() {
        let (mut feedback, mut doc, clock) = setup();
        let form = doc.push_form(
            "Post",
            Some("/cart/add/1/".into()),
            Some(SubmitControl::new(SubmitKind::Button, "Ajouter")),
        );

        assert!(feedback.on_submit(&mut doc, form));
        assert_eq!(label(&doc, form), ("Chargement...".to_string(), true));

        clock.advance_ms(1999);
        assert_eq!(feedback.tick(&mut doc), 0);
        assert!(feedback.is_locked(form));

        clock.advance_ms(1);
        assert_eq!(feedback.tick(&mut doc), 1);
        assert_eq!(label(&doc, form), ("Ajouter".to_string(), false));
        assert!(!feedback.is_locked(form));
    }

    #[test]
    fn restores_original_disabled_state() {
        let (mut feedback, mut doc, clock) = setup();
        let mut control = SubmitControl::new(SubmitKind::Input, "Payer");
        control.disabled = true;
        let form = doc.push_form("post", None, Some(control));

        feedback.on_submit(&mut doc, form);
        clock.advance_ms(2000);
        feedback.tick(&mut doc);
        assert_eq!(label(&doc, form), ("Payer".to_string(), true));
    }

    #[test]
    fn get_forms_and_missing_controls_are_skipped() {
        let (mut feedback, mut doc, _) = setup();
        let search = doc.push_form(
            "get",
            None,
            Some(SubmitControl::new(SubmitKind::Input, "Rechercher")),
        );
        let bare = doc.push_form("post", None, None);

        assert!(!feedback.on_submit(&mut doc, search));
        assert!(!feedback.on_submit(&mut doc, bare));
        assert_eq!(label(&doc, search), ("Rechercher".to_string(), false));
        assert_eq!(feedback.pending(), 0);
    }

    #[test]
    fn resubmit_keeps_first_label_and_extends_lock() {
        let (mut feedback, mut doc, clock) = setup();
        let form = doc.push_form(
            "post",
            None,
            Some(SubmitControl::new(SubmitKind::Button, "Commander")),
        );

        feedback.on_submit(&mut doc, form);
        clock.advance_ms(1000);
        feedback.on_submit(&mut doc, form);
        assert_eq!(feedback.pending(), 1);

        clock.advance_ms(1000);
        assert_eq!(feedback.tick(&mut doc), 0);
        assert_eq!(label(&doc, form).0, "Chargement...");

        clock.advance_ms(1000);
        assert_eq!(feedback.tick(&mut doc), 1);
        assert_eq!(label(&doc, form), ("Commander".to_string(), false));
    }

    #[test]
    fn removed_form_is_skipped_on_restore() {
        let (mut feedback, mut doc, clock) = setup();
        let form = doc.push_form(
            "post",
            None,
            Some(SubmitControl::new(SubmitKind::Button, "Envoyer")),
        );
        feedback.on_submit(&mut doc, form);
        doc.remove_form(form);

        clock.advance_ms(2000);
        assert_eq!(feedback.tick(&mut doc), 0);
        assert_eq!(feedback.pending(), 0);
    }

    #[test]
    fn shutdown_cancels_restores() {
        let (mut feedback, mut doc, clock) = setup();
        let form = doc.push_form(
            "post",
            None,
            Some(SubmitControl::new(SubmitKind::Button, "Envoyer")),
        );
        feedback.on_submit(&mut doc, form);
        assert_eq!(feedback.shutdown(), 1);

        clock.advance_ms(5000);
        assert_eq!(feedback.tick(&mut doc), 0);
        assert_eq!(label(&doc, form).0, "Chargement...");
    }

    #[test]
    fn from_config_uses_configured_label() {
        let clock = ManualClock::new();
        let config = FormsConfig {
            loading_label: Some("Envoi...".to_string()),
            restore_delay_ms: None,
        };
        let feedback = SubmitFeedback::from_config(&config, clock.shared());
        assert_eq!(feedback.loading_label(), "Envoi...");
        assert_eq!(feedback.restore_delay, Duration::from_millis(2000));
    }
}
