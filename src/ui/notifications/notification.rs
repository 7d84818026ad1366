// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` struct, its `Severity`, display
//! `Lifetime` and visual `Phase`.

use crate::config::{
    ERROR_DURATION_MS, EXIT_DELAY_MS, INFO_DURATION_MS, MAX_EXIT_DELAY_MS, MIN_EXIT_DELAY_MS,
    SUCCESS_DURATION_MS, WARNING_DURATION_MS,
};
use crate::ui::design_tokens::palette;
use crate::ui::icons::Icon;
use iced::Color;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

const ID_PREFIX: &str = "notification-";

/// Unique identifier for a notification.
///
/// Ids come from a process-wide counter, so they never repeat during a
/// page session. The textual form (`notification-<n>`) is the correlation
/// key carried by rendered close affordances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ID_PREFIX, self.0)
    }
}

impl FromStr for NotificationId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix(ID_PREFIX).unwrap_or(s);
        digits.parse().map(Self)
    }
}

/// Severity level determines icon and visual styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Severity {
    Success,
    Error,
    Warning,
    /// Informational message; also the fallback for unknown type names.
    #[default]
    Info,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Success,
        Severity::Error,
        Severity::Warning,
        Severity::Info,
    ];

    /// Parses a type name such as `"success"`. Unknown names yield `Info`.
    #[must_use]
    pub fn from_type(name: &str) -> Self {
        match name {
            "success" => Severity::Success,
            "error" => Severity::Error,
            "warning" => Severity::Warning,
            _ => Severity::Info,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    /// Returns the styling class for this severity.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Severity::Success => "notification-success",
            Severity::Error => "notification-error",
            Severity::Warning => "notification-warning",
            Severity::Info => "notification-info",
        }
    }

    #[must_use]
    pub fn icon(self) -> Icon {
        match self {
            Severity::Success => Icon::Check,
            Severity::Error => Icon::CircleCross,
            Severity::Warning => Icon::Triangle,
            Severity::Info => Icon::CircleInfo,
        }
    }

    /// Returns the accent color for this severity level.
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            Severity::Success => palette::SUCCESS_500,
            Severity::Error => palette::ERROR_500,
            Severity::Warning => palette::WARNING_500,
            Severity::Info => palette::INFO_500,
        }
    }

    /// Lifetime used by the per-severity convenience methods.
    #[must_use]
    pub fn default_lifetime(self) -> Lifetime {
        Lifetime::from_millis(match self {
            Severity::Success => SUCCESS_DURATION_MS,
            Severity::Error => ERROR_DURATION_MS,
            Severity::Warning => WARNING_DURATION_MS,
            Severity::Info => INFO_DURATION_MS,
        })
    }
}

impl From<&str> for Severity {
    fn from(name: &str) -> Self {
        Self::from_type(name)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How long a notification stays before dismissing itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// Stays until dismissed manually.
    Persistent,
    /// Hides itself after the duration.
    AutoDismiss(Duration),
}

impl Lifetime {
    /// Converts a millisecond count; zero or negative means persistent.
    #[must_use]
    pub fn from_millis(ms: i64) -> Self {
        match u64::try_from(ms) {
            Ok(ms) if ms > 0 => Lifetime::AutoDismiss(Duration::from_millis(ms)),
            _ => Lifetime::Persistent,
        }
    }

    /// Converts a fractional millisecond count (as carried by JSON numbers).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_millis_f64(ms: f64) -> Self {
        if ms.is_finite() && ms > 0.0 {
            Self::from_millis(ms.ceil().min(i64::MAX as f64) as i64)
        } else {
            Lifetime::Persistent
        }
    }

    #[must_use]
    pub fn duration(self) -> Option<Duration> {
        match self {
            Lifetime::Persistent => None,
            Lifetime::AutoDismiss(duration) => Some(duration),
        }
    }

    #[must_use]
    pub fn is_persistent(self) -> bool {
        matches!(self, Lifetime::Persistent)
    }
}

impl From<Duration> for Lifetime {
    fn from(duration: Duration) -> Self {
        if duration.is_zero() {
            Lifetime::Persistent
        } else {
            Lifetime::AutoDismiss(duration)
        }
    }
}

/// Delay between `hide` and the removal of a toast.
///
/// The value is clamped to the supported range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitDelay(u64);

impl ExitDelay {
    #[must_use]
    pub fn new(ms: u64) -> Self {
        Self(ms.clamp(MIN_EXIT_DELAY_MS, MAX_EXIT_DELAY_MS))
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Default for ExitDelay {
    fn default() -> Self {
        Self(EXIT_DELAY_MS)
    }
}

/// Visual state of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Appended, waiting for the next tick to become visible.
    Entering,
    Visible,
    /// Playing its exit animation; removed once the exit delay elapses.
    Exiting,
}

/// A notification shown to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    message: String,
    lifetime: Lifetime,
    phase: Phase,
    created_at: Instant,
}

impl Notification {
    pub(crate) fn new(
        id: NotificationId,
        severity: Severity,
        message: String,
        lifetime: Lifetime,
        created_at: Instant,
    ) -> Self {
        Self {
            id,
            severity,
            message,
            lifetime,
            phase: Phase::Entering,
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    #[must_use]
    pub fn icon(&self) -> Icon {
        self.severity.icon()
    }

    /// Returns the styling classes of the rendered node.
    #[must_use]
    pub fn class_list(&self) -> Vec<&'static str> {
        let mut classes = vec!["notification", self.severity.class_name()];
        match self.phase {
            Phase::Entering => {}
            Phase::Visible => classes.push("show"),
            Phase::Exiting => classes.extend(["show", "hide"]),
        }
        classes
    }

    /// Whether a progress indicator is rendered.
    #[must_use]
    pub fn has_progress(&self) -> bool {
        !self.lifetime.is_persistent()
    }

    /// Remaining fraction of the countdown (1.0 down to 0.0).
    ///
    /// Purely visual; the dismiss timer is owned by the manager.
    #[must_use]
    pub fn progress(&self, now: Instant) -> Option<f32> {
        let total = self.lifetime.duration()?;
        let elapsed = now.saturating_duration_since(self.created_at);
        let remaining = total.saturating_sub(elapsed);
        Some(remaining.as_secs_f32() / total.as_secs_f32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(severity: Severity, lifetime: Lifetime) -> Notification {
        Notification::new(
            NotificationId::new(),
            severity,
            "x".to_string(),
            lifetime,
            Instant::now(),
        )
    }

    #[test]
    fn notification_ids_are_unique() {
        assert_ne!(NotificationId::new(), NotificationId::new());
    }

    #[test]
    fn id_display_round_trips_through_from_str() {
        let id = NotificationId::new();
        let text = id.to_string();
        assert!(text.starts_with("notification-"));
        assert_eq!(text.parse::<NotificationId>(), Ok(id));
    }

    #[test]
    fn known_type_names_map_to_their_severity() {
        for severity in Severity::ALL {
            assert_eq!(Severity::from_type(severity.as_str()), severity);
        }
    }

    #[test]
    fn unknown_type_names_fall_back_to_info() {
        for name in ["", "danger", "SUCCESS", "notice", "undefined"] {
            let severity = Severity::from_type(name);
            assert_eq!(severity, Severity::Info);
            assert_eq!(severity.icon(), Icon::CircleInfo);
            assert_eq!(severity.class_name(), "notification-info");
        }
    }

    #[test]
    fn each_severity_has_its_own_icon_and_class() {
        assert_eq!(Severity::Success.icon(), Icon::Check);
        assert_eq!(Severity::Error.icon(), Icon::CircleCross);
        assert_eq!(Severity::Warning.icon(), Icon::Triangle);
        assert_eq!(Severity::Info.icon(), Icon::CircleInfo);
        assert_eq!(Severity::Warning.class_name(), "notification-warning");
    }

    #[test]
    fn convenience_defaults_per_severity() {
        let ms = |s: Severity| s.default_lifetime().duration().map(|d| d.as_millis());
        assert_eq!(ms(Severity::Success), Some(3000));
        assert_eq!(ms(Severity::Error), Some(5000));
        assert_eq!(ms(Severity::Warning), Some(4000));
        assert_eq!(ms(Severity::Info), Some(3000));
    }

    #[test]
    fn non_positive_durations_are_persistent() {
        assert_eq!(Lifetime::from_millis(0), Lifetime::Persistent);
        assert_eq!(Lifetime::from_millis(-250), Lifetime::Persistent);
        assert_eq!(Lifetime::from_millis_f64(f64::NAN), Lifetime::Persistent);
        assert_eq!(Lifetime::from_millis_f64(-1.0), Lifetime::Persistent);
        assert_eq!(
            Lifetime::from_millis(1000),
            Lifetime::AutoDismiss(Duration::from_millis(1000))
        );
        assert_eq!(
            Lifetime::from_millis_f64(2500.0),
            Lifetime::AutoDismiss(Duration::from_millis(2500))
        );
    }

    #[test]
    fn exit_delay_is_clamped() {
        assert_eq!(ExitDelay::default().value(), 300);
        assert_eq!(ExitDelay::new(u64::MAX).value(), MAX_EXIT_DELAY_MS);
    }

    #[test]
    fn persistent_notification_has_no_progress() {
        let n = notification(Severity::Info, Lifetime::Persistent);
        assert!(!n.has_progress());
        assert!(n.progress(Instant::now()).is_none());
    }

    #[test]
    fn progress_counts_down() {
        let n = notification(Severity::Success, Lifetime::from_millis(1000));
        let start = n.created_at();
        assert_eq!(n.progress(start), Some(1.0));
        let half = n.progress(start + Duration::from_millis(500)).expect("progress");
        assert!((half - 0.5).abs() < 1e-3);
        assert_eq!(n.progress(start + Duration::from_secs(5)), Some(0.0));
    }

    #[test]
    fn class_list_follows_phase() {
        let mut n = notification(Severity::Error, Lifetime::Persistent);
        assert_eq!(n.class_list(), vec!["notification", "notification-error"]);

        n.set_phase(Phase::Visible);
        assert_eq!(
            n.class_list(),
            vec!["notification", "notification-error", "show"]
        );

        n.set_phase(Phase::Exiting);
        assert!(n.class_list().contains(&"hide"));
    }
}
