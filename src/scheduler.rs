// SPDX-License-Identifier: MPL-2.0
//! Cancellable one-shot timers.
//!
//! A [`Scheduler`] holds payloads keyed by deadline. Callers poll it with
//! the current instant and receive due payloads in deadline order (ties
//! resolved by scheduling order). Every scheduled payload gets a
//! [`TimerToken`] that can cancel it before it fires.

use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

/// Handle to a pending timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

#[derive(Debug)]
pub struct Scheduler<E> {
    next_seq: u64,
    pending: BTreeMap<(Instant, u64), E>,
    deadlines: HashMap<u64, Instant>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self {
            next_seq: 0,
            pending: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }
}

impl<E> Scheduler<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `event` to fire at `deadline`.
    pub fn schedule_at(&mut self, deadline: Instant, event: E) -> TimerToken {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert((deadline, seq), event);
        self.deadlines.insert(seq, deadline);
        TimerToken(seq)
    }

    /// Schedules `event` to fire `delay` after `now`.
    pub fn schedule_after(&mut self, now: Instant, delay: Duration, event: E) -> TimerToken {
        self.schedule_at(now + delay, event)
    }

    /// Cancels a pending timer.
    ///
    /// Returns the payload if the timer had not fired yet.
    pub fn cancel(&mut self, token: TimerToken) -> Option<E> {
        let deadline = self.deadlines.remove(&token.0)?;
        self.pending.remove(&(deadline, token.0))
    }

    /// Returns whether the timer is still pending.
    #[must_use]
    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.deadlines.contains_key(&token.0)
    }

    /// Removes and returns the earliest timer whose deadline is at or
    /// before `now`, together with its deadline.
    pub fn pop_due(&mut self, now: Instant) -> Option<(Instant, E)> {
        let (&(deadline, seq), _) = self.pending.first_key_value()?;
        if deadline > now {
            return None;
        }
        self.deadlines.remove(&seq);
        self.pending
            .remove(&(deadline, seq))
            .map(|event| (deadline, event))
    }

    /// Returns the earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Cancels every pending timer.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.deadlines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn due_events_pop_in_deadline_order() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.schedule_after(start, ms(300), "late");
        scheduler.schedule_after(start, ms(100), "early");

        assert!(scheduler.pop_due(start).is_none());

        let now = start + ms(500);
        assert_eq!(scheduler.pop_due(now).map(|(_, e)| e), Some("early"));
        assert_eq!(scheduler.pop_due(now).map(|(_, e)| e), Some("late"));
        assert!(scheduler.pop_due(now).is_none());
    }

    #[test]
    fn equal_deadlines_keep_scheduling_order() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.schedule_after(start, ms(10), 1);
        scheduler.schedule_after(start, ms(10), 2);
        scheduler.schedule_after(start, ms(10), 3);

        let fired: Vec<_> = std::iter::from_fn(|| scheduler.pop_due(start + ms(10)))
            .map(|(_, e)| e)
            .collect();
        assert_eq!(fired, vec![1, 2, 3]);
    }

    #[test]
    fn event_fires_exactly_at_deadline() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.schedule_after(start, ms(1000), ());

        assert!(scheduler.pop_due(start + ms(999)).is_none());
        let (deadline, ()) = scheduler.pop_due(start + ms(1000)).expect("due");
        assert_eq!(deadline, start + ms(1000));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        let token = scheduler.schedule_after(start, ms(50), "gone");
        scheduler.schedule_after(start, ms(60), "kept");

        assert_eq!(scheduler.cancel(token), Some("gone"));
        assert!(!scheduler.is_pending(token));
        assert_eq!(scheduler.cancel(token), None);

        assert_eq!(scheduler.pop_due(start + ms(100)).map(|(_, e)| e), Some("kept"));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn next_deadline_tracks_earliest_timer() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        assert!(scheduler.next_deadline().is_none());

        scheduler.schedule_after(start, ms(200), ());
        let early = scheduler.schedule_after(start, ms(100), ());
        assert_eq!(scheduler.next_deadline(), Some(start + ms(100)));

        scheduler.cancel(early);
        assert_eq!(scheduler.next_deadline(), Some(start + ms(200)));
    }

    #[test]
    fn clear_drops_everything() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        let token = scheduler.schedule_after(start, ms(1), ());
        scheduler.clear();

        assert!(scheduler.is_empty());
        assert!(!scheduler.is_pending(token));
        assert_eq!(scheduler.len(), 0);
    }
}
