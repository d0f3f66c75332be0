//! Cancellable one-shot timers on a virtual millisecond clock.
//!
//! Every scripted beat in the game ("show feedback, then advance after
//! 1000 ms") is a [`Scheduler`] entry owned by the screen that armed it.
//! The scheduler never reads the wall clock: the host advances it by the
//! real elapsed time each frame, and tests advance it by exact amounts.
//!
//! # Design Principles
//!
//! - The clock is the source of truth. Timers fire in due order; ties fire
//!   in the order they were scheduled.
//! - A timer fires at most once. Cancelled timers never fire.
//! - Dropping the scheduler drops every pending timer, so a screen that is
//!   torn down can never receive a late firing.
//! - Firing happens one timer at a time through [`Scheduler::pop_due`], so a
//!   handler may schedule follow-up timers that still fire within the same
//!   advance window.

use std::collections::BTreeMap;

/// Handle to a scheduled timer, usable for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Sequence number of the timer within its scheduler.
    pub const fn sequence(self) -> u64 {
        self.0
    }
}

/// A timer that came due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    /// The timer's handle.
    pub id: TimerId,
    /// The virtual time the timer was due at.
    pub due_ms: u64,
    /// The payload supplied when scheduling.
    pub payload: T,
}

/// Virtual-time scheduler of one-shot timers carrying payloads of type `T`.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    /// Current virtual time in milliseconds since the owner was created.
    now_ms: u64,

    /// Sequence number for the next timer.
    next_seq: u64,

    /// Pending timers keyed by `(due_ms, sequence)`.
    pending: BTreeMap<(u64, u64), T>,

    /// Reverse index from sequence to due time, for cancellation.
    due_by_seq: BTreeMap<u64, u64>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    /// Create an empty scheduler at virtual time 0.
    pub const fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            pending: BTreeMap::new(),
            due_by_seq: BTreeMap::new(),
        }
    }

    /// Current virtual time.
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of timers that have not fired or been cancelled.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Due time of the earliest pending timer.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.pending.first_key_value().map(|(&(due, _), _)| due)
    }

    /// Arm a timer that fires `delay_ms` after the current virtual time.
    pub fn schedule(&mut self, delay_ms: u64, payload: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.saturating_add(1);
        let due = self.now_ms.saturating_add(delay_ms);
        self.pending.insert((due, seq), payload);
        self.due_by_seq.insert(seq, due);
        TimerId(seq)
    }

    /// Whether the timer is still pending.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.due_by_seq.contains_key(&id.0)
    }

    /// Cancel a pending timer, returning its payload.
    ///
    /// Returns `None` if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let due = self.due_by_seq.remove(&id.0)?;
        self.pending.remove(&(due, id.0))
    }

    /// Cancel every pending timer. Returns how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        self.due_by_seq.clear();
        count
    }

    /// Pop the earliest timer due at or before `until_ms`.
    ///
    /// The virtual clock moves forward to the fired timer's due time, so a
    /// handler that schedules a follow-up timer measures its delay from the
    /// moment the first one fired. Returns `None` when nothing is due.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Fired<T>> {
        let (&(due, seq), _) = self.pending.first_key_value()?;
        if due > until_ms {
            return None;
        }
        let payload = self.pending.remove(&(due, seq))?;
        self.due_by_seq.remove(&seq);
        if due > self.now_ms {
            self.now_ms = due;
        }
        Some(Fired {
            id: TimerId(seq),
            due_ms: due,
            payload,
        })
    }

    /// Move the virtual clock to `until_ms` without firing anything.
    ///
    /// Call after draining [`pop_due`](Self::pop_due). The clock never moves
    /// backwards.
    pub fn settle(&mut self, until_ms: u64) {
        if until_ms > self.now_ms {
            self.now_ms = until_ms;
        }
    }

    /// Target time for advancing by `elapsed_ms` from now.
    pub const fn horizon(&self, elapsed_ms: u64) -> u64 {
        self.now_ms.saturating_add(elapsed_ms)
    }

    /// Advance by `elapsed_ms`, returning every due timer in firing order.
    ///
    /// Use this when handlers never schedule follow-ups; otherwise drive
    /// [`pop_due`](Self::pop_due) in a loop.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<Fired<T>> {
        let until = self.horizon(elapsed_ms);
        let mut fired = Vec::new();
        while let Some(timer) = self.pop_due(until) {
            fired.push(timer);
        }
        self.settle(until);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_at_zero() {
        let scheduler: Scheduler<()> = Scheduler::new();
        assert_eq!(scheduler.now_ms(), 0);
        assert_eq!(scheduler.pending_count(), 0);
        assert_eq!(scheduler.next_due_ms(), None);
    }

    #[test]
    fn fires_only_when_due() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(1000, "done");

        assert!(scheduler.advance(999).is_empty());
        assert_eq!(scheduler.now_ms(), 999);

        let fired = scheduler.advance(1);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired.first().map(|f| f.payload), Some("done"));
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn fires_in_due_order_then_schedule_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(300, 'c');
        scheduler.schedule(100, 'a');
        scheduler.schedule(300, 'd');
        scheduler.schedule(200, 'b');

        let order: Vec<char> = scheduler.advance(1000).into_iter().map(|f| f.payload).collect();
        assert_eq!(order, vec!['a', 'b', 'c', 'd']);
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let mut scheduler = Scheduler::new();
        let keep = scheduler.schedule(100, 1);
        let gone = scheduler.schedule(100, 2);

        assert_eq!(scheduler.cancel(gone), Some(2));
        assert_eq!(scheduler.cancel(gone), None);
        assert!(scheduler.is_pending(keep));
        assert!(!scheduler.is_pending(gone));

        let fired: Vec<i32> = scheduler.advance(100).into_iter().map(|f| f.payload).collect();
        assert_eq!(fired, vec![1]);
    }

    #[test]
    fn cancel_all_clears_everything() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(10, ());
        scheduler.schedule(20, ());
        assert_eq!(scheduler.cancel_all(), 2);
        assert!(scheduler.advance(100).is_empty());
    }

    #[test]
    fn follow_up_timers_measure_from_firing_time() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(1000, 0_u32);

        // Advance 2500 in one step; each firing schedules the next beat.
        let until = scheduler.horizon(2500);
        let mut fired_at = Vec::new();
        while let Some(timer) = scheduler.pop_due(until) {
            fired_at.push(timer.due_ms);
            if timer.payload < 5 {
                scheduler.schedule(1000, timer.payload.saturating_add(1));
            }
        }
        scheduler.settle(until);

        assert_eq!(fired_at, vec![1000, 2000]);
        assert_eq!(scheduler.now_ms(), 2500);
        assert_eq!(scheduler.next_due_ms(), Some(3000));
    }

    #[test]
    fn zero_delay_fires_on_next_advance() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(0, ());
        assert_eq!(scheduler.advance(0).len(), 1);
    }

    #[test]
    fn clock_never_moves_backwards() {
        let mut scheduler: Scheduler<()> = Scheduler::new();
        scheduler.settle(500);
        scheduler.settle(100);
        assert_eq!(scheduler.now_ms(), 500);
    }
}
