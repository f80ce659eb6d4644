#![forbid(unsafe_code)]

//! Owner-held timer queue with one-shot and periodic timers.
//!
//! There are no threads and no wall-clock reads here: every operation takes
//! the caller's `now`. Tests drive time by adding durations to a base
//! instant, so delayed transitions are reproducible without sleeping.
//!
//! # Invariants
//!
//! 1. A cancelled timer is never returned by [`TimerQueue::pop_due`].
//! 2. Due timers pop in deadline order; ties pop in scheduling order.
//! 3. A periodic timer is re-armed at `deadline + period` when popped, so a
//!    host that advances time in one large step still observes every period,
//!    one pop at a time. Cancelling between pops stops the remainder.
//! 4. [`TimerQueue::cancel_all`] leaves the queue empty.

use web_time::{Duration, Instant};

/// Stable handle for a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A timer popped from the queue.
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<M> {
    pub id: TimerId,
    /// The deadline this firing was scheduled for (not the `now` it was
    /// popped at). Follow-up timers should be scheduled from here.
    pub deadline: Instant,
    pub msg: M,
}

/// One-shot or periodic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Fires once, then is removed.
    Once,
    /// Fires every `period` until cancelled.
    Every(Duration),
}

#[derive(Debug, Clone)]
struct Entry<M> {
    id: TimerId,
    deadline: Instant,
    kind: TimerKind,
    msg: M,
}

/// A schedule of pending timers, each carrying the message it delivers.
#[derive(Debug, Clone)]
pub struct TimerQueue<M> {
    entries: Vec<Entry<M>>,
    next_id: u64,
}

impl<M> Default for TimerQueue<M> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl<M: Clone + std::fmt::Debug> TimerQueue<M> {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `msg` to fire once, `delay` after `now`.
    pub fn after(&mut self, now: Instant, delay: Duration, msg: M) -> TimerId {
        self.push(now + delay, TimerKind::Once, msg)
    }

    /// Schedule `msg` to fire every `period`, first at `now + period`.
    ///
    /// A zero period is bumped to one millisecond so the timer cannot fire
    /// unboundedly at a single instant.
    pub fn every(&mut self, now: Instant, period: Duration, msg: M) -> TimerId {
        let period = period.max(Duration::from_millis(1));
        self.push(now + period, TimerKind::Every(period), msg)
    }

    fn push(&mut self, deadline: Instant, kind: TimerKind, msg: M) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        tracing::trace!(
            target: "calldeck.timer",
            timer_id = id.0,
            kind = ?kind,
            msg = ?msg,
            "timer scheduled"
        );
        self.entries.push(Entry {
            id,
            deadline,
            kind,
            msg,
        });
        id
    }

    /// Cancel a timer. Returns `true` if it was pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = self.entries.len() != before;
        if removed {
            tracing::trace!(target: "calldeck.timer", timer_id = id.0, "timer cancelled");
        }
        removed
    }

    /// Cancel every pending timer. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.entries.len();
        self.entries.clear();
        if n > 0 {
            tracing::debug!(target: "calldeck.timer", cancelled = n, "all timers cancelled");
        }
        n
    }

    /// Whether `id` is still pending.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Pop the earliest timer due at or before `now`.
    ///
    /// Periodic timers are re-armed before being returned.
    pub fn pop_due(&mut self, now: Instant) -> Option<Fired<M>> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= now)
            .min_by(|(_, a), (_, b)| a.deadline.cmp(&b.deadline).then(a.id.cmp(&b.id)))
            .map(|(i, _)| i)?;

        let fired = Fired {
            id: self.entries[idx].id,
            deadline: self.entries[idx].deadline,
            msg: self.entries[idx].msg.clone(),
        };
        match self.entries[idx].kind {
            TimerKind::Once => {
                self.entries.remove(idx);
            }
            TimerKind::Every(period) => {
                self.entries[idx].deadline += period;
            }
        }
        tracing::trace!(target: "calldeck.timer", timer_id = fired.id.0, "timer fired");
        Some(fired)
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
