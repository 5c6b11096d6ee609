//! Virtual-clock timer queue.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
#[must_use]
pub fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Handle to a scheduled timer. Valid until the timer fires (one-shot),
/// is cancelled, or the queue is cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

#[derive(Clone, Debug)]
struct Timer<K> {
    id: TimerId,
    due_ms: u64,
    period_ms: Option<u64>,
    kind: K,
}

/// A timer that came due.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<K> {
    pub id: TimerId,
    pub kind: K,
    /// Virtual time at which it fired, in milliseconds.
    pub at_ms: u64,
}

/// Single-threaded timer queue driven by an explicit clock.
///
/// Nothing fires on its own. The owner moves time forward by calling
/// `pop_due` until it returns `None` and then `advance_to`. Timers fire in
/// due-time order, ties broken by scheduling order. Because timers are
/// popped one at a time, a handler may cancel or schedule timers before
/// the next one is considered.
///
/// Time is a `u64` of milliseconds. A repeating timer whose next firing
/// would pass `u64::MAX` fires one last time and is dropped.
#[derive(Clone, Debug)]
pub struct TimerQueue<K> {
    now_ms: u64,
    next_id: u64,
    timers: Vec<Timer<K>>,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::starting_at(0)
    }
}

impl<K> TimerQueue<K> {
    /// Create an empty queue with the clock at `now_ms`.
    #[must_use]
    pub fn starting_at(now_ms: u64) -> Self {
        Self {
            now_ms,
            next_id: 0,
            timers: Vec::new(),
        }
    }
}

impl<K: Clone> TimerQueue<K> {
    /// Create an empty queue at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        Duration::from_millis(self.now_ms)
    }

    fn push(&mut self, due_ms: u64, period_ms: Option<u64>, kind: K) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            due_ms: due_ms.max(self.now_ms),
            period_ms,
            kind,
        });
        id
    }

    /// Fire `kind` once after `delay`.
    pub fn schedule_once(&mut self, delay: Duration, kind: K) -> TimerId {
        let due_ms = self.now_ms.saturating_add(millis(delay));
        self.push(due_ms, None, kind)
    }

    /// Fire `kind` once at absolute time `due_ms` (or now, if that has
    /// passed).
    pub fn schedule_once_at(&mut self, due_ms: u64, kind: K) -> TimerId {
        self.push(due_ms, None, kind)
    }

    /// Fire `kind` every `period`, first after one period.
    ///
    /// Periods shorter than a millisecond are rounded up to one.
    pub fn schedule_repeating(&mut self, period: Duration, kind: K) -> TimerId {
        let period_ms = millis(period).max(1);
        let due_ms = self.now_ms.saturating_add(period_ms);
        self.push(due_ms, Some(period_ms), kind)
    }

    /// Fire `kind` every `period`, first at absolute time `first_due_ms`.
    pub fn schedule_repeating_at(&mut self, first_due_ms: u64, period: Duration, kind: K) -> TimerId {
        let period_ms = millis(period).max(1);
        self.push(first_due_ms, Some(period_ms), kind)
    }

    /// Cancel a timer. Returns false if it was not pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.id != id);
        self.timers.len() != before
    }

    /// Cancel every timer. The clock keeps its current time.
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Is the timer still scheduled?
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|timer| timer.id == id)
    }

    /// When the timer fires next, if it is scheduled.
    #[must_use]
    pub fn due_ms(&self, id: TimerId) -> Option<u64> {
        self.timers
            .iter()
            .find(|timer| timer.id == id)
            .map(|timer| timer.due_ms)
    }

    /// Number of scheduled timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Pop the earliest timer due at or before `until_ms`.
    ///
    /// Moves the clock to the timer's due time. Repeating timers are
    /// rescheduled one period later under the same ID.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Fired<K>> {
        let position = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due_ms <= until_ms)
            .min_by_key(|(_, timer)| (timer.due_ms, timer.id))
            .map(|(position, _)| position)?;

        let due_ms = self.timers[position].due_ms;
        self.now_ms = self.now_ms.max(due_ms);

        let next_ms = self.timers[position]
            .period_ms
            .and_then(|period_ms| due_ms.checked_add(period_ms));

        let fired = match next_ms {
            Some(next_ms) => {
                let timer = &mut self.timers[position];
                timer.due_ms = next_ms;
                Fired {
                    id: timer.id,
                    kind: timer.kind.clone(),
                    at_ms: due_ms,
                }
            }
            None => {
                let timer = self.timers.swap_remove(position);
                Fired {
                    id: timer.id,
                    kind: timer.kind,
                    at_ms: due_ms,
                }
            }
        };

        Some(fired)
    }

    /// Consume, in one step, the firings of repeating timer `id` that are
    /// due at or before `until_ms` and strictly before every other timer.
    ///
    /// Returns how many firings were consumed. The clock moves to the last
    /// of them. Ordering against other timers is unchanged.
    pub fn skip_repeats(&mut self, id: TimerId, until_ms: u64) -> u64 {
        let mut limit_ms = until_ms;
        let other_due = self
            .timers
            .iter()
            .filter(|timer| timer.id != id)
            .map(|timer| timer.due_ms)
            .min();
        if let Some(other_due) = other_due {
            if other_due <= limit_ms {
                match other_due.checked_sub(1) {
                    Some(before) => limit_ms = before,
                    None => return 0,
                }
            }
        }

        let Some(position) = self.timers.iter().position(|timer| timer.id == id) else {
            return 0;
        };
        let due_ms = self.timers[position].due_ms;
        let Some(period_ms) = self.timers[position].period_ms else {
            return 0;
        };
        if due_ms > limit_ms {
            return 0;
        }

        let count = (limit_ms - due_ms) / period_ms + 1;
        let last_ms = due_ms + (count - 1) * period_ms;
        self.now_ms = self.now_ms.max(last_ms);

        match last_ms.checked_add(period_ms) {
            Some(next_ms) => self.timers[position].due_ms = next_ms,
            None => {
                self.timers.swap_remove(position);
            }
        }
        count
    }

    /// Move the clock forward to `until_ms` (never backwards).
    ///
    /// Call after draining `pop_due(until_ms)`.
    pub fn advance_to(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}
