//! Cancellable timers polled against the simulation clock
//!
//! Nothing here sleeps or calls back. Owners register a payload with a due
//! time and drain due entries each tick with [`TimerQueue::pop_due`], handling
//! the payload with whatever context they hold.

use serde::{Deserialize, Serialize};

/// Handle to a registered timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u64);

#[derive(Debug, Clone)]
struct TimerEntry<T> {
    id: TimerId,
    due_ms: u64,
    /// Repeat period; `None` for one-shot timers
    period_ms: Option<u64>,
    payload: T,
}

/// A timer that fell due
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<T> {
    pub id: TimerId,
    /// Scheduled time, which may be earlier than the poll time
    pub due_ms: u64,
    pub payload: T,
}

/// Ordered set of pending timers
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    entries: Vec<TimerEntry<T>>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T: Clone> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&mut self, due_ms: u64, period_ms: Option<u64>, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(TimerEntry {
            id,
            due_ms,
            period_ms,
            payload,
        });
        id
    }

    /// One-shot timer firing `delay_ms` after `now_ms`
    pub fn after(&mut self, now_ms: u64, delay_ms: u64, payload: T) -> TimerId {
        self.register(now_ms.saturating_add(delay_ms), None, payload)
    }

    /// Repeating timer firing every `period_ms`, first at `now_ms + period_ms`
    ///
    /// A zero period is bumped to 1 ms so a single poll can never loop forever.
    pub fn every(&mut self, now_ms: u64, period_ms: u64, payload: T) -> TimerId {
        let period = period_ms.max(1);
        self.register(now_ms.saturating_add(period), Some(period), payload)
    }

    /// Cancel a timer. Returns false if it already fired (one-shot) or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Drop every pending timer
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pop the earliest timer due at or before `now_ms`
    ///
    /// Ties resolve by registration order. A repeating timer fires at most once
    /// per poll: it is re-armed on its own period grid at the first slot after
    /// `now_ms`, so a clock jump skips missed intervals instead of bursting.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Fired<T>> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= now_ms)
            .min_by_key(|(_, e)| (e.due_ms, e.id))
            .map(|(i, _)| i)?;

        let entry = &mut self.entries[idx];
        let fired = Fired {
            id: entry.id,
            due_ms: entry.due_ms,
            payload: entry.payload.clone(),
        };

        match entry.period_ms {
            Some(period) => {
                let missed = (now_ms - entry.due_ms) / period;
                entry.due_ms = entry
                    .due_ms
                    .saturating_add(period.saturating_mul(missed + 1));
            }
            None => {
                self.entries.remove(idx);
            }
        }

        Some(fired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(q: &mut TimerQueue<&'static str>, now: u64) -> Vec<(u64, &'static str)> {
        let mut out = Vec::new();
        while let Some(f) = q.pop_due(now) {
            out.push((f.due_ms, f.payload));
        }
        out
    }

    #[test]
    fn one_shot_fires_once() {
        let mut q = TimerQueue::new();
        q.after(0, 100, "a");
        assert!(drain(&mut q, 99).is_empty());
        assert_eq!(drain(&mut q, 100), vec![(100, "a")]);
        assert!(drain(&mut q, 1000).is_empty());
        assert!(q.is_empty());
    }

    #[test]
    fn repeating_keeps_its_phase() {
        let mut q = TimerQueue::new();
        q.every(0, 100, "r");
        assert_eq!(drain(&mut q, 150), vec![(100, "r")]);
        assert_eq!(drain(&mut q, 230), vec![(200, "r")]);
        assert_eq!(drain(&mut q, 300), vec![(300, "r")]);
    }

    #[test]
    fn repeating_fires_once_after_clock_jump() {
        let mut q = TimerQueue::new();
        q.every(0, 100, "r");
        assert_eq!(drain(&mut q, 10_050), vec![(100, "r")]);
        assert!(drain(&mut q, 10_099).is_empty());
        assert_eq!(drain(&mut q, 10_100), vec![(10_100, "r")]);
    }

    #[test]
    fn one_ms_period_fires_once_per_poll() {
        let mut q = TimerQueue::new();
        q.every(0, 0, "r");
        assert_eq!(drain(&mut q, 16).len(), 1);
        assert_eq!(drain(&mut q, 32).len(), 1);
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut q = TimerQueue::new();
        let id = q.every(0, 100, "r");
        assert!(q.cancel(id));
        assert!(!q.cancel(id));
        assert!(drain(&mut q, 1000).is_empty());
    }

    #[test]
    fn ties_resolve_by_registration_order() {
        let mut q = TimerQueue::new();
        q.after(0, 50, "first");
        q.after(0, 50, "second");
        assert_eq!(drain(&mut q, 50), vec![(50, "first"), (50, "second")]);
    }
}
