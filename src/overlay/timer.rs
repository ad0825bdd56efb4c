//! Cancellable one-shot timers on a caller-driven clock.
//!
//! Nothing here sleeps or spawns: the owner advances the clock from its
//! event loop and collects whatever came due. That keeps every callback on
//! the UI thread and makes the ordering deterministic under test.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<T> {
    id: TimerId,
    deadline: Duration,
    payload: T,
}

#[derive(Debug)]
pub struct TimerQueue<T> {
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn schedule(&mut self, deadline: Duration, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            deadline,
            payload,
        });
        id
    }

    /// Returns `false` when the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return every payload whose deadline is at or before `now`,
    /// earliest deadline first; ties fire in scheduling order.
    pub fn drain_due(&mut self, now: Duration) -> Vec<(TimerId, T)> {
        let mut due = Vec::new();
        let mut idx = 0;
        while idx < self.entries.len() {
            if self.entries[idx].deadline <= now {
                due.push(self.entries.remove(idx));
            } else {
                idx += 1;
            }
        }
        due.sort_by_key(|e| (e.deadline, e.id));
        due.into_iter().map(|e| (e.id, e.payload)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn fires_only_when_due() {
        let mut q = TimerQueue::new();
        q.schedule(ms(300), "a");
        assert!(q.drain_due(ms(299)).is_empty());
        let fired: Vec<_> = q.drain_due(ms(300)).into_iter().map(|(_, p)| p).collect();
        assert_eq!(fired, vec!["a"]);
        assert!(q.is_empty());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut q = TimerQueue::new();
        let id = q.schedule(ms(10), 1);
        assert!(q.cancel(id));
        assert!(!q.cancel(id));
        assert!(q.drain_due(ms(1000)).is_empty());
    }

    #[test]
    fn due_timers_come_out_in_deadline_order() {
        let mut q = TimerQueue::new();
        q.schedule(ms(400), "late");
        q.schedule(ms(100), "early");
        q.schedule(ms(100), "early-second");
        let fired: Vec<_> = q.drain_due(ms(500)).into_iter().map(|(_, p)| p).collect();
        assert_eq!(fired, vec!["early", "early-second", "late"]);
    }
}
