// src/supervisor/scheduler.rs
// Timer port. The supervisor only ever asks for "run `task` after `delay`".

use std::collections::BTreeMap;
use std::time::Duration;

/// What a timer fires into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Task {
    /// "Did the loading pass mark anything?"
    RetryCheck,
    /// Mutations went quiet; probe for new listings.
    Debounce,
    /// A navigation's content should have rendered by now.
    NavigationSettle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

pub trait Scheduler {
    fn now(&self) -> Duration;
    fn schedule_after(&mut self, delay: Duration, task: Task) -> TimerId;
    /// Returns false when the timer already fired or was never scheduled.
    fn cancel(&mut self, id: TimerId) -> bool;
}

/// Virtual clock. Nothing fires on its own: the owner pops due timers.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    // (due, id) keeps same-instant timers in scheduling order
    queue: BTreeMap<(Duration, TimerId), Task>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn pending_tasks(&self) -> Vec<Task> {
        self.queue.values().copied().collect()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Earliest timer due at or before `until`. The clock moves to its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, Task)> {
        let (&(due, id), _) = self.queue.iter().next()?;
        if due > until {
            return None;
        }
        let task = self.queue.remove(&(due, id))?;
        self.now = self.now.max(due);
        Some((id, task))
    }

    /// Move the clock forward. Never moves it back.
    pub fn set_now(&mut self, at: Duration) {
        self.now = self.now.max(at);
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule_after(&mut self, delay: Duration, task: Task) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.queue.insert((self.now + delay, id), task);
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|&(_, t), _| t != id);
        self.queue.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn pops_in_due_order_and_stops_at_horizon() {
        let mut s = ManualScheduler::new();
        s.schedule_after(ms(1000), Task::NavigationSettle);
        s.schedule_after(ms(500), Task::Debounce);
        s.schedule_after(ms(500), Task::RetryCheck);

        assert_eq!(s.pop_due(ms(400)), None);
        assert_eq!(s.pop_due(ms(600)).map(|(_, t)| t), Some(Task::Debounce));
        assert_eq!(s.pop_due(ms(600)).map(|(_, t)| t), Some(Task::RetryCheck));
        assert_eq!(s.now(), ms(500));
        assert_eq!(s.pop_due(ms(600)), None);
        assert_eq!(s.next_due(), Some(ms(1000)));
    }

    #[test]
    fn cancel_removes_only_that_timer() {
        let mut s = ManualScheduler::new();
        let a = s.schedule_after(ms(500), Task::Debounce);
        s.schedule_after(ms(500), Task::Debounce);
        assert!(s.cancel(a));
        assert!(!s.cancel(a));
        assert_eq!(s.pending(), 1);
    }

    #[test]
    fn delays_are_relative_to_now() {
        let mut s = ManualScheduler::new();
        s.set_now(ms(2000));
        s.schedule_after(ms(500), Task::Debounce);
        assert_eq!(s.next_due(), Some(ms(2500)));
        s.set_now(ms(100));
        assert_eq!(s.now(), ms(2000));
    }
}
