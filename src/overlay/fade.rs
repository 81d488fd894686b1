//! Crossfade ramp and the deferred-task queue that plays it.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// A fade is a fixed ramp of opacity steps followed by a completion mark.
///
/// Step `i` of `total` (for `i` in `first_step..total`) fires `i * step_interval`
/// after the fade starts and sets opacity to `i / total`. Completion fires at
/// `duration`, independent of when the last step actually ran.
#[derive(Debug, Clone, PartialEq)]
pub struct FadePlan {
    pub first_step: u32,
    pub total_steps: u32,
    pub step_interval: Duration,
    pub duration: Duration,
}

impl Default for FadePlan {
    fn default() -> Self {
        Self {
            first_step: 7,
            total_steps: 14,
            step_interval: Duration::from_millis(14),
            duration: Duration::from_millis(210),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeStep {
    pub delay: Duration,
    pub opacity: f32,
}

impl FadePlan {
    pub fn steps(&self) -> Vec<FadeStep> {
        let total = self.total_steps.max(1);
        (self.first_step.min(total)..total)
            .map(|i| FadeStep {
                delay: self.step_interval * i,
                opacity: i as f32 / total as f32,
            })
            .collect()
    }

    /// Never earlier than the last step.
    pub fn completion_delay(&self) -> Duration {
        self.steps()
            .last()
            .map(|s| s.delay.max(self.duration))
            .unwrap_or(self.duration)
    }
}

/// Deferred tasks ordered by due time, then by insertion.
#[derive(Debug)]
pub struct TimerQueue<T> {
    entries: BTreeMap<(Instant, u64), T>,
    seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            seq: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Instant, task: T) {
        self.entries.insert((due, self.seq), task);
        self.seq += 1;
    }

    /// Earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<T> {
        let (&(due, _), _) = self.entries.first_key_value()?;
        if due > now {
            return None;
        }
        self.entries.pop_first().map(|(_, task)| task)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.keys().next().map(|&(due, _)| due)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plan_steps() {
        let steps = FadePlan::default().steps();
        assert_eq!(steps.len(), 7);
        assert_eq!(steps[0].delay, Duration::from_millis(98));
        assert_eq!(steps[0].opacity, 0.5);
        assert_eq!(steps[6].delay, Duration::from_millis(182));
        assert!(steps[6].opacity < 1.0);
    }

    #[test]
    fn test_plan_is_monotonic() {
        let steps = FadePlan::default().steps();
        for pair in steps.windows(2) {
            assert!(pair[1].delay > pair[0].delay);
            assert!(pair[1].opacity > pair[0].opacity);
        }
    }

    #[test]
    fn test_completion_after_last_step() {
        let plan = FadePlan::default();
        assert_eq!(plan.completion_delay(), Duration::from_millis(210));

        let stretched = FadePlan {
            duration: Duration::from_millis(50),
            ..FadePlan::default()
        };
        assert_eq!(stretched.completion_delay(), Duration::from_millis(182));
    }

    #[test]
    fn test_degenerate_plan() {
        let plan = FadePlan {
            first_step: 20,
            total_steps: 0,
            ..FadePlan::default()
        };
        assert!(plan.steps().is_empty());
        assert_eq!(plan.completion_delay(), Duration::from_millis(210));
    }

    #[test]
    fn test_queue_pops_in_due_order() {
        let start = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(start + Duration::from_millis(30), "c");
        queue.schedule(start + Duration::from_millis(10), "a");
        queue.schedule(start + Duration::from_millis(10), "b");

        assert_eq!(queue.next_deadline(), Some(start + Duration::from_millis(10)));
        assert_eq!(queue.pop_due(start), None);

        let now = start + Duration::from_millis(20);
        assert_eq!(queue.pop_due(now), Some("a"));
        assert_eq!(queue.pop_due(now), Some("b"));
        assert_eq!(queue.pop_due(now), None);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_queue_clear() {
        let start = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(start, 1);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.next_deadline(), None);
    }
}
