//! Pending stage transitions.
//!
//! Each stage, once entered, schedules its own auto-advance. A timer only
//! carries enough context to be checked against the live engine state when
//! it fires: the run generation it belongs to and the stage that armed it.

use std::collections::VecDeque;

use firewatch_core::enums::Stage;

/// A scheduled auto-advance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageTimer {
    /// Run clock time at which the timer fires (ms).
    pub due_ms: f64,
    /// Stage that armed the timer; firing advances from this stage.
    pub from: Stage,
    /// Run generation the timer was armed in.
    pub generation: u64,
}

/// Timers ordered by due time.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    timers: VecDeque<StageTimer>,
}

impl TimerQueue {
    /// Insert keeping due-time order; equal due times keep insertion order.
    pub fn schedule(&mut self, timer: StageTimer) {
        let index = self
            .timers
            .iter()
            .position(|t| t.due_ms > timer.due_ms)
            .unwrap_or(self.timers.len());
        self.timers.insert(index, timer);
    }

    /// Remove and return the earliest timer due at or before `clock_ms`.
    pub fn pop_due(&mut self, clock_ms: f64) -> Option<StageTimer> {
        match self.timers.front() {
            Some(timer) if timer.due_ms <= clock_ms => self.timers.pop_front(),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer(due_ms: f64, from: Stage) -> StageTimer {
        StageTimer {
            due_ms,
            from,
            generation: 1,
        }
    }

    #[test]
    fn test_pop_due_respects_clock() {
        let mut queue = TimerQueue::default();
        queue.schedule(timer(2000.0, Stage::DetectorActivated));
        assert!(queue.pop_due(1999.0).is_none());
        assert_eq!(
            queue.pop_due(2000.0).map(|t| t.from),
            Some(Stage::DetectorActivated)
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_schedule_keeps_due_order() {
        let mut queue = TimerQueue::default();
        queue.schedule(timer(3000.0, Stage::EsserProcessing));
        queue.schedule(timer(1000.0, Stage::DetectorActivated));
        queue.schedule(timer(3000.0, Stage::MoxaTransmission));
        assert_eq!(queue.len(), 3);

        let order: Vec<Stage> = std::iter::from_fn(|| queue.pop_due(f64::MAX))
            .map(|t| t.from)
            .collect();
        assert_eq!(
            order,
            vec![
                Stage::DetectorActivated,
                Stage::EsserProcessing,
                Stage::MoxaTransmission
            ]
        );
    }
}
