//! Per-run bookkeeping held by the engine alongside the stage.
//!
//! Stored in `SimulationEngine`, NOT as ECS entities.

use firewatch_core::constants::{
    FEED_FLAME_INTERVAL_MS, FEED_FLAME_MAX, FEED_FLAME_STEP, FEED_SMOKE_INTERVAL_MS,
    FEED_SMOKE_MAX, FEED_SMOKE_STEP,
};
use firewatch_core::enums::ActionStep;
use firewatch_core::state::ActionPlanView;

/// Completion state of the emergency action plan.
#[derive(Debug, Clone, Default)]
pub struct ActionPlan {
    completed: [bool; 3],
}

impl ActionPlan {
    /// Mark a step done. Returns `false` if it already was.
    pub fn complete(&mut self, step: ActionStep) -> bool {
        let slot = &mut self.completed[step.index()];
        if *slot {
            return false;
        }
        *slot = true;
        true
    }

    pub fn is_complete(&self, step: ActionStep) -> bool {
        self.completed[step.index()]
    }

    pub fn is_resolved(&self) -> bool {
        self.completed.iter().all(|done| *done)
    }

    pub fn view(&self) -> ActionPlanView {
        ActionPlanView {
            completed: self.completed,
            resolved: self.is_resolved(),
        }
    }
}

/// Activation-to-alarm response times, accumulated over the engine's life.
///
/// Completed runs survive a reset; the run in progress is folded into the
/// average until it either confirms or is reset.
#[derive(Debug, Clone, Default)]
pub struct ResponseStats {
    completed_total_secs: f64,
    completed_runs: u32,
    /// Seconds since activation for the run in progress.
    current_secs: Option<f64>,
}

impl ResponseStats {
    /// A detector was activated; the response clock starts at zero.
    pub fn begin(&mut self) {
        self.current_secs = Some(0.0);
    }

    /// Update the running response time of the current run.
    pub fn update(&mut self, elapsed_secs: f64) {
        if self.current_secs.is_some() {
            self.current_secs = Some(elapsed_secs);
        }
    }

    /// The alarm was confirmed after `elapsed_secs`; close the current run.
    pub fn finish(&mut self, elapsed_secs: f64) {
        if self.current_secs.take().is_some() {
            self.completed_total_secs += elapsed_secs;
            self.completed_runs += 1;
        }
    }

    /// Drop an unfinished run.
    pub fn abandon(&mut self) {
        self.current_secs = None;
    }

    pub fn completed_runs(&self) -> u32 {
        self.completed_runs
    }

    /// Mean response time in seconds, 0.0 when nothing was measured yet.
    pub fn average(&self) -> f64 {
        let (total, count) = match self.current_secs {
            Some(current) => (self.completed_total_secs + current, self.completed_runs + 1),
            None => (self.completed_total_secs, self.completed_runs),
        };
        if count == 0 {
            0.0
        } else {
            total / count as f64
        }
    }
}

/// Smoke and flame overlay on the camera feed, ramped on the run clock from
/// the moment camera verification begins.
#[derive(Debug, Clone, Default)]
pub struct CameraFeed {
    started_ms: Option<f64>,
}

impl CameraFeed {
    /// Start ramping at run time `at_ms`. Later calls keep the first start.
    pub fn begin(&mut self, at_ms: f64) {
        self.started_ms.get_or_insert(at_ms);
    }

    pub fn clear(&mut self) {
        self.started_ms = None;
    }

    /// `(smoke, flame)` intensities at run time `now_ms`.
    pub fn intensities(&self, now_ms: f64) -> (f64, f64) {
        let Some(started) = self.started_ms else {
            return (0.0, 0.0);
        };
        let elapsed = (now_ms - started).max(0.0);
        (
            ramp(elapsed, FEED_SMOKE_INTERVAL_MS, FEED_SMOKE_STEP, FEED_SMOKE_MAX),
            ramp(elapsed, FEED_FLAME_INTERVAL_MS, FEED_FLAME_STEP, FEED_FLAME_MAX),
        )
    }
}

/// One `step` per whole `interval_ms` elapsed, capped at `max`.
fn ramp(elapsed_ms: f64, interval_ms: f64, step: f64, max: f64) -> f64 {
    ((elapsed_ms / interval_ms).floor() * step).min(max)
}
