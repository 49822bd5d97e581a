//! Scripted training drill.
//!
//! A drill is a timeline of operator commands. It can be played in virtual
//! time straight against an engine (fast, deterministic) or in real time
//! through the controller and its frame loop.

use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::info;

use firewatch_core::commands::OperatorCommand;
use firewatch_core::dwell::DwellTimes;
use firewatch_core::enums::{ActionStep, Stage};
use firewatch_core::level::ParkingLevel;
use firewatch_core::state::SimulationSnapshot;
use firewatch_render::{render_scene, DisplayList, Scene};
use firewatch_sim::SimulationEngine;

use crate::controller::{ControlError, Controller};

#[derive(Debug, Error)]
pub enum DrillError {
    #[error("frame {requested} never reached, the drill ran {frames} frames")]
    FrameNotReached { requested: u64, frames: u64 },
}

/// Gap between consecutive operator actions once the alarm is up (ms).
const OPERATOR_STEP_MS: f64 = 1_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedCommand {
    /// Offset from the start of the drill (ms).
    pub at_ms: f64,
    pub command: OperatorCommand,
}

#[derive(Debug, Clone, Default)]
pub struct DrillScript {
    steps: Vec<ScriptedCommand>,
}

impl DrillScript {
    pub fn new(mut steps: Vec<ScriptedCommand>) -> Self {
        steps.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
        Self { steps }
    }

    /// The standard exercise: click `detector_id`, wait for the alarm, work
    /// through the action plan, then clear the notification log.
    ///
    /// `None` if the detector is not on `level`.
    pub fn standard(level: &ParkingLevel, detector_id: &str, dwell: &DwellTimes) -> Option<Self> {
        let position = level.detector(detector_id)?.coordinates;
        let alarm_ms = dwell.total() * 1000.0;

        let mut steps = vec![
            ScriptedCommand {
                at_ms: 0.0,
                command: OperatorCommand::PointerMove { position },
            },
            ScriptedCommand {
                at_ms: 0.0,
                command: OperatorCommand::PointerClick { position },
            },
        ];
        let mut at_ms = alarm_ms;
        for step in ActionStep::ALL {
            at_ms += OPERATOR_STEP_MS;
            steps.push(ScriptedCommand {
                at_ms,
                command: OperatorCommand::CompleteActionStep {
                    index: step.index(),
                },
            });
        }
        // One notification per stage after Idle plus one per action step.
        let notification_count = (Stage::ALL.len() - 1 + ActionStep::ALL.len()) as u32;
        at_ms += OPERATOR_STEP_MS;
        for id in 1..=notification_count {
            steps.push(ScriptedCommand {
                at_ms,
                command: OperatorCommand::AcknowledgeNotification { id },
            });
        }
        steps.push(ScriptedCommand {
            at_ms: at_ms + OPERATOR_STEP_MS,
            command: OperatorCommand::PointerLeave,
        });
        Some(Self::new(steps))
    }

    pub fn steps(&self) -> &[ScriptedCommand] {
        &self.steps
    }

    /// Time of the last scripted command.
    pub fn duration_ms(&self) -> f64 {
        self.steps.last().map_or(0.0, |s| s.at_ms)
    }
}

/// A stage change observed during a drill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageEntry {
    pub stage: Stage,
    pub at_ms: f64,
}

#[derive(Debug, Clone)]
pub struct DrillReport {
    pub frames: u64,
    pub transitions: Vec<StageEntry>,
    pub final_snapshot: SimulationSnapshot,
}

impl DrillReport {
    pub fn resolved(&self) -> bool {
        self.final_snapshot.action_plan.resolved
    }
}

/// Play `script` against `engine` in virtual time, one frame every
/// `frame_ms`. Stops after the last command's frame or after `max_frames`.
/// `on_frame` sees every snapshot with its frame index.
pub fn run_drill(
    engine: &mut SimulationEngine,
    script: &DrillScript,
    frame_ms: f64,
    max_frames: Option<u64>,
    mut on_frame: impl FnMut(u64, &SimulationSnapshot),
) -> DrillReport {
    let mut pending = script.steps().iter().peekable();
    let mut transitions = Vec::new();
    let mut last_stage = engine.stage();
    let mut frame = 0u64;

    loop {
        let t = frame as f64 * frame_ms;
        while let Some(step) = pending.next_if(|s| s.at_ms <= t) {
            engine.queue_command(step.command.clone());
        }

        let snapshot = engine.frame(t);
        if snapshot.stage != last_stage {
            transitions.push(StageEntry {
                stage: snapshot.stage,
                at_ms: t,
            });
            last_stage = snapshot.stage;
        }
        on_frame(frame, &snapshot);
        frame += 1;

        let finished = pending.peek().is_none();
        let capped = max_frames.is_some_and(|max| frame >= max);
        if finished || capped {
            info!(frames = frame, stage = ?snapshot.stage, "drill finished");
            return DrillReport {
                frames: frame,
                transitions,
                final_snapshot: snapshot,
            };
        }
    }
}

/// Play `script` up to frame `index` and render that frame against `level`.
pub fn capture_frame(
    engine: &mut SimulationEngine,
    script: &DrillScript,
    level: &ParkingLevel,
    frame_ms: f64,
    max_frames: Option<u64>,
    index: u64,
) -> Result<DisplayList, DrillError> {
    let cap = index.saturating_add(1);
    let cap = max_frames.map_or(cap, |max| max.min(cap));
    let mut captured = None;
    let report = run_drill(engine, script, frame_ms, Some(cap), |frame, snapshot| {
        if frame == index {
            captured = Some(render_scene(&Scene { level, snapshot }));
        }
    });
    captured.ok_or(DrillError::FrameNotReached {
        requested: index,
        frames: report.frames,
    })
}

/// Play `script` in real time through a running controller, polling for
/// snapshots every `poll`. Returns the last snapshot seen.
pub fn play_realtime(
    controller: &Controller,
    script: &DrillScript,
    poll: Duration,
) -> Result<Option<SimulationSnapshot>, ControlError> {
    let origin = Instant::now();
    let mut last_stage = None;

    for step in script.steps() {
        let due = origin + Duration::from_secs_f64(step.at_ms.max(0.0) / 1000.0);
        while Instant::now() < due {
            if let Some(snapshot) = controller.snapshot()? {
                if last_stage != Some(snapshot.stage) {
                    info!(stage = ?snapshot.stage, progress = snapshot.progress_percent, "stage");
                    last_stage = Some(snapshot.stage);
                }
            }
            std::thread::sleep(poll.min(due.saturating_duration_since(Instant::now())));
        }
        controller.send(step.command.clone())?;
    }

    // Let the loop apply the final commands.
    std::thread::sleep(poll * 2);
    controller.snapshot()
}
