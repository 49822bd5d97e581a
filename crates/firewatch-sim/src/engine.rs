//! Simulation engine: the stage state machine and the particle world.
//!
//! `SimulationEngine` owns the stage pipeline, the active detector and
//! camera, notifications, the action plan, pending stage timers and the hecs
//! particle world. It processes operator commands, advances on host frame
//! timestamps and produces `SimulationSnapshot`s. Completely headless, so the
//! whole pipeline can be driven deterministically from tests.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use firewatch_core::commands::OperatorCommand;
use firewatch_core::constants::{DEFAULT_VOLUME, DETECTOR_HIT_RADIUS, MAX_VOLUME};
use firewatch_core::dwell::DwellTimes;
use firewatch_core::enums::{ActionStep, NotificationLevel, Stage};
use firewatch_core::events::Notification;
use firewatch_core::level::{Camera, Detector, ParkingLevel};
use firewatch_core::state::{CameraFeedView, SimulationSnapshot, Statistics};
use firewatch_core::types::{Point, Surface};

use crate::camera_select::select_camera;
use crate::levels::demo_levels;
use crate::run::{ActionPlan, CameraFeed, ResponseStats};
use crate::scheduler::FrameScheduler;
use crate::systems;
use crate::systems::snapshot::SnapshotInput;
use crate::timers::{StageTimer, TimerQueue};

/// Configuration for a new engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// RNG seed for the particle systems. Same seed = same simulation.
    pub seed: u64,
    pub dwell: DwellTimes,
    /// Initial drawable size; packet anchors are placed against it.
    pub surface: Surface,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            dwell: DwellTimes::default(),
            surface: Surface::default(),
        }
    }
}

/// The simulation engine. Owns all run state and the particle world.
pub struct SimulationEngine {
    levels: Vec<ParkingLevel>,
    world: World,
    rng: ChaCha8Rng,
    dwell: DwellTimes,

    // --- Stage machine ---
    stage: Stage,
    active: bool,
    current_level: usize,
    active_detector: Option<String>,
    active_camera: Option<String>,
    hovered_detector: Option<String>,
    notifications: Vec<Notification>,
    next_notification_id: u32,
    action_plan: ActionPlan,
    response: ResponseStats,
    camera_feed: CameraFeed,

    // --- Timing ---
    timers: TimerQueue,
    /// Bumped on every start and reset; timers from older runs never fire.
    generation: u64,
    /// Run time accumulated from stage-clock frames (ms).
    run_clock_ms: f64,
    activated_at_ms: f64,
    last_timestamp_ms: f64,
    stage_clock: FrameScheduler,
    smoke_loop: FrameScheduler,
    packet_loop: FrameScheduler,

    command_queue: VecDeque<OperatorCommand>,
    despawn_buffer: Vec<Entity>,

    // --- Presentation pass-through ---
    volume: u8,
    surface: Surface,
    camera_fullscreen: bool,
}

impl SimulationEngine {
    /// Create an engine over the given levels.
    pub fn new(config: SimConfig, levels: Vec<ParkingLevel>) -> Self {
        Self {
            levels,
            world: World::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            dwell: config.dwell,
            stage: Stage::Idle,
            active: false,
            current_level: 0,
            active_detector: None,
            active_camera: None,
            hovered_detector: None,
            notifications: Vec::new(),
            next_notification_id: 0,
            action_plan: ActionPlan::default(),
            response: ResponseStats::default(),
            camera_feed: CameraFeed::default(),
            timers: TimerQueue::default(),
            generation: 0,
            run_clock_ms: 0.0,
            activated_at_ms: 0.0,
            last_timestamp_ms: 0.0,
            stage_clock: FrameScheduler::new(),
            smoke_loop: FrameScheduler::new(),
            packet_loop: FrameScheduler::new(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            volume: DEFAULT_VOLUME,
            surface: config.surface,
            camera_fullscreen: false,
        }
    }

    /// Create an engine over the built-in demo car park.
    pub fn with_demo_levels(config: SimConfig) -> Self {
        Self::new(config, demo_levels())
    }

    /// Queue an operator command for processing at the next frame boundary.
    pub fn queue_command(&mut self, command: OperatorCommand) {
        self.command_queue.push_back(command);
    }

    /// Advance to host timestamp `timestamp_ms` and return the resulting
    /// snapshot.
    ///
    /// Order within a frame: queued commands, then stage timers, then smoke,
    /// then packets, then cleanup. A packet spawned in the frame a stage
    /// changes therefore already uses the new stage's target and colour.
    pub fn frame(&mut self, timestamp_ms: f64) -> SimulationSnapshot {
        self.last_timestamp_ms = timestamp_ms;
        self.process_commands();

        if let Some(tick) = self.stage_clock.advance(timestamp_ms) {
            self.run_clock_ms += tick.delta_ms;
            self.fire_due_timers();
        }

        let detector = self.active_detector().map(|d| d.coordinates);
        let mut particles_ran = false;

        if let Some(tick) = self.smoke_loop.advance(timestamp_ms) {
            systems::smoke::run(
                &mut self.world,
                &mut self.rng,
                self.stage,
                detector,
                tick.delta_secs(),
            );
            particles_ran = true;
        }
        if let Some(tick) = self.packet_loop.advance(timestamp_ms) {
            systems::packets::run(
                &mut self.world,
                &mut self.rng,
                self.stage,
                detector,
                &self.surface,
                tick.delta_secs(),
            );
            particles_ran = true;
        }
        if particles_ran {
            systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        }

        self.snapshot()
    }

    /// Build a snapshot of the current state without advancing.
    pub fn snapshot(&self) -> SimulationSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &SnapshotInput {
                timestamp_ms: self.last_timestamp_ms,
                stage: self.stage,
                active: self.active,
                current_level: self.current_level,
                levels: &self.levels,
                active_detector: self.active_detector(),
                active_camera: self.active_camera(),
                camera_feed: self.camera_feed(),
                hovered_detector: self.hovered_detector.as_deref(),
                notifications: &self.notifications,
                action_plan: &self.action_plan,
                response: &self.response,
                volume: self.volume,
                surface: self.surface,
            },
        )
    }

    // ---- Commands ----

    /// Apply a command immediately.
    pub fn apply(&mut self, command: OperatorCommand) {
        match command {
            OperatorCommand::StartSimulation => self.start_simulation(),
            OperatorCommand::ResetSimulation => self.reset_simulation(),
            OperatorCommand::ActivateDetector { detector_id } => {
                self.activate_detector(&detector_id)
            }
            OperatorCommand::CompleteActionStep { index } => self.complete_action_step(index),
            OperatorCommand::AcknowledgeNotification { id } => self.acknowledge_notification(id),
            OperatorCommand::SetCurrentLevel { index } => self.set_current_level(index),
            OperatorCommand::PointerMove { position } => self.pointer_move(position),
            OperatorCommand::PointerLeave => self.pointer_leave(),
            OperatorCommand::PointerClick { position } => self.pointer_click(position),
            OperatorCommand::SetSurface { surface } => self.set_surface(surface),
            OperatorCommand::SetVolume { volume } => self.set_volume(volume),
            OperatorCommand::ToggleCameraFullscreen => self.toggle_camera_fullscreen(),
        }
    }

    /// Arm a run. The pipeline waits at `Idle` until a detector is activated.
    pub fn start_simulation(&mut self) {
        if self.active {
            debug!("start ignored: run already active");
            return;
        }
        self.active = true;
        self.generation += 1;
        self.run_clock_ms = 0.0;
        self.timers.clear();
        self.camera_feed.clear();
        self.stage_clock.start();
        self.smoke_loop.start();
        self.packet_loop.start();
        info!(generation = self.generation, "simulation armed");
    }

    /// Trigger a detector on the current level. Only the first activation of
    /// a run has any effect.
    pub fn activate_detector(&mut self, detector_id: &str) {
        if !self.active || self.stage != Stage::Idle || self.active_detector.is_some() {
            debug!(detector_id, stage = ?self.stage, "detector activation ignored");
            return;
        }
        let Some((id, zone)) = self
            .level()
            .and_then(|level| level.detector(detector_id))
            .map(|d| (d.id.clone(), d.zone.clone()))
        else {
            debug!(detector_id, "unknown detector on current level");
            return;
        };

        self.active_detector = Some(id.clone());
        self.stage = Stage::DetectorActivated;
        self.activated_at_ms = self.run_clock_ms;
        self.response.begin();
        self.notify(
            NotificationLevel::Warning,
            "Detector activated",
            format!("Detector {id} activated in zone {zone}"),
        );
        self.arm_timer(Stage::DetectorActivated, self.run_clock_ms);
        info!(detector = %id, zone = %zone, "detector activated");
    }

    /// Tick off one action-plan step. Only valid once the alarm is confirmed.
    pub fn complete_action_step(&mut self, index: usize) {
        if !self.active || self.stage != Stage::AlarmConfirmed {
            debug!(index, stage = ?self.stage, "action step ignored");
            return;
        }
        let Some(step) = ActionStep::from_index(index) else {
            debug!(index, "unknown action step");
            return;
        };
        if !self.action_plan.complete(step) {
            return;
        }
        self.notify(NotificationLevel::Success, step.title(), step.description());
        if self.action_plan.is_resolved() {
            info!("action plan resolved");
        }
    }

    /// Abort the run and clear all run state. Valid from any state.
    pub fn reset_simulation(&mut self) {
        self.active = false;
        self.stage = Stage::Idle;
        self.active_detector = None;
        self.active_camera = None;
        self.hovered_detector = None;
        self.notifications.clear();
        self.next_notification_id = 0;
        self.action_plan = ActionPlan::default();
        self.response.abandon();
        self.camera_feed.clear();
        self.timers.clear();
        self.generation += 1;
        self.world.clear();
        self.stage_clock.stop();
        self.smoke_loop.stop();
        self.packet_loop.stop();
        info!(generation = self.generation, "simulation reset");
    }

    /// Mark one notification as read.
    pub fn acknowledge_notification(&mut self, id: u32) {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => notification.read = true,
            None => debug!(id, "acknowledge of unknown notification"),
        }
    }

    /// Switch the displayed level. Locked while a run is active.
    pub fn set_current_level(&mut self, index: usize) {
        if self.active {
            debug!(index, "level change ignored: run active");
            return;
        }
        if index >= self.levels.len() {
            debug!(index, "level change ignored: no such level");
            return;
        }
        self.current_level = index;
        self.hovered_detector = None;
    }

    /// Update hover state from a pointer position in level-local space.
    pub fn pointer_move(&mut self, position: Point) {
        self.hovered_detector = self
            .level()
            .and_then(|level| level.detector_at(position, DETECTOR_HIT_RADIUS))
            .map(|d| d.id.clone());
    }

    pub fn pointer_leave(&mut self) {
        self.hovered_detector = None;
    }

    /// Click on the scene. Clicking a detector with no run active arms a run
    /// and activates it; during a run the click goes through the same guard
    /// as `activate_detector`.
    pub fn pointer_click(&mut self, position: Point) {
        let Some(id) = self
            .level()
            .and_then(|level| level.detector_at(position, DETECTOR_HIT_RADIUS))
            .map(|d| d.id.clone())
        else {
            return;
        };
        if !self.active {
            self.start_simulation();
        }
        self.activate_detector(&id);
    }

    pub fn set_surface(&mut self, surface: Surface) {
        if surface.width.is_finite()
            && surface.height.is_finite()
            && surface.width > 0.0
            && surface.height > 0.0
        {
            self.surface = surface;
        }
    }

    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(MAX_VOLUME);
    }

    /// Presentation preference; survives resets like the volume.
    pub fn toggle_camera_fullscreen(&mut self) {
        self.camera_fullscreen = !self.camera_fullscreen;
    }

    // ---- Queries ----

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn current_level(&self) -> usize {
        self.current_level
    }

    pub fn levels(&self) -> &[ParkingLevel] {
        &self.levels
    }

    /// The level currently displayed.
    pub fn level(&self) -> Option<&ParkingLevel> {
        self.levels.get(self.current_level)
    }

    /// Looked up by id on every call so it always reflects the current level.
    pub fn active_detector(&self) -> Option<&Detector> {
        let id = self.active_detector.as_deref()?;
        self.level()?.detector(id)
    }

    pub fn active_camera(&self) -> Option<&Camera> {
        let id = self.active_camera.as_deref()?;
        self.level()?.camera(id)
    }

    pub fn hovered_detector(&self) -> Option<&str> {
        self.hovered_detector.as_deref()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn action_plan(&self) -> &ActionPlan {
        &self.action_plan
    }

    pub fn statistics(&self) -> Statistics {
        systems::statistics::build_statistics(&self.levels, &self.response)
    }

    /// Live (smoke puffs, data packets).
    pub fn particle_counts(&self) -> (usize, usize) {
        systems::cleanup::population(&self.world)
    }

    /// Whether any frame scheduler is still consuming frames.
    pub fn is_animating(&self) -> bool {
        self.stage_clock.is_running() || self.smoke_loop.is_running() || self.packet_loop.is_running()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn dwell(&self) -> &DwellTimes {
        &self.dwell
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// Camera-feed overlay at the current run time. Zero while no run is
    /// active.
    pub fn camera_feed(&self) -> CameraFeedView {
        let (smoke_intensity, flame_intensity) = if self.active {
            self.camera_feed.intensities(self.run_clock_ms)
        } else {
            (0.0, 0.0)
        };
        CameraFeedView {
            smoke_intensity,
            flame_intensity,
            fullscreen: self.camera_fullscreen,
        }
    }

    /// Arm a timer from a previous generation (for stale-timer tests).
    #[cfg(test)]
    pub(crate) fn inject_timer(&mut self, timer: StageTimer) {
        self.timers.schedule(timer);
    }

    #[cfg(test)]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    // ---- Internals ----

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.apply(command);
        }
    }

    fn arm_timer(&mut self, stage: Stage, from_ms: f64) {
        if let Some(dwell_ms) = self.dwell.for_stage_ms(stage) {
            self.timers.schedule(StageTimer {
                due_ms: from_ms + dwell_ms,
                from: stage,
                generation: self.generation,
            });
        }
    }

    /// Fire every timer due on the run clock. A transition arms the next
    /// timer relative to its own due time, so a long frame walks through each
    /// intermediate stage in order.
    fn fire_due_timers(&mut self) {
        while let Some(timer) = self.timers.pop_due(self.run_clock_ms) {
            if !self.active || timer.generation != self.generation || timer.from != self.stage {
                debug!(?timer, stage = ?self.stage, "stale stage timer suppressed");
                continue;
            }
            if let Some(next) = self.stage.next() {
                self.enter_stage(next, timer.due_ms);
            }
        }
    }

    fn enter_stage(&mut self, next: Stage, at_ms: f64) {
        self.stage = next;
        let elapsed_secs = (at_ms - self.activated_at_ms) / 1000.0;
        let (detector_id, zone) = self
            .active_detector()
            .map(|d| (d.id.clone(), d.zone.clone()))
            .unwrap_or_default();

        match next {
            Stage::EsserProcessing | Stage::MoxaTransmission | Stage::IvparkProcessing => {
                let subsystem = next.subsystem().map(|s| s.label()).unwrap_or_default();
                self.notify(
                    NotificationLevel::Info,
                    format!("{subsystem} processing"),
                    format!("{} (detector {detector_id}, zone {zone})", next.label()),
                );
            }
            Stage::CameraVerification => {
                self.active_camera = self
                    .level()
                    .zip(self.active_detector())
                    .and_then(|(level, detector)| select_camera(level, detector))
                    .map(|c| c.id.clone());
                self.camera_feed.begin(at_ms);
                let message = match &self.active_camera {
                    Some(camera) => format!("Camera {camera} verifying zone {zone}"),
                    None => format!("No camera available for zone {zone}"),
                };
                self.notify(NotificationLevel::Info, "Camera verification", message);
            }
            Stage::AlarmConfirmed => {
                self.notify(
                    NotificationLevel::Error,
                    "ALARM CONFIRMED",
                    format!("Fire confirmed in zone {zone} (detector {detector_id})"),
                );
                self.response.finish(elapsed_secs);
            }
            Stage::Idle | Stage::DetectorActivated => {}
        }

        if next != Stage::AlarmConfirmed {
            self.response.update(elapsed_secs);
            self.arm_timer(next, at_ms);
        }
        info!(stage = ?next, elapsed_secs, "stage advanced");
    }

    fn notify(
        &mut self,
        level: NotificationLevel,
        title: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.next_notification_id += 1;
        self.notifications.push(Notification::new(
            self.next_notification_id,
            level,
            title,
            message,
            self.last_timestamp_ms,
        ));
    }
}
