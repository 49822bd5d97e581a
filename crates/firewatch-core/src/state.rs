//! Simulation snapshot: the complete visible state published after each frame.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::Notification;
use crate::types::{Point, Surface};

/// Complete simulation state handed to presentation and the renderer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    /// Host timestamp of the frame that produced this snapshot (ms).
    pub timestamp_ms: f64,
    pub stage: Stage,
    pub progress_percent: u8,
    pub active: bool,
    pub current_level: usize,
    pub active_detector: Option<DetectorRef>,
    pub active_camera: Option<CameraRef>,
    pub camera_feed: CameraFeedView,
    pub hovered_detector: Option<String>,
    pub notifications: Vec<Notification>,
    pub unread_notifications: usize,
    pub statistics: Statistics,
    pub action_plan: ActionPlanView,
    pub smoke: Vec<SmokeView>,
    pub packets: Vec<PacketView>,
    pub volume: u8,
    pub surface: Surface,
}

/// The detector driving the current run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorRef {
    pub id: String,
    pub zone: String,
    pub coordinates: Point,
}

/// The camera verifying the current run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraRef {
    pub id: String,
    pub zone: String,
    pub angle: f64,
    pub image_url: Option<String>,
}

/// Overlay effects on the verifying camera's feed.
///
/// Both intensities ramp in steps from camera verification onward and read
/// zero whenever no run is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraFeedView {
    /// Grey smoke veil opacity, 0.0 to 0.7.
    pub smoke_intensity: f64,
    /// Flame overlay strength, 0.0 to 1.0.
    pub flame_intensity: f64,
    pub fullscreen: bool,
}

/// Derived counters for the statistics cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_detectors: usize,
    pub total_zones: usize,
    /// Mean seconds from activation to alarm confirmation.
    pub average_response_time: f64,
    pub active_cameras: usize,
}

/// Action-plan checklist state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionPlanView {
    /// Completion flag per step, in `ActionStep::ALL` order.
    pub completed: [bool; 3],
    /// All three steps done.
    pub resolved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmokeView {
    pub position: Point,
    pub size: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PacketView {
    pub source: Point,
    pub target: Point,
    pub progress: f64,
    /// Stage at spawn time.
    pub stage: Stage,
}

impl PacketView {
    /// Interpolated position along the straight source-target line.
    pub fn position(&self) -> Point {
        self.source.lerp(&self.target, self.progress)
    }
}
