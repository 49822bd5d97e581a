//! Snapshot system: reads the particle world and engine state and builds a
//! complete `SimulationSnapshot`.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use firewatch_core::components::{DataPacket, SmokePuff};
use firewatch_core::enums::Stage;
use firewatch_core::events::Notification;
use firewatch_core::level::{Camera, Detector, ParkingLevel};
use firewatch_core::state::*;
use firewatch_core::types::{Point, Surface};

use crate::run::{ActionPlan, ResponseStats};
use crate::systems::statistics::build_statistics;

/// Engine state the snapshot is built from.
pub struct SnapshotInput<'a> {
    pub timestamp_ms: f64,
    pub stage: Stage,
    pub active: bool,
    pub current_level: usize,
    pub levels: &'a [ParkingLevel],
    pub active_detector: Option<&'a Detector>,
    pub active_camera: Option<&'a Camera>,
    pub camera_feed: CameraFeedView,
    pub hovered_detector: Option<&'a str>,
    pub notifications: &'a [Notification],
    pub action_plan: &'a ActionPlan,
    pub response: &'a ResponseStats,
    pub volume: u8,
    pub surface: Surface,
}

/// Build a complete snapshot from the current world and engine state.
pub fn build_snapshot(world: &World, input: &SnapshotInput<'_>) -> SimulationSnapshot {
    SimulationSnapshot {
        timestamp_ms: input.timestamp_ms,
        stage: input.stage,
        progress_percent: input.stage.progress_percent(),
        active: input.active,
        current_level: input.current_level,
        active_detector: input.active_detector.map(|d| DetectorRef {
            id: d.id.clone(),
            zone: d.zone.clone(),
            coordinates: d.coordinates,
        }),
        active_camera: input.active_camera.map(|c| CameraRef {
            id: c.id.clone(),
            zone: c.zone.clone(),
            angle: c.angle,
            image_url: c.image_url.clone(),
        }),
        camera_feed: input.camera_feed,
        hovered_detector: input.hovered_detector.map(str::to_string),
        notifications: input.notifications.to_vec(),
        unread_notifications: input.notifications.iter().filter(|n| !n.read).count(),
        statistics: build_statistics(input.levels, input.response),
        action_plan: input.action_plan.view(),
        smoke: build_smoke(world),
        packets: build_packets(world),
        volume: input.volume,
        surface: input.surface,
    }
}

/// Build SmokeView list from all live puffs.
fn build_smoke(world: &World) -> Vec<SmokeView> {
    world
        .query::<(&Point, &SmokePuff)>()
        .iter()
        .map(|(_, (pos, puff))| SmokeView {
            position: *pos,
            size: puff.size,
            opacity: puff.opacity,
        })
        .collect()
}

/// Build PacketView list from all in-flight packets.
fn build_packets(world: &World) -> Vec<PacketView> {
    world
        .query::<&DataPacket>()
        .iter()
        .map(|(_, packet)| PacketView {
            source: packet.source,
            target: packet.target,
            progress: packet.progress,
            stage: packet.stage,
        })
        .collect()
}
