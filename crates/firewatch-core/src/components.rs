//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Particle logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::Stage;
use crate::types::Point;

/// Smoke puff rising from the active detector.
/// Paired with a `Point` component holding its current position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SmokePuff {
    /// Radius in level units.
    pub size: f64,
    /// 0.0 = gone, 1.0 = opaque.
    pub opacity: f64,
    /// Upward drift in units per second.
    pub speed: f64,
}

/// Data packet travelling from the active detector to a subsystem.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DataPacket {
    pub source: Point,
    pub target: Point,
    /// 0.0 at the source, 1.0 on arrival.
    pub progress: f64,
    /// Stage the packet was spawned in. Fixes its colour for its lifetime.
    pub stage: Stage,
}
