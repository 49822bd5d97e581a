//! Operator commands sent from the presentation layer to the simulation.
//!
//! Commands are either applied immediately or queued for processing at the
//! next frame boundary. Commands that do not fit the current state are
//! ignored by the engine.

use serde::{Deserialize, Serialize};

use crate::types::{Point, Surface};

/// All possible operator actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OperatorCommand {
    // --- Run control ---
    /// Arm a run; the pipeline starts once a detector is activated.
    StartSimulation,
    /// Abort the run and clear all run state.
    ResetSimulation,
    /// Trigger a detector on the current level.
    ActivateDetector { detector_id: String },

    // --- Action plan ---
    /// Tick off an action-plan step (0, 1 or 2).
    CompleteActionStep { index: usize },

    // --- Notifications ---
    AcknowledgeNotification { id: u32 },

    // --- Scene ---
    /// Switch the displayed level. Locked while a run is active.
    SetCurrentLevel { index: usize },
    /// Pointer moved over the scene (level-local coordinates).
    PointerMove { position: Point },
    /// Pointer left the scene.
    PointerLeave,
    /// Pointer clicked on the scene (level-local coordinates).
    PointerClick { position: Point },
    /// The drawable region was resized.
    SetSurface { surface: Surface },

    // --- Presentation ---
    /// Flip the camera feed between panel and fullscreen.
    ToggleCameraFullscreen,
    /// Alarm volume (0-100). Carried through to the snapshot unchanged.
    SetVolume { volume: u8 },
}
