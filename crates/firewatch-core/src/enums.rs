//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::{
    ANCHOR_RIGHT_INSET, ANCHOR_Y, STATUS_BOX_HEIGHT, STATUS_BOX_RIGHT_INSET, STATUS_BOX_TOP,
    STATUS_BOX_WIDTH,
};
use crate::types::{Point, Rect, Surface};

/// Position in the fixed alarm pipeline.
///
/// The derive order is the pipeline order: comparisons such as
/// `stage >= Stage::EsserProcessing` are how the particle systems and the
/// renderer decide what is active.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    #[default]
    Idle,
    DetectorActivated,
    EsserProcessing,
    MoxaTransmission,
    IvparkProcessing,
    CameraVerification,
    AlarmConfirmed,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Stage; 7] = [
        Stage::Idle,
        Stage::DetectorActivated,
        Stage::EsserProcessing,
        Stage::MoxaTransmission,
        Stage::IvparkProcessing,
        Stage::CameraVerification,
        Stage::AlarmConfirmed,
    ];

    /// The stage that follows this one, `None` once the alarm is confirmed.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Idle => Some(Stage::DetectorActivated),
            Stage::DetectorActivated => Some(Stage::EsserProcessing),
            Stage::EsserProcessing => Some(Stage::MoxaTransmission),
            Stage::MoxaTransmission => Some(Stage::IvparkProcessing),
            Stage::IvparkProcessing => Some(Stage::CameraVerification),
            Stage::CameraVerification => Some(Stage::AlarmConfirmed),
            Stage::AlarmConfirmed => None,
        }
    }

    /// Progress bar percentage shown to the operator.
    pub fn progress_percent(self) -> u8 {
        match self {
            Stage::Idle => 0,
            Stage::DetectorActivated => 20,
            Stage::EsserProcessing => 40,
            Stage::MoxaTransmission => 60,
            Stage::IvparkProcessing => 80,
            Stage::CameraVerification => 90,
            Stage::AlarmConfirmed => 100,
        }
    }

    /// Status line for the control panel.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Idle => "Waiting for simulation",
            Stage::DetectorActivated => "Detector activated",
            Stage::EsserProcessing => "Processing by ESSER fire panel",
            Stage::MoxaTransmission => "Transmission via MOXA gateway",
            Stage::IvparkProcessing => "Processing by IVPARK supervision",
            Stage::CameraVerification => "Camera verification",
            Stage::AlarmConfirmed => "ALARM CONFIRMED",
        }
    }

    /// Subsystem that data packets spawned in this stage travel to.
    /// IVPARK keeps receiving packets for every stage after it.
    pub fn subsystem(self) -> Option<Subsystem> {
        match self {
            Stage::Idle | Stage::DetectorActivated => None,
            Stage::EsserProcessing => Some(Subsystem::Esser),
            Stage::MoxaTransmission => Some(Subsystem::Moxa),
            Stage::IvparkProcessing | Stage::CameraVerification | Stage::AlarmConfirmed => {
                Some(Subsystem::Ivpark)
            }
        }
    }
}

/// Named subsystems the alert travels through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subsystem {
    /// ESSER fire alarm control panel.
    Esser,
    /// MOXA serial-to-IP transmission gateway.
    Moxa,
    /// IVPARK parking supervision software.
    Ivpark,
}

impl Subsystem {
    pub const ALL: [Subsystem; 3] = [Subsystem::Esser, Subsystem::Moxa, Subsystem::Ivpark];

    pub fn label(self) -> &'static str {
        match self {
            Subsystem::Esser => "ESSER",
            Subsystem::Moxa => "MOXA",
            Subsystem::Ivpark => "IVPARK",
        }
    }

    /// Stage at which this subsystem lights up.
    pub fn entry_stage(self) -> Stage {
        match self {
            Subsystem::Esser => Stage::EsserProcessing,
            Subsystem::Moxa => Stage::MoxaTransmission,
            Subsystem::Ivpark => Stage::IvparkProcessing,
        }
    }

    /// Vertical slot of the subsystem's status box (0, 1, 2 from the top).
    pub fn slot(self) -> usize {
        match self {
            Subsystem::Esser => 0,
            Subsystem::Moxa => 1,
            Subsystem::Ivpark => 2,
        }
    }

    /// Screen-space point data packets travel to.
    pub fn anchor(self, surface: &Surface) -> Point {
        Point::new(surface.width - ANCHOR_RIGHT_INSET, ANCHOR_Y[self.slot()])
    }

    /// Screen-space rectangle of the subsystem's status box.
    pub fn status_box(self, surface: &Surface) -> Rect {
        Rect::new(
            surface.width - STATUS_BOX_RIGHT_INSET,
            STATUS_BOX_TOP[self.slot()],
            STATUS_BOX_WIDTH,
            STATUS_BOX_HEIGHT,
        )
    }
}

/// Detector health as reported by the fire panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectorStatus {
    #[default]
    Normal,
    Fault,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Sedan,
    Suv,
    Compact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureKind {
    Column,
    Ramp,
    Elevator,
    Stairs,
}

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
    Success,
}

/// The three steps of the emergency action plan, in checklist order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionStep {
    /// Call the fire brigade (18 / 112) with the exact location.
    CallEmergencyServices,
    /// Evacuate the affected level and the adjacent ones.
    Evacuate,
    /// Close access to the car park and guide responders in.
    SecureAccess,
}

impl ActionStep {
    pub const ALL: [ActionStep; 3] = [
        ActionStep::CallEmergencyServices,
        ActionStep::Evacuate,
        ActionStep::SecureAccess,
    ];

    pub fn from_index(index: usize) -> Option<ActionStep> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            ActionStep::CallEmergencyServices => 0,
            ActionStep::Evacuate => 1,
            ActionStep::SecureAccess => 2,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ActionStep::CallEmergencyServices => "Emergency services contacted",
            ActionStep::Evacuate => "Evacuation under way",
            ActionStep::SecureAccess => "Access secured",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ActionStep::CallEmergencyServices => {
                "Call 18 or 112 immediately and report the fire and its exact location."
            }
            ActionStep::Evacuate => {
                "Evacuate the affected level and adjacent levels using the emergency exits."
            }
            ActionStep::SecureAccess => {
                "Block access to the car park and prepare for responders. Hand over access plans."
            }
        }
    }
}
