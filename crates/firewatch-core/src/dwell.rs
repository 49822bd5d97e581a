//! Per-stage dwell times: how long each stage waits before auto-advancing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::enums::Stage;

/// Dwell time in seconds for every stage that auto-advances.
///
/// `Idle` waits for an operator and `AlarmConfirmed` is terminal, so
/// neither has an entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DwellTimes {
    pub detector_activated: f64,
    pub esser_processing: f64,
    pub moxa_transmission: f64,
    pub ivpark_processing: f64,
    pub camera_verification: f64,
}

impl Default for DwellTimes {
    fn default() -> Self {
        Self {
            detector_activated: DWELL_DETECTOR_ACTIVATED,
            esser_processing: DWELL_ESSER_PROCESSING,
            moxa_transmission: DWELL_MOXA_TRANSMISSION,
            ivpark_processing: DWELL_IVPARK_PROCESSING,
            camera_verification: DWELL_CAMERA_VERIFICATION,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum DwellError {
    #[error("dwell time for {stage:?} must be finite and positive, got {value}")]
    NotPositive { stage: Stage, value: f64 },
    #[error("dwell time for {stage:?} ({value}s) is shorter than the stage before it ({previous}s)")]
    Decreasing {
        stage: Stage,
        value: f64,
        previous: f64,
    },
}

impl DwellTimes {
    /// Dwell time for `stage` in seconds, `None` for stages that never
    /// auto-advance.
    pub fn for_stage(&self, stage: Stage) -> Option<f64> {
        match stage {
            Stage::Idle | Stage::AlarmConfirmed => None,
            Stage::DetectorActivated => Some(self.detector_activated),
            Stage::EsserProcessing => Some(self.esser_processing),
            Stage::MoxaTransmission => Some(self.moxa_transmission),
            Stage::IvparkProcessing => Some(self.ivpark_processing),
            Stage::CameraVerification => Some(self.camera_verification),
        }
    }

    /// Milliseconds variant of [`DwellTimes::for_stage`].
    pub fn for_stage_ms(&self, stage: Stage) -> Option<f64> {
        self.for_stage(stage).map(|secs| secs * 1000.0)
    }

    /// Sum of all dwell times: activation to alarm confirmation, in seconds.
    pub fn total(&self) -> f64 {
        Stage::ALL.iter().filter_map(|s| self.for_stage(*s)).sum()
    }

    /// Every value must be finite, positive and no shorter than the one
    /// before it in pipeline order.
    pub fn validate(&self) -> Result<(), DwellError> {
        let mut previous: Option<f64> = None;
        for stage in Stage::ALL {
            let Some(value) = self.for_stage(stage) else {
                continue;
            };
            if !value.is_finite() || value <= 0.0 {
                return Err(DwellError::NotPositive { stage, value });
            }
            if let Some(previous) = previous {
                if value < previous {
                    return Err(DwellError::Decreasing {
                        stage,
                        value,
                        previous,
                    });
                }
            }
            previous = Some(value);
        }
        Ok(())
    }
}
