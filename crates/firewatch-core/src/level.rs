//! Static parking-level data: geometry, detectors and cameras.
//!
//! Levels are read-only input owned by the application. The engine keeps
//! them behind an index and refers to detectors and cameras by id.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::{DetectorStatus, StructureKind, VehicleKind};
use crate::types::Point;

/// Smoke detector wired to the fire panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detector {
    pub id: String,
    /// Security zone label.
    pub zone: String,
    pub coordinates: Point,
    #[serde(default)]
    pub status: DetectorStatus,
}

/// Surveillance camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub id: String,
    pub zone: String,
    pub coordinates: Point,
    /// Facing direction in degrees, clockwise from +x.
    pub angle: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Whether the camera's feed is currently streaming.
    #[serde(default = "default_online")]
    pub online: bool,
}

fn default_online() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingSpot {
    pub id: String,
    pub coordinates: Point,
    /// Rotation in degrees.
    #[serde(default)]
    pub angle: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub kind: VehicleKind,
    /// CSS-style colour string, e.g. `#2563EB`.
    pub color: String,
    pub spot_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralElement {
    pub kind: StructureKind,
    pub coordinates: Point,
}

/// Poly-line drawn as visual guidance (driving lanes, walkways).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuidePath {
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParkingLevel {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub paths: Vec<GuidePath>,
    #[serde(default)]
    pub spots: Vec<ParkingSpot>,
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub structural_elements: Vec<StructuralElement>,
    #[serde(default)]
    pub detectors: Vec<Detector>,
    #[serde(default)]
    pub cameras: Vec<Camera>,
}

/// Reasons level data is rejected.
#[derive(Debug, Error, PartialEq)]
pub enum LevelError {
    #[error("level {level}: {kind} with empty id")]
    EmptyId { level: u32, kind: &'static str },
    #[error("level {level}: duplicate {kind} id `{id}`")]
    DuplicateId {
        level: u32,
        kind: &'static str,
        id: String,
    },
    #[error("level {level}: vehicle parked on unknown spot `{spot_id}`")]
    UnknownSpot { level: u32, spot_id: String },
    #[error("level {level}: non-finite coordinates on {kind} `{id}`")]
    NonFinite {
        level: u32,
        kind: &'static str,
        id: String,
    },
    #[error("no parking levels supplied")]
    NoLevels,
    #[error("invalid level data: {0}")]
    Parse(String),
}

impl ParkingLevel {
    pub fn detector(&self, id: &str) -> Option<&Detector> {
        self.detectors.iter().find(|d| d.id == id)
    }

    pub fn camera(&self, id: &str) -> Option<&Camera> {
        self.cameras.iter().find(|c| c.id == id)
    }

    pub fn spot(&self, id: &str) -> Option<&ParkingSpot> {
        self.spots.iter().find(|s| s.id == id)
    }

    /// Nearest detector within `radius` of `point`, in level-local space.
    /// Ties go to the detector listed first.
    pub fn detector_at(&self, point: Point, radius: f64) -> Option<&Detector> {
        let mut best: Option<(&Detector, f64)> = None;
        for detector in &self.detectors {
            let distance = detector.coordinates.distance_to(&point);
            if distance > radius {
                continue;
            }
            match best {
                Some((_, best_distance)) if best_distance <= distance => {}
                _ => best = Some((detector, distance)),
            }
        }
        best.map(|(detector, _)| detector)
    }

    /// Check ids are present and unique, vehicles reference real spots, and
    /// every coordinate is finite.
    pub fn validate(&self) -> Result<(), LevelError> {
        let level = self.id;

        check_ids(level, "detector", self.detectors.iter().map(|d| d.id.as_str()))?;
        check_ids(level, "camera", self.cameras.iter().map(|c| c.id.as_str()))?;
        check_ids(level, "spot", self.spots.iter().map(|s| s.id.as_str()))?;

        for vehicle in &self.vehicles {
            if self.spot(&vehicle.spot_id).is_none() {
                return Err(LevelError::UnknownSpot {
                    level,
                    spot_id: vehicle.spot_id.clone(),
                });
            }
        }

        let positioned = self
            .detectors
            .iter()
            .map(|d| ("detector", d.id.as_str(), d.coordinates))
            .chain(
                self.cameras
                    .iter()
                    .map(|c| ("camera", c.id.as_str(), c.coordinates)),
            )
            .chain(
                self.spots
                    .iter()
                    .map(|s| ("spot", s.id.as_str(), s.coordinates)),
            );
        for (kind, id, coordinates) in positioned {
            if !coordinates.is_finite() {
                return Err(LevelError::NonFinite {
                    level,
                    kind,
                    id: id.to_string(),
                });
            }
        }

        Ok(())
    }
}

fn check_ids<'a>(
    level: u32,
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), LevelError> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.is_empty() {
            return Err(LevelError::EmptyId { level, kind });
        }
        if !seen.insert(id) {
            return Err(LevelError::DuplicateId {
                level,
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

/// Parse a JSON array of levels and validate each one.
pub fn parse_levels(json: &str) -> Result<Vec<ParkingLevel>, LevelError> {
    let levels: Vec<ParkingLevel> =
        serde_json::from_str(json).map_err(|e| LevelError::Parse(e.to_string()))?;
    if levels.is_empty() {
        return Err(LevelError::NoLevels);
    }
    for level in &levels {
        level.validate()?;
    }
    Ok(levels)
}
