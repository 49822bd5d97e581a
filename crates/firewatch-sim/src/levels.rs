//! Built-in demo car park: three underground levels used when no level file
//! is supplied.

use firewatch_core::enums::{DetectorStatus, StructureKind, VehicleKind};
use firewatch_core::level::*;
use firewatch_core::types::Point;

const SPOT_PITCH: f64 = 40.0;
const SPOT_ROWS_Y: [f64; 2] = [110.0, 390.0];
const SPOTS_PER_ROW: usize = 13;

const VEHICLE_COLORS: [&str; 6] = [
    "#2563EB", "#DC2626", "#F8FAFC", "#16A34A", "#0F172A", "#CA8A04",
];

/// The three demo levels, in display order.
pub fn demo_levels() -> Vec<ParkingLevel> {
    vec![
        build_level(
            1,
            "Level -1",
            &[
                ("D-101", "A", 120.0, 180.0, DetectorStatus::Normal),
                ("D-102", "A", 300.0, 180.0, DetectorStatus::Normal),
                ("D-103", "B", 120.0, 320.0, DetectorStatus::Normal),
                ("D-104", "B", 460.0, 320.0, DetectorStatus::Fault),
            ],
            &[
                ("C-101", "A", 40.0, 60.0, 45.0),
                ("C-102", "B", 560.0, 450.0, 225.0),
            ],
            0,
        ),
        build_level(
            2,
            "Level -2",
            &[
                ("D-201", "C", 160.0, 180.0, DetectorStatus::Normal),
                ("D-202", "C", 420.0, 180.0, DetectorStatus::Normal),
                ("D-203", "D", 240.0, 320.0, DetectorStatus::Normal),
                ("D-204", "D", 520.0, 320.0, DetectorStatus::Normal),
            ],
            &[
                ("C-201", "C", 40.0, 60.0, 30.0),
                ("C-202", "D", 600.0, 460.0, 210.0),
                ("C-203", "D", 40.0, 460.0, 330.0),
            ],
            2,
        ),
        build_level(
            3,
            "Level -3",
            &[
                ("D-301", "E", 200.0, 180.0, DetectorStatus::Normal),
                ("D-302", "E", 480.0, 180.0, DetectorStatus::Fault),
                ("D-303", "F", 320.0, 320.0, DetectorStatus::Normal),
            ],
            &[
                ("C-301", "E", 600.0, 60.0, 150.0),
                ("C-302", "F", 40.0, 460.0, 330.0),
            ],
            4,
        ),
    ]
}

type DetectorSpec<'a> = (&'a str, &'a str, f64, f64, DetectorStatus);
type CameraSpec<'a> = (&'a str, &'a str, f64, f64, f64);

fn build_level(
    id: u32,
    name: &str,
    detectors: &[DetectorSpec<'_>],
    cameras: &[CameraSpec<'_>],
    vehicle_seed: usize,
) -> ParkingLevel {
    let spots = build_spots(id);
    let vehicles = spots
        .iter()
        .enumerate()
        .filter(|(i, _)| (i + vehicle_seed) % 3 != 0)
        .map(|(i, spot)| Vehicle {
            kind: match (i + vehicle_seed) % 4 {
                0 | 3 => VehicleKind::Sedan,
                1 => VehicleKind::Suv,
                _ => VehicleKind::Compact,
            },
            color: VEHICLE_COLORS[(i + vehicle_seed) % VEHICLE_COLORS.len()].to_string(),
            spot_id: spot.id.clone(),
        })
        .collect();

    ParkingLevel {
        id,
        name: name.to_string(),
        paths: vec![
            // Main driving lane.
            GuidePath {
                points: vec![Point::new(20.0, 250.0), Point::new(620.0, 250.0)],
            },
            // Pedestrian walkway to the stairs.
            GuidePath {
                points: vec![
                    Point::new(40.0, 250.0),
                    Point::new(40.0, 420.0),
                    Point::new(120.0, 460.0),
                ],
            },
        ],
        spots,
        vehicles,
        structural_elements: vec![
            structure(StructureKind::Column, 200.0, 180.0),
            structure(StructureKind::Column, 400.0, 180.0),
            structure(StructureKind::Column, 200.0, 320.0),
            structure(StructureKind::Column, 400.0, 320.0),
            structure(StructureKind::Ramp, 590.0, 250.0),
            structure(StructureKind::Elevator, 40.0, 140.0),
            structure(StructureKind::Stairs, 40.0, 370.0),
        ],
        detectors: detectors
            .iter()
            .map(|&(id, zone, x, y, status)| Detector {
                id: id.to_string(),
                zone: zone.to_string(),
                coordinates: Point::new(x, y),
                status,
            })
            .collect(),
        cameras: cameras
            .iter()
            .map(|&(id, zone, x, y, angle)| Camera {
                id: id.to_string(),
                zone: zone.to_string(),
                coordinates: Point::new(x, y),
                angle,
                image_url: None,
                online: true,
            })
            .collect(),
    }
}

fn build_spots(level_id: u32) -> Vec<ParkingSpot> {
    let mut spots = Vec::with_capacity(SPOT_ROWS_Y.len() * SPOTS_PER_ROW);
    for (row, y) in SPOT_ROWS_Y.iter().enumerate() {
        for col in 0..SPOTS_PER_ROW {
            spots.push(ParkingSpot {
                id: format!("P{level_id}-{}{:02}", (b'A' + row as u8) as char, col + 1),
                coordinates: Point::new(80.0 + col as f64 * SPOT_PITCH, *y),
                angle: 90.0,
            });
        }
    }
    spots
}

fn structure(kind: StructureKind, x: f64, y: f64) -> StructuralElement {
    StructuralElement {
        kind,
        coordinates: Point::new(x, y),
    }
}
