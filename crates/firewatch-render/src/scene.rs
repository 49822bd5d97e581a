//! Scene renderer: turns a level plus the latest snapshot into a display list.
//!
//! Pure. Every frame is rebuilt from scratch out of the snapshot, so what is
//! drawn always matches the engine state the snapshot was taken from.

use firewatch_core::enums::{Stage, StructureKind, Subsystem, VehicleKind};
use firewatch_core::level::ParkingLevel;
use firewatch_core::state::SimulationSnapshot;
use firewatch_core::types::{Point, Rect};

use crate::color::*;
use crate::display::{DisplayList, DrawCommand};

pub const DETECTOR_RADIUS: f64 = 8.0;
pub const CAMERA_FOV_RADIUS: f64 = 50.0;
pub const CAMERA_FOV_DEG: f64 = 90.0;
pub const PACKET_RADIUS: f64 = 4.0;
const GLOW_BLUR: f64 = 10.0;
const LABEL_SIZE: f64 = 12.0;
const BANNER_TEXT: &str = "ALARM";

/// Everything one frame is painted from.
pub struct Scene<'a> {
    pub level: &'a ParkingLevel,
    pub snapshot: &'a SimulationSnapshot,
}

/// Paint the whole scene, back to front.
pub fn render_scene(scene: &Scene<'_>) -> DisplayList {
    let mut list = DisplayList::new();
    list.push(DrawCommand::Clear {
        color: palette::BACKGROUND,
    });

    draw_paths(&mut list, scene.level);
    draw_spots(&mut list, scene.level);
    draw_vehicles(&mut list, scene.level);
    draw_structures(&mut list, scene.level);
    draw_detectors(&mut list, scene);
    draw_cameras(&mut list, scene.level);
    draw_smoke(&mut list, scene.snapshot);
    draw_packets(&mut list, scene.snapshot);
    draw_subsystems(&mut list, scene.snapshot);
    draw_alarm_banner(&mut list, scene.snapshot);

    list
}

fn draw_paths(list: &mut DisplayList, level: &ParkingLevel) {
    for path in level.paths.iter().filter(|p| p.points.len() >= 2) {
        list.push(DrawCommand::Polyline {
            points: path.points.clone(),
            color: palette::PATH,
            width: 3.0,
        });
    }
}

fn draw_spots(list: &mut DisplayList, level: &ParkingLevel) {
    for spot in &level.spots {
        list.with_transform(spot.coordinates, spot.angle, |list| {
            list.stroke_rect(Rect::centered(50.0, 25.0), palette::SPOT_OUTLINE, 1.0);
        });
    }
}

fn draw_vehicles(list: &mut DisplayList, level: &ParkingLevel) {
    for vehicle in &level.vehicles {
        let Some(spot) = level.spot(&vehicle.spot_id) else {
            continue;
        };
        let body = Color::from_hex(&vehicle.color).unwrap_or(palette::PATH);

        list.with_transform(spot.coordinates, spot.angle, |list| match vehicle.kind {
            VehicleKind::Sedan => {
                list.fill_rect(Rect::centered(40.0, 20.0), body);
                list.fill_rect(Rect::new(-15.0, -8.0, 10.0, 16.0), palette::WINDOW);
                list.fill_rect(Rect::new(5.0, -8.0, 10.0, 16.0), palette::WINDOW);
            }
            VehicleKind::Suv => {
                list.fill_rect(Rect::centered(44.0, 22.0), body);
                list.fill_rect(Rect::centered(34.0, 18.0), palette::WINDOW);
            }
            VehicleKind::Compact => {
                list.fill_rect(Rect::centered(36.0, 18.0), body);
                list.fill_rect(Rect::new(-13.0, -7.0, 8.0, 14.0), palette::WINDOW);
                list.fill_rect(Rect::new(5.0, -7.0, 8.0, 14.0), palette::WINDOW);
            }
        });
    }
}

fn draw_structures(list: &mut DisplayList, level: &ParkingLevel) {
    for element in &level.structural_elements {
        list.with_transform(element.coordinates, 0.0, |list| match element.kind {
            StructureKind::Column => {
                list.fill_rect(Rect::centered(20.0, 20.0), palette::COLUMN);
            }
            StructureKind::Ramp => {
                list.fill_rect(Rect::centered(80.0, 150.0), palette::RAMP);
                list.line(
                    Point::new(-30.0, -65.0),
                    Point::new(30.0, 65.0),
                    palette::TRIM,
                    2.0,
                );
                list.line(
                    Point::new(-30.0, 65.0),
                    Point::new(30.0, -65.0),
                    palette::TRIM,
                    2.0,
                );
            }
            StructureKind::Elevator => {
                list.fill_rect(Rect::centered(40.0, 40.0), palette::SHAFT);
                list.stroke_rect(Rect::centered(40.0, 40.0), palette::TRIM, 1.0);
                list.stroke_rect(Rect::centered(30.0, 30.0), palette::TRIM, 1.0);
            }
            StructureKind::Stairs => {
                list.fill_rect(Rect::centered(40.0, 80.0), palette::SHAFT);
                for step in 0..8 {
                    let y = -35.0 + step as f64 * 10.0;
                    list.line(Point::new(-15.0, y), Point::new(15.0, y), palette::TRIM, 1.0);
                }
            }
        });
    }
}

fn draw_detectors(list: &mut DisplayList, scene: &Scene<'_>) {
    let active_id = scene.snapshot.active_detector.as_ref().map(|d| d.id.as_str());
    let hovered_id = scene.snapshot.hovered_detector.as_deref();

    for detector in &scene.level.detectors {
        let is_active = active_id == Some(detector.id.as_str());
        let is_hovered = hovered_id == Some(detector.id.as_str());

        list.with_transform(detector.coordinates, 0.0, |list| {
            list.push(DrawCommand::Circle {
                center: Point::default(),
                radius: DETECTOR_RADIUS,
                color: detector_color(detector.status, is_active),
                glow: is_hovered.then_some((palette::HOVER_GLOW, GLOW_BLUR)),
            });
            if is_hovered || is_active {
                list.text(
                    Point::new(0.0, -12.0),
                    detector.id.clone(),
                    palette::LABEL,
                    LABEL_SIZE,
                );
                list.text(
                    Point::new(0.0, -24.0),
                    format!("Zone {}", detector.zone),
                    palette::LABEL,
                    LABEL_SIZE,
                );
            }
        });
    }
}

fn draw_cameras(list: &mut DisplayList, level: &ParkingLevel) {
    for camera in &level.cameras {
        list.with_transform(camera.coordinates, camera.angle, |list| {
            list.fill_rect(Rect::centered(14.0, 10.0), palette::CAMERA_BODY);
            list.push(DrawCommand::Circle {
                center: Point::default(),
                radius: 4.0,
                color: palette::CAMERA_LENS,
                glow: None,
            });
            list.push(DrawCommand::Wedge {
                center: Point::default(),
                radius: CAMERA_FOV_RADIUS,
                start_deg: -CAMERA_FOV_DEG / 2.0,
                end_deg: CAMERA_FOV_DEG / 2.0,
                fill: palette::CAMERA_FOV_FILL,
                stroke: palette::CAMERA_FOV_STROKE,
            });
        });
    }
}

fn draw_smoke(list: &mut DisplayList, snapshot: &SimulationSnapshot) {
    let base = smoke_color(snapshot.stage);
    for puff in &snapshot.smoke {
        list.push(DrawCommand::Circle {
            center: puff.position,
            radius: puff.size,
            color: base.with_alpha(base.a * puff.opacity.clamp(0.0, 1.0) as f32),
            glow: None,
        });
    }
}

fn draw_packets(list: &mut DisplayList, snapshot: &SimulationSnapshot) {
    for packet in &snapshot.packets {
        let color = packet_color(packet.stage);
        list.push(DrawCommand::Circle {
            center: packet.position(),
            radius: PACKET_RADIUS,
            color,
            glow: Some((color, GLOW_BLUR)),
        });
    }
}

/// One status box per subsystem, lit once the pipeline has reached it.
fn draw_subsystems(list: &mut DisplayList, snapshot: &SimulationSnapshot) {
    if snapshot.stage < Stage::EsserProcessing {
        return;
    }
    for subsystem in Subsystem::ALL {
        let rect = subsystem.status_box(&snapshot.surface);
        let color = if snapshot.stage >= subsystem.entry_stage() {
            subsystem_color(subsystem)
        } else {
            palette::SUBSYSTEM_OFF
        };
        list.fill_rect(rect, color);
        list.text(
            rect.center().offset(0.0, 5.0),
            subsystem.label(),
            palette::LABEL,
            LABEL_SIZE,
        );
    }
}

fn draw_alarm_banner(list: &mut DisplayList, snapshot: &SimulationSnapshot) {
    if snapshot.stage != Stage::AlarmConfirmed {
        return;
    }
    let surface = snapshot.surface;
    list.fill_rect(
        Rect::new(0.0, 0.0, surface.width, surface.height),
        palette::ALARM_BANNER,
    );
    list.text(
        Point::new(surface.width / 2.0, surface.height / 2.0),
        BANNER_TEXT,
        palette::LABEL,
        48.0,
    );
}
