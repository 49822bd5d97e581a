//! Tests for scene rendering and pointer picking.

use firewatch_core::commands::OperatorCommand;
use firewatch_core::enums::Stage;
use firewatch_core::level::ParkingLevel;
use firewatch_core::state::{PacketView, SimulationSnapshot, SmokeView};
use firewatch_core::types::{Point, Surface};
use firewatch_sim::levels::demo_levels;
use firewatch_sim::{SimConfig, SimulationEngine};

use crate::color::*;
use crate::display::{DisplayList, DrawCommand};
use crate::scene::{render_scene, Scene, CAMERA_FOV_RADIUS};
use crate::viewport::{pick_detector, Viewport};

fn render(level: &ParkingLevel, snapshot: &SimulationSnapshot) -> DisplayList {
    render_scene(&Scene { level, snapshot })
}

fn engine_at(stage: Stage) -> SimulationEngine {
    let mut engine = SimulationEngine::with_demo_levels(SimConfig::default());
    engine.queue_command(OperatorCommand::StartSimulation);
    engine.queue_command(OperatorCommand::ActivateDetector {
        detector_id: "D-101".into(),
    });
    let mut t = 0.0;
    while engine.frame(t).stage < stage {
        t += 16.0;
    }
    engine
}

fn fill_color_at(list: &DisplayList, rect_x: f64, rect_y: f64) -> Option<Color> {
    list.commands().iter().find_map(|c| match c {
        DrawCommand::FillRect { rect, color } if rect.x == rect_x && rect.y == rect_y => {
            Some(*color)
        }
        _ => None,
    })
}

#[test]
fn test_idle_scene_has_no_overlays() {
    let levels = demo_levels();
    let list = render(&levels[0], &SimulationSnapshot::default());

    assert!(matches!(list.commands()[0], DrawCommand::Clear { .. }));
    assert_eq!(list.transform_depth(), 0);
    let texts: Vec<&str> = list.texts().collect();
    assert!(texts.is_empty(), "unexpected labels: {texts:?}");
}

#[test]
fn test_background_paints_before_level_geometry() {
    let levels = demo_levels();
    let list = render(&levels[0], &SimulationSnapshot::default());
    let first_path = list
        .commands()
        .iter()
        .position(|c| matches!(c, DrawCommand::Polyline { .. }));
    let first_spot = list
        .commands()
        .iter()
        .position(|c| matches!(c, DrawCommand::StrokeRect { .. }));
    assert!(first_path.is_some());
    assert!(first_path < first_spot);
}

#[test]
fn test_hovered_detector_gets_label_and_glow() {
    let mut engine = SimulationEngine::with_demo_levels(SimConfig::default());
    engine.pointer_move(Point::new(120.0, 180.0));
    let snapshot = engine.frame(0.0);
    let list = render(&engine.levels()[0], &snapshot);

    let texts: Vec<&str> = list.texts().collect();
    assert_eq!(texts, vec!["D-101", "Zone A"]);
    let glowing = list
        .commands()
        .iter()
        .filter(|c| {
            matches!(c, DrawCommand::Circle { glow: Some((color, _)), .. } if *color == palette::HOVER_GLOW)
        })
        .count();
    assert_eq!(glowing, 1);
}

#[test]
fn test_active_detector_is_labelled_and_red() {
    let engine = engine_at(Stage::DetectorActivated);
    let snapshot = engine.snapshot();
    let list = render(&engine.levels()[0], &snapshot);

    assert!(list.texts().any(|t| t == "D-101"));
    let reds = list
        .commands()
        .iter()
        .filter(|c| {
            matches!(c, DrawCommand::Circle { color, .. } if *color == palette::DETECTOR_ACTIVE)
        })
        .count();
    assert_eq!(reds, 1);
    assert!(!list.texts().any(|t| t == "ESSER"));
}

#[test]
fn test_subsystem_boxes_light_up_with_the_pipeline() {
    let engine = engine_at(Stage::EsserProcessing);
    let snapshot = engine.snapshot();
    let list = render(&engine.levels()[0], &snapshot);

    for label in ["ESSER", "MOXA", "IVPARK"] {
        assert!(list.texts().any(|t| t == label), "missing {label}");
    }
    let x = snapshot.surface.width - 120.0;
    assert_eq!(fill_color_at(&list, x, 30.0), Some(palette::ESSER));
    assert_eq!(fill_color_at(&list, x, 130.0), Some(palette::SUBSYSTEM_OFF));
    assert_eq!(fill_color_at(&list, x, 230.0), Some(palette::SUBSYSTEM_OFF));
}

#[test]
fn test_alarm_banner_only_when_confirmed() {
    let engine = engine_at(Stage::CameraVerification);
    let list = render(&engine.levels()[0], &engine.snapshot());
    assert!(!list.texts().any(|t| t == "ALARM"));

    let engine = engine_at(Stage::AlarmConfirmed);
    let snapshot = engine.snapshot();
    let list = render(&engine.levels()[0], &snapshot);

    match list.commands().last() {
        Some(DrawCommand::Text { text, .. }) => assert_eq!(text, "ALARM"),
        other => panic!("expected banner text last, got {other:?}"),
    }
    let x = snapshot.surface.width - 120.0;
    assert_eq!(fill_color_at(&list, x, 230.0), Some(palette::IVPARK));
    assert_eq!(list.transform_depth(), 0);
}

#[test]
fn test_smoke_turns_red_at_alarm() {
    let levels = demo_levels();
    let mut snapshot = SimulationSnapshot {
        smoke: vec![SmokeView {
            position: Point::new(100.0, 100.0),
            size: 10.0,
            opacity: 0.5,
        }],
        ..Default::default()
    };
    snapshot.stage = Stage::CameraVerification;
    let grey = smoke_circle_color(&render(&levels[0], &snapshot));
    snapshot.stage = Stage::AlarmConfirmed;
    let red = smoke_circle_color(&render(&levels[0], &snapshot));

    assert_eq!(grey.map(|c| (c.r, c.g, c.b)), Some((148, 163, 184)));
    assert_eq!(red.map(|c| (c.r, c.g, c.b)), Some((239, 68, 68)));
    assert_eq!(red.map(|c| c.a), Some(0.35));
}

fn smoke_circle_color(list: &DisplayList) -> Option<Color> {
    list.commands().iter().find_map(|c| match c {
        DrawCommand::Circle { radius, color, .. } if *radius == 10.0 => Some(*color),
        _ => None,
    })
}

#[test]
fn test_packet_colour_follows_spawn_stage() {
    let levels = demo_levels();
    let packet = |stage| PacketView {
        source: Point::new(120.0, 180.0),
        target: Point::new(700.0, 50.0),
        progress: 0.5,
        stage,
    };
    let snapshot = SimulationSnapshot {
        stage: Stage::AlarmConfirmed,
        packets: vec![
            packet(Stage::EsserProcessing),
            packet(Stage::MoxaTransmission),
            packet(Stage::CameraVerification),
        ],
        ..Default::default()
    };
    let list = render(&levels[0], &snapshot);

    let packet_colors: Vec<Color> = list
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Circle {
                center,
                color,
                glow: Some(_),
                ..
            } if *center == Point::new(410.0, 115.0) => Some(*color),
            _ => None,
        })
        .collect();
    assert_eq!(
        packet_colors,
        vec![palette::ESSER, palette::MOXA, palette::IVPARK]
    );
}

#[test]
fn test_cameras_draw_field_of_view() {
    let levels = demo_levels();
    let list = render(&levels[1], &SimulationSnapshot::default());
    let wedges: Vec<(f64, f64, f64)> = list
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Wedge {
                radius,
                start_deg,
                end_deg,
                ..
            } => Some((*radius, *start_deg, *end_deg)),
            _ => None,
        })
        .collect();
    assert_eq!(wedges.len(), levels[1].cameras.len());
    assert!(wedges
        .iter()
        .all(|w| *w == (CAMERA_FOV_RADIUS, -45.0, 45.0)));
}

#[test]
fn test_vehicle_on_unknown_spot_is_skipped() {
    let mut level = demo_levels().remove(0);
    let before = render(&level, &SimulationSnapshot::default()).len();
    level.vehicles[0].spot_id = "nowhere".into();
    let after = render(&level, &SimulationSnapshot::default()).len();
    assert!(after < before);
}

#[test]
fn test_display_list_serializes_with_op_tags() {
    let levels = demo_levels();
    let list = render(&levels[0], &SimulationSnapshot::default());
    let json = serde_json::to_string(&list).unwrap();
    assert!(json.contains(r#""op":"clear""#));
    assert!(json.contains(r#""op":"push_transform""#));
}

// ---- Viewport ----

#[test]
fn test_viewport_round_trip() {
    let viewport = Viewport::new(Point::new(50.0, 20.0), 2.0);
    let screen = viewport.to_screen(Point::new(120.0, 180.0));
    assert_eq!(screen, Point::new(290.0, 380.0));
    assert_eq!(viewport.to_level(screen), Some(Point::new(120.0, 180.0)));
    assert_eq!(Viewport::new(Point::default(), 0.0).to_level(screen), None);
}

#[test]
fn test_pick_detector_through_viewport() {
    let levels = demo_levels();
    let viewport = Viewport::new(Point::new(50.0, 20.0), 2.0);

    let hit = pick_detector(&levels[0], &viewport, Point::new(290.0, 390.0));
    assert_eq!(hit.map(|d| d.id.as_str()), Some("D-101"));

    // 12 level units away after scaling.
    let miss = pick_detector(&levels[0], &viewport, Point::new(314.0, 380.0));
    assert!(miss.is_none());

    let identity = pick_detector(&levels[0], &Viewport::default(), Point::new(300.0, 185.0));
    assert_eq!(identity.map(|d| d.id.as_str()), Some("D-102"));
}

#[test]
fn test_subsystem_boxes_track_surface_width() {
    let engine = engine_at(Stage::EsserProcessing);
    let mut snapshot = engine.snapshot();
    snapshot.surface = Surface::new(1200.0, 500.0);
    let list = render(&engine.levels()[0], &snapshot);
    assert_eq!(fill_color_at(&list, 1080.0, 30.0), Some(palette::ESSER));
}
