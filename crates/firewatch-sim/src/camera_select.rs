//! Choice of the camera that verifies an activated detector.
//!
//! Rule: among the level's cameras covering the detector's zone, take the one
//! nearest to the detector. When no camera shares the zone, fall back to the
//! nearest camera on the level. Offline cameras are skipped. Ties go to the
//! camera listed first.

use firewatch_core::level::{Camera, Detector, ParkingLevel};

pub fn select_camera<'a>(level: &'a ParkingLevel, detector: &Detector) -> Option<&'a Camera> {
    let online = || level.cameras.iter().filter(|c| c.online);

    nearest(online().filter(|c| c.zone == detector.zone), detector)
        .or_else(|| nearest(online(), detector))
}

fn nearest<'a>(cameras: impl Iterator<Item = &'a Camera>, detector: &Detector) -> Option<&'a Camera> {
    let mut best: Option<(&Camera, f64)> = None;
    for camera in cameras {
        let distance = camera.coordinates.distance_to(&detector.coordinates);
        match best {
            Some((_, best_distance)) if best_distance <= distance => {}
            _ => best = Some((camera, distance)),
        }
    }
    best.map(|(camera, _)| camera)
}

#[cfg(test)]
mod tests {
    use super::*;
    use firewatch_core::enums::DetectorStatus;
    use firewatch_core::types::Point;

    fn camera(id: &str, zone: &str, x: f64, y: f64) -> Camera {
        Camera {
            id: id.into(),
            zone: zone.into(),
            coordinates: Point::new(x, y),
            angle: 0.0,
            image_url: None,
            online: true,
        }
    }

    fn detector_at(zone: &str, x: f64, y: f64) -> Detector {
        Detector {
            id: "D".into(),
            zone: zone.into(),
            coordinates: Point::new(x, y),
            status: DetectorStatus::Normal,
        }
    }

    fn level(cameras: Vec<Camera>) -> ParkingLevel {
        ParkingLevel {
            cameras,
            ..Default::default()
        }
    }

    #[test]
    fn test_same_zone_wins_over_closer_camera() {
        let level = level(vec![
            camera("C-CLOSE", "B", 105.0, 100.0),
            camera("C-ZONE", "A", 300.0, 100.0),
        ]);
        let chosen = select_camera(&level, &detector_at("A", 100.0, 100.0));
        assert_eq!(chosen.map(|c| c.id.as_str()), Some("C-ZONE"));
    }

    #[test]
    fn test_nearest_within_zone() {
        let level = level(vec![
            camera("C-FAR", "A", 400.0, 100.0),
            camera("C-NEAR", "A", 150.0, 100.0),
        ]);
        let chosen = select_camera(&level, &detector_at("A", 100.0, 100.0));
        assert_eq!(chosen.map(|c| c.id.as_str()), Some("C-NEAR"));
    }

    #[test]
    fn test_falls_back_to_nearest_on_level() {
        let level = level(vec![
            camera("C-1", "B", 500.0, 100.0),
            camera("C-2", "C", 120.0, 100.0),
        ]);
        let chosen = select_camera(&level, &detector_at("A", 100.0, 100.0));
        assert_eq!(chosen.map(|c| c.id.as_str()), Some("C-2"));
    }

    #[test]
    fn test_offline_cameras_are_skipped() {
        let mut offline = camera("C-ZONE", "A", 110.0, 100.0);
        offline.online = false;
        let level = level(vec![offline, camera("C-OTHER", "B", 400.0, 100.0)]);
        let chosen = select_camera(&level, &detector_at("A", 100.0, 100.0));
        assert_eq!(chosen.map(|c| c.id.as_str()), Some("C-OTHER"));
    }

    #[test]
    fn test_no_cameras_selects_nothing() {
        assert!(select_camera(&level(vec![]), &detector_at("A", 0.0, 0.0)).is_none());
    }
}
