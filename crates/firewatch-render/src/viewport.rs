//! Screen <-> level-local coordinate translation and picking.

use glam::DVec2;

use firewatch_core::constants::DETECTOR_HIT_RADIUS;
use firewatch_core::level::{Detector, ParkingLevel};
use firewatch_core::types::Point;

/// Where the level is drawn on screen: level point `p` appears at
/// `offset + p * scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub offset: Point,
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Point::default(),
            scale: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(offset: Point, scale: f64) -> Self {
        Self { offset, scale }
    }

    /// Screen position to level-local position. `None` for a degenerate
    /// scale.
    pub fn to_level(&self, screen: Point) -> Option<Point> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return None;
        }
        Some(((DVec2::from(screen) - DVec2::from(self.offset)) / self.scale).into())
    }

    pub fn to_screen(&self, level: Point) -> Point {
        (DVec2::from(self.offset) + DVec2::from(level) * self.scale).into()
    }
}

/// Detector under a screen position, if any.
pub fn pick_detector<'a>(
    level: &'a ParkingLevel,
    viewport: &Viewport,
    screen: Point,
) -> Option<&'a Detector> {
    let local = viewport.to_level(screen)?;
    level.detector_at(local, DETECTOR_HIT_RADIUS)
}
