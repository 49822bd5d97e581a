//! RGBA colours and the scene palette.

use serde::Serialize;

use firewatch_core::enums::{DetectorStatus, Stage, Subsystem};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// 0.0 transparent, 1.0 opaque.
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Parse `#RRGGBB`. Anything else yields `None`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

pub mod palette {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgb(0x1E, 0x29, 0x3B);
    pub const PATH: Color = Color::rgb(0x94, 0xA3, 0xB8);
    pub const SPOT_OUTLINE: Color = Color::rgb(0x47, 0x55, 0x69);
    pub const WINDOW: Color = Color::rgb(0x94, 0xA3, 0xB8);
    pub const COLUMN: Color = Color::rgb(0x64, 0x74, 0x8B);
    pub const RAMP: Color = Color::rgb(0x47, 0x55, 0x69);
    pub const SHAFT: Color = Color::rgb(0x33, 0x41, 0x55);
    pub const TRIM: Color = Color::rgb(0x94, 0xA3, 0xB8);

    pub const DETECTOR_NORMAL: Color = Color::rgb(0x10, 0xB9, 0x81);
    pub const DETECTOR_FAULT: Color = Color::rgb(0xF5, 0x9E, 0x0B);
    pub const DETECTOR_ACTIVE: Color = Color::rgb(0xEF, 0x44, 0x44);
    pub const HOVER_GLOW: Color = Color::rgba(255, 255, 255, 0.8);
    pub const LABEL: Color = Color::rgb(255, 255, 255);

    pub const CAMERA_BODY: Color = Color::rgb(0x0F, 0x17, 0x2A);
    pub const CAMERA_LENS: Color = Color::rgb(0x1E, 0x40, 0xAF);
    pub const CAMERA_FOV_FILL: Color = Color::rgba(30, 64, 175, 0.1);
    pub const CAMERA_FOV_STROKE: Color = Color::rgba(30, 64, 175, 0.2);

    pub const SMOKE: Color = Color::rgba(148, 163, 184, 0.7);
    pub const SMOKE_ALARM: Color = Color::rgba(239, 68, 68, 0.7);

    pub const ESSER: Color = Color::rgb(0x3B, 0x82, 0xF6);
    pub const MOXA: Color = Color::rgb(0x8B, 0x5C, 0xF6);
    pub const IVPARK: Color = Color::rgb(0xEF, 0x44, 0x44);
    pub const SUBSYSTEM_OFF: Color = Color::rgb(0x64, 0x74, 0x8B);

    pub const ALARM_BANNER: Color = Color::rgba(239, 68, 68, 0.25);
}

/// "On" colour of a subsystem, also used for the packets it receives.
pub fn subsystem_color(subsystem: Subsystem) -> Color {
    match subsystem {
        Subsystem::Esser => palette::ESSER,
        Subsystem::Moxa => palette::MOXA,
        Subsystem::Ivpark => palette::IVPARK,
    }
}

/// Packet colour is fixed by the stage it was spawned under.
pub fn packet_color(spawn_stage: Stage) -> Color {
    spawn_stage
        .subsystem()
        .map(subsystem_color)
        .unwrap_or(palette::ESSER)
}

/// Detector fill. The run's active detector is drawn as active whatever its
/// configured status.
pub fn detector_color(status: DetectorStatus, is_active: bool) -> Color {
    match (status, is_active) {
        (DetectorStatus::Active, _) | (_, true) => palette::DETECTOR_ACTIVE,
        (DetectorStatus::Fault, false) => palette::DETECTOR_FAULT,
        (DetectorStatus::Normal, false) => palette::DETECTOR_NORMAL,
    }
}

pub fn smoke_color(stage: Stage) -> Color {
    if stage >= Stage::AlarmConfirmed {
        palette::SMOKE_ALARM
    } else {
        palette::SMOKE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("#2563EB"), Some(Color::rgb(0x25, 0x63, 0xEB)));
        assert_eq!(Color::from_hex("2563EB"), None);
        assert_eq!(Color::from_hex("#25G3EB"), None);
        assert_eq!(Color::from_hex("#fff"), None);
    }

    #[test]
    fn test_fault_detector_turns_red_when_active() {
        assert_eq!(
            detector_color(DetectorStatus::Fault, false),
            palette::DETECTOR_FAULT
        );
        assert_eq!(
            detector_color(DetectorStatus::Fault, true),
            palette::DETECTOR_ACTIVE
        );
    }
}
