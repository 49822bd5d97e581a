//! Simulation constants and tuning parameters.
//!
//! The particle tuning was originally expressed per 16 ms animation frame;
//! the values here are the same rates expressed per second so that the
//! systems integrate against real elapsed time.

/// Reference frame duration the particle tuning was authored against (ms).
pub const REFERENCE_FRAME_MS: f64 = 16.0;

/// Frames per second at the reference frame duration.
pub const REFERENCE_FPS: f64 = 1000.0 / REFERENCE_FRAME_MS;

// --- Surface ---

pub const DEFAULT_SURFACE_WIDTH: f64 = 800.0;
pub const DEFAULT_SURFACE_HEIGHT: f64 = 500.0;

// --- Picking ---

/// Radius within which a pointer resolves to a detector (level units).
pub const DETECTOR_HIT_RADIUS: f64 = 10.0;

// --- Smoke ---

/// Expected smoke puffs spawned per second (30 % chance per reference frame).
pub const SMOKE_SPAWN_RATE: f64 = 0.3 * REFERENCE_FPS;

/// Spawn jitter around the detector, each axis (level units).
pub const SMOKE_JITTER: f64 = 10.0;

/// Initial puff radius range.
pub const SMOKE_SIZE_MIN: f64 = 5.0;
pub const SMOKE_SIZE_MAX: f64 = 20.0;

/// Initial puff opacity range.
pub const SMOKE_OPACITY_MIN: f64 = 0.2;
pub const SMOKE_OPACITY_MAX: f64 = 0.7;

/// Upward drift speed range (units per second).
pub const SMOKE_SPEED_MIN: f64 = 0.1 * REFERENCE_FPS;
pub const SMOKE_SPEED_MAX: f64 = 0.6 * REFERENCE_FPS;

/// Radius growth (units per second).
pub const SMOKE_GROWTH_RATE: f64 = 0.05 * REFERENCE_FPS;

/// Opacity lost per second.
pub const SMOKE_FADE_RATE: f64 = 0.002 * REFERENCE_FPS;

// --- Data packets ---

/// Expected packets spawned per second (10 % chance per reference frame).
pub const PACKET_SPAWN_RATE: f64 = 0.1 * REFERENCE_FPS;

/// Progress gained per second (full trip in ~5.3 s).
pub const PACKET_SPEED: f64 = 0.003 * REFERENCE_FPS;

/// Longest stretch of elapsed time a single frame may spawn for.
/// A frame arriving after a long stall spawns as if only this much time had
/// passed; integration still uses the full delta.
pub const SPAWN_WINDOW_SECS: f64 = 0.25;

// --- Subsystem anchors ---

/// Distance of the packet anchors from the right edge of the surface.
pub const ANCHOR_RIGHT_INSET: f64 = 100.0;

/// Anchor y coordinate per subsystem slot.
pub const ANCHOR_Y: [f64; 3] = [50.0, 150.0, 250.0];

/// Status box geometry, relative to the right edge and slot.
pub const STATUS_BOX_RIGHT_INSET: f64 = 120.0;
pub const STATUS_BOX_TOP: [f64; 3] = [30.0, 130.0, 230.0];
pub const STATUS_BOX_WIDTH: f64 = 100.0;
pub const STATUS_BOX_HEIGHT: f64 = 40.0;

// --- Camera feed overlay ---

/// Smoke overlay intensity gained per step, step length and ceiling.
pub const FEED_SMOKE_STEP: f64 = 0.05;
pub const FEED_SMOKE_INTERVAL_MS: f64 = 500.0;
pub const FEED_SMOKE_MAX: f64 = 0.7;

/// Flame overlay intensity gained per step, step length and ceiling.
pub const FEED_FLAME_STEP: f64 = 0.1;
pub const FEED_FLAME_INTERVAL_MS: f64 = 1000.0;
pub const FEED_FLAME_MAX: f64 = 1.0;

// --- Dwell times (seconds) ---

pub const DWELL_DETECTOR_ACTIVATED: f64 = 2.0;
pub const DWELL_ESSER_PROCESSING: f64 = 2.5;
pub const DWELL_MOXA_TRANSMISSION: f64 = 3.0;
pub const DWELL_IVPARK_PROCESSING: f64 = 3.5;
pub const DWELL_CAMERA_VERIFICATION: f64 = 4.0;

// --- Presentation ---

pub const DEFAULT_VOLUME: u8 = 50;
pub const MAX_VOLUME: u8 = 100;
