//! Simulation engine for the fire-detection trainer.
//!
//! Owns the stage state machine and the hecs particle world, advances on
//! host frame timestamps, and produces SimulationSnapshots for the renderer.

pub mod camera_select;
pub mod engine;
pub mod levels;
pub mod run;
pub mod scheduler;
pub mod systems;
pub mod timers;

pub use engine::{SimConfig, SimulationEngine};
pub use firewatch_core as core;
