//! Scene renderer for the fire-detection trainer.
//!
//! Produces backend-agnostic display lists from a level and a
//! SimulationSnapshot, and maps pointer positions back into level space.

pub mod color;
pub mod display;
pub mod scene;
pub mod viewport;

pub use display::{DisplayList, DrawCommand};
pub use scene::{render_scene, Scene};
pub use viewport::{pick_detector, Viewport};

#[cfg(test)]
mod tests;
