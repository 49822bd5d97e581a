//! Firewatch application shell.
//!
//! Wires the engine and renderer together behind configuration, a frame-loop
//! thread and a command/snapshot controller.

pub mod config;
pub mod controller;
pub mod drill;
pub mod frame_loop;

pub use firewatch_core as core;
