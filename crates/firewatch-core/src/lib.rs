//! Core types and definitions for the FIREWATCH training simulator.
//!
//! This crate defines the vocabulary shared across all other crates:
//! level data, components, commands, notifications, snapshots and constants.
//! It has no dependency on any runtime or rendering backend.

pub mod commands;
pub mod components;
pub mod constants;
pub mod dwell;
pub mod enums;
pub mod events;
pub mod level;
pub mod state;
pub mod types;
