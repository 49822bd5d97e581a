//! Systems that operate on the particle world each frame.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; all particle state lives in components.

pub mod cleanup;
pub mod packets;
pub mod smoke;
pub mod snapshot;
pub mod spawn;
pub mod statistics;
