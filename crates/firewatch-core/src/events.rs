//! Notifications emitted by the simulation for the operator's log.

use serde::{Deserialize, Serialize};

use crate::enums::NotificationLevel;

/// Entry in the operator's notification log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique within a run; restarts at 1 after a reset.
    pub id: u32,
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
    /// Host frame timestamp at which the notification was raised (ms).
    pub timestamp_ms: f64,
    pub read: bool,
}

impl Notification {
    pub fn new(
        id: u32,
        level: NotificationLevel,
        title: impl Into<String>,
        message: impl Into<String>,
        timestamp_ms: f64,
    ) -> Self {
        Self {
            id,
            level,
            title: title.into(),
            message: message.into(),
            timestamp_ms,
            read: false,
        }
    }
}
