//! Frame scheduler: turns host display-refresh timestamps into per-frame
//! ticks with the elapsed time since the previous frame.
//!
//! Each animated subsystem owns its own scheduler, so stopping one never
//! disturbs another. Deltas are not clamped; consumers must cope with a long
//! gap after a stall or a backgrounded host.

/// One delivered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Host timestamp of this frame (ms).
    pub timestamp_ms: f64,
    /// Time since the previous delivered frame (ms). Zero on the first frame
    /// after a start.
    pub delta_ms: f64,
}

impl FrameTick {
    pub fn delta_secs(&self) -> f64 {
        self.delta_ms / 1000.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    running: bool,
    last_timestamp_ms: Option<f64>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin delivering frames. No-op when already running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.last_timestamp_ms = None;
    }

    /// Stop delivering frames. Idempotent.
    pub fn stop(&mut self) {
        self.running = false;
        self.last_timestamp_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Feed one display refresh. Returns the tick to deliver, or `None`
    /// while stopped. A timestamp earlier than the previous one yields a zero
    /// delta rather than a negative one.
    pub fn advance(&mut self, timestamp_ms: f64) -> Option<FrameTick> {
        if !self.running {
            return None;
        }
        let delta_ms = match self.last_timestamp_ms {
            Some(last) => (timestamp_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_timestamp_ms = Some(timestamp_ms);
        Some(FrameTick {
            timestamp_ms,
            delta_ms,
        })
    }

    /// Feed one display refresh and hand the tick to `callback` if running.
    /// Returns whether the callback ran.
    pub fn drive(&mut self, timestamp_ms: f64, callback: impl FnOnce(FrameTick)) -> bool {
        match self.advance(timestamp_ms) {
            Some(tick) => {
                callback(tick);
                true
            }
            None => false,
        }
    }
}
