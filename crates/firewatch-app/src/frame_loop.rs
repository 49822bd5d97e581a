//! Frame loop thread: drives the engine at display rate and publishes
//! snapshots.
//!
//! The engine moves into this thread and is owned by it from then on.
//! Commands arrive via `mpsc` channel; snapshots are stored in shared state
//! for synchronous polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use firewatch_core::commands::OperatorCommand;
use firewatch_core::state::SimulationSnapshot;
use firewatch_sim::SimulationEngine;

/// Messages to the frame-loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// Forwarded to the engine and applied at the next frame boundary.
    Operator(OperatorCommand),
    Shutdown,
}

/// Nominal duration of one frame at `frame_rate` Hz, `None` unless the rate
/// is finite and positive.
pub fn frame_duration(frame_rate: f64) -> Option<Duration> {
    if !frame_rate.is_finite() || frame_rate <= 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(1.0 / frame_rate).ok()
}

/// Spawns the frame loop in a new thread, one frame every `frame`.
///
/// Returns the command sender and the thread handle.
pub fn spawn_frame_loop(
    engine: SimulationEngine,
    frame: Duration,
    latest_snapshot: Arc<Mutex<Option<SimulationSnapshot>>>,
) -> io::Result<(mpsc::Sender<LoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();

    let handle = std::thread::Builder::new()
        .name("firewatch-frame-loop".into())
        .spawn(move || {
            run_frame_loop(engine, frame, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// The frame loop. Runs until Shutdown or channel disconnect.
fn run_frame_loop(
    mut engine: SimulationEngine,
    frame: Duration,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    latest_snapshot: &Mutex<Option<SimulationSnapshot>>,
) {
    let origin = Instant::now();
    let mut next_frame_time = origin;
    info!(frame_ms = frame.as_secs_f64() * 1000.0, "frame loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Operator(cmd)) => engine.queue_command(cmd),
                Ok(LoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!("frame loop stopped");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. One frame at the current host timestamp
        let timestamp_ms = origin.elapsed().as_secs_f64() * 1000.0;
        let snapshot = engine.frame(timestamp_ms);

        // 3. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until the next refresh
        next_frame_time += frame;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > frame * 2 {
            // Too far behind. Frames carry real deltas, so just resync.
            debug!("frame loop behind schedule, resyncing");
            next_frame_time = now;
        }
    }
}
