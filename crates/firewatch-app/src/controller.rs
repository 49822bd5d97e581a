//! Command/snapshot surface over the frame-loop thread.
//!
//! Hosts (the CLI, a UI shell) start the loop once, then push operator
//! commands and poll the latest snapshot.

use std::sync::{mpsc, Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

use thiserror::Error;
use tracing::info;

use firewatch_core::commands::OperatorCommand;
use firewatch_core::state::SimulationSnapshot;
use firewatch_sim::SimulationEngine;

use crate::frame_loop::{self, LoopCommand};

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("frame loop already running")]
    AlreadyRunning,

    #[error("frame loop not started")]
    NotStarted,

    #[error("frame loop channel closed")]
    ChannelClosed,

    #[error("shared state lock poisoned")]
    Poisoned,

    #[error("frame rate must be finite and positive, got {0}")]
    FrameRate(f64),

    #[error("failed to spawn frame loop: {0}")]
    Spawn(#[from] std::io::Error),
}

impl<T> From<PoisonError<MutexGuard<'_, T>>> for ControlError {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        ControlError::Poisoned
    }
}

/// Owns the frame-loop thread while it runs.
///
/// The loop holds the engine; the controller keeps the command sender and
/// the slot the loop publishes its latest snapshot into.
#[derive(Default)]
pub struct Controller {
    command_tx: Option<mpsc::Sender<LoopCommand>>,
    latest_snapshot: Arc<Mutex<Option<SimulationSnapshot>>>,
    handle: Option<JoinHandle<()>>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `engine` into a new frame-loop thread running at `frame_rate` Hz.
    pub fn start(&mut self, engine: SimulationEngine, frame_rate: f64) -> Result<(), ControlError> {
        if self.handle.is_some() {
            return Err(ControlError::AlreadyRunning);
        }
        let frame =
            frame_loop::frame_duration(frame_rate).ok_or(ControlError::FrameRate(frame_rate))?;

        *self.latest_snapshot.lock()? = None;
        let (cmd_tx, handle) =
            frame_loop::spawn_frame_loop(engine, frame, self.latest_snapshot.clone())?;

        self.command_tx = Some(cmd_tx);
        self.handle = Some(handle);
        Ok(())
    }

    /// Forward an operator command to the engine.
    pub fn send(&self, command: OperatorCommand) -> Result<(), ControlError> {
        let tx = self.command_tx.as_ref().ok_or(ControlError::NotStarted)?;
        tx.send(LoopCommand::Operator(command))
            .map_err(|_| ControlError::ChannelClosed)
    }

    /// Latest snapshot published by the loop, `None` before its first frame.
    pub fn snapshot(&self) -> Result<Option<SimulationSnapshot>, ControlError> {
        Ok(self.latest_snapshot.lock()?.clone())
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Stop the loop and wait for its thread. No-op when not running.
    pub fn shutdown(&mut self) -> Result<(), ControlError> {
        if let Some(tx) = self.command_tx.take() {
            // A closed channel means the loop is already gone.
            let _ = tx.send(LoopCommand::Shutdown);
        }
        if let Some(handle) = self.handle.take() {
            handle.join().map_err(|_| ControlError::ChannelClosed)?;
            info!("frame loop joined");
        }
        Ok(())
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use firewatch_core::enums::Stage;
    use firewatch_sim::SimConfig;

    fn engine() -> SimulationEngine {
        SimulationEngine::with_demo_levels(SimConfig::default())
    }

    #[test]
    fn test_send_before_start_fails() {
        let controller = Controller::new();
        assert!(matches!(
            controller.send(OperatorCommand::StartSimulation),
            Err(ControlError::NotStarted)
        ));
        assert!(controller.snapshot().unwrap().is_none());
    }

    #[test]
    fn test_double_start_fails() {
        let mut controller = Controller::new();
        controller.start(engine(), 120.0).unwrap();
        assert!(matches!(
            controller.start(engine(), 120.0),
            Err(ControlError::AlreadyRunning)
        ));
        controller.shutdown().unwrap();
        assert!(!controller.is_running());
    }

    #[test]
    fn test_invalid_frame_rate_is_rejected() {
        let mut controller = Controller::new();
        for rate in [0.0, -30.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                controller.start(engine(), rate),
                Err(ControlError::FrameRate(_))
            ));
            assert!(!controller.is_running());
        }

        controller.start(engine(), 120.0).unwrap();
        assert!(controller.is_running());
        controller.shutdown().unwrap();
    }

    #[test]
    fn test_restart_after_shutdown() {
        let mut controller = Controller::new();
        controller.start(engine(), 120.0).unwrap();
        controller.shutdown().unwrap();
        assert!(matches!(
            controller.send(OperatorCommand::PointerLeave),
            Err(ControlError::NotStarted)
        ));

        controller.start(engine(), 120.0).unwrap();
        assert!(controller.is_running());
        controller.shutdown().unwrap();
    }

    #[test]
    fn test_commands_reach_the_engine() {
        let mut controller = Controller::new();
        controller.start(engine(), 120.0).unwrap();
        controller
            .send(OperatorCommand::SetVolume { volume: 80 })
            .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut volume = None;
        while Instant::now() < deadline {
            volume = controller.snapshot().unwrap().map(|s| s.volume);
            if volume == Some(80) {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(volume, Some(80));
        assert_eq!(
            controller.snapshot().unwrap().map(|s| s.stage),
            Some(Stage::Idle)
        );

        controller.shutdown().unwrap();
        assert!(matches!(
            controller.send(OperatorCommand::StartSimulation),
            Err(ControlError::NotStarted)
        ));
    }
}
