//! Commands accepted by the simulation driver and the handle that sends
//! them.
//!
//! Commands are fire-and-forget: outcomes (new state, new snapshot, or a
//! surfaced error) are observed on the driver's update channel, never as
//! a return value. This keeps the caller's side trivially non-blocking
//! and matches how a UI issues intents.

use sweepsim_types::SimulationConfig;
use tokio::sync::mpsc;
use tracing::warn;

/// A transition intent sent to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    /// Create a fresh simulation from the given configuration.
    Configure(SimulationConfig),
    /// Advance the current run by one turn.
    Step,
    /// Start the fixed-cadence auto-run timer.
    StartAutoRun,
    /// Cancel the auto-run timer.
    PauseAutoRun,
    /// Recreate the run from the remembered configuration.
    Reset,
}

/// Cloneable sender half for driving a [`crate::SimulationDriver`].
#[derive(Debug, Clone)]
pub struct ControlHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl ControlHandle {
    pub(crate) const fn new(commands: mpsc::UnboundedSender<Command>) -> Self {
        Self { commands }
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            warn!(?command, "simulation driver is gone, dropping command");
        }
    }

    /// Request a fresh simulation created from `config`.
    pub fn configure(&self, config: SimulationConfig) {
        self.send(Command::Configure(config));
    }

    /// Request a single manual step.
    pub fn step(&self) {
        self.send(Command::Step);
    }

    /// Request the auto-run timer to start.
    pub fn start_auto_run(&self) {
        self.send(Command::StartAutoRun);
    }

    /// Request the auto-run timer to stop.
    pub fn pause_auto_run(&self) {
        self.send(Command::PauseAutoRun);
    }

    /// Request the current run be recreated from its configuration.
    pub fn reset(&self) {
        self.send(Command::Reset);
    }
}
