//! The simulation driver: one task owning the whole control loop.
//!
//! Orchestrates the lifecycle per the transition table:
//! 1. Receive a command (configure, step, start/pause auto-run, reset)
//! 2. Check the lifecycle rules in [`ControlState`]
//! 3. Issue the matching service round trip(s)
//! 4. Replace the owned snapshot and publish an update
//!
//! The auto-run timer and the at-most-one in-flight step are serialized
//! against commands by a single `select!` loop -- there is exactly one
//! writer role for the snapshot and no locking anywhere. Ticks observed
//! while a step is still in flight are dropped, never queued, so
//! out-of-order responses cannot corrupt turn order.
//!
//! Cancellation is by generation: the epoch is bumped on every
//! configure/reset/pause, each spawned step carries the epoch current at
//! dispatch time, and a completion whose epoch no longer matches is
//! discarded without touching the snapshot.

use std::time::Duration;

use sweepsim_client::{ServiceBackend, ServiceError};
use sweepsim_types::{SimulationConfig, Snapshot};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

use crate::command::{Command, ControlHandle};
use crate::error::ControlError;
use crate::state::{ControlState, RunState};
use crate::update::ControlUpdate;

/// Fixed period between auto-run steps.
///
/// 500 ms keeps the perceived animation smooth without overwhelming the
/// service; it is not adjusted adaptively for slow responses.
pub const STEP_PERIOD: Duration = Duration::from_millis(500);

/// A step round trip that has been dispatched but not yet resolved.
struct InFlightStep {
    /// The request generation current when the step was dispatched.
    epoch: u64,
    /// The spawned round trip.
    handle: JoinHandle<Result<Snapshot, ServiceError>>,
}

/// The control loop actor.
///
/// Owns the current snapshot, the remembered configuration, the auto-run
/// interval, and the in-flight step. Driven by commands from a
/// [`ControlHandle`]; observable through the watch channel returned by
/// [`SimulationDriver::new`].
pub struct SimulationDriver {
    backend: ServiceBackend,
    state: ControlState,
    ticker: Option<Interval>,
    in_flight: Option<InFlightStep>,
    commands: mpsc::UnboundedReceiver<Command>,
    updates: watch::Sender<ControlUpdate>,
}

impl SimulationDriver {
    /// Create a driver around `backend`.
    ///
    /// Returns the driver itself (to be `run` on a task), the handle for
    /// sending commands, and the receiver observers read updates from.
    pub fn new(
        backend: ServiceBackend,
    ) -> (Self, ControlHandle, watch::Receiver<ControlUpdate>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = watch::channel(ControlUpdate::initial());
        let driver = Self {
            backend,
            state: ControlState::new(),
            ticker: None,
            in_flight: None,
            commands: command_rx,
            updates: update_tx,
        };
        (driver, ControlHandle::new(command_tx), update_rx)
    }

    /// Run the control loop until every [`ControlHandle`] is dropped.
    ///
    /// Never panics and never returns an error: every failure is
    /// published as a value on the update channel, leaving the previous
    /// valid state untouched.
    pub async fn run(mut self) {
        info!(backend = self.backend.name(), "simulation driver started");

        loop {
            tokio::select! {
                command = self.commands.recv() => {
                    match command {
                        Some(command) => self.handle_command(command).await,
                        None => break,
                    }
                }
                (epoch, result) = next_outcome(&mut self.in_flight) => {
                    self.handle_step_outcome(epoch, result);
                }
                _ = next_tick(&mut self.ticker) => {
                    self.handle_tick();
                }
            }
        }

        self.cancel_ticker();
        info!("command channel closed, simulation driver shutting down");
    }

    async fn handle_command(&mut self, command: Command) {
        match command {
            Command::Configure(config) => self.configure(config).await,
            Command::Step => self.request_step("manual"),
            Command::StartAutoRun => self.start_auto_run(),
            Command::PauseAutoRun => self.pause_auto_run(),
            Command::Reset => self.reset().await,
        }
    }

    /// Create a fresh run from `config`.
    ///
    /// Valid from any state. The epoch is bumped up front: a step still
    /// in flight belongs to the run the caller is abandoning, and its
    /// response must be discarded whether or not the create succeeds.
    async fn configure(&mut self, config: SimulationConfig) {
        self.state.bump_epoch();

        match self.backend.create(&config).await {
            Ok(descriptor) => {
                info!(
                    simulation_id = descriptor.id,
                    grid_size = descriptor.grid_size,
                    num_robots = config.num_robots,
                    num_trash = config.num_trash,
                    "simulation created"
                );
                self.install_run(config).await;
            }
            Err(error) => {
                warn!(error = %error, "create failed, keeping previous state");
                self.publish_error(error.into());
            }
        }
    }

    /// Recreate the run from the remembered configuration.
    async fn reset(&mut self) {
        let Some(config) = self.state.remembered_config() else {
            debug!("reset requested before any configuration");
            self.publish_error(ControlError::NothingToReset);
            return;
        };

        if self.state.run_state() == RunState::Running {
            self.cancel_ticker();
            self.state.pause();
        }
        self.state.bump_epoch();

        match self.backend.reset(&config).await {
            Ok(descriptor) => {
                info!(
                    simulation_id = descriptor.id,
                    num_robots = config.num_robots,
                    num_trash = config.num_trash,
                    "simulation reset"
                );
                self.install_run(config).await;
            }
            Err(error) => {
                warn!(error = %error, "reset failed, keeping previous state");
                self.publish_error(error.into());
            }
        }
    }

    /// Fetch the initial snapshot of a just-created run and settle in
    /// `Idle`. The descriptor does not carry the grid, so the fetch is
    /// always needed.
    async fn install_run(&mut self, config: SimulationConfig) {
        match self.backend.fetch_state().await {
            Ok(snapshot) => {
                self.cancel_ticker();
                info!(
                    trash_remaining = snapshot.trash_remaining,
                    robots = snapshot.robots.len(),
                    "initial snapshot loaded"
                );
                self.state.install_run(config, snapshot);
                self.publish_ok();
            }
            Err(error) => {
                warn!(error = %error, "initial state fetch failed, keeping previous state");
                self.publish_error(error.into());
            }
        }
    }

    /// Dispatch a step round trip unless the lifecycle forbids it.
    ///
    /// A no-op (without touching the adapter) outside `Idle`/`Running`,
    /// without a snapshot, after the run finished, or while another step
    /// is still in flight.
    fn request_step(&mut self, origin: &'static str) {
        if self.in_flight.is_some() {
            debug!(origin, "step already in flight, ignoring request");
            return;
        }
        if !self.state.can_step() {
            debug!(
                origin,
                run_state = self.state.run_state().as_str(),
                "step rejected, nothing to advance"
            );
            return;
        }

        let epoch = self.state.epoch();
        let backend = self.backend.clone();
        let handle = tokio::spawn(async move { backend.step().await });
        self.in_flight = Some(InFlightStep { epoch, handle });
        trace!(origin, epoch, "step dispatched");
    }

    /// Start the single auto-run interval.
    ///
    /// No-op if already running or if there is no runnable snapshot;
    /// starting twice never creates a second timer.
    fn start_auto_run(&mut self) {
        if self.state.run_state() == RunState::Running {
            debug!("auto-run already active, ignoring start");
            return;
        }
        if !self.state.can_start_auto_run() {
            debug!(
                run_state = self.state.run_state().as_str(),
                "auto-run rejected, no runnable snapshot"
            );
            return;
        }

        let mut interval = tokio::time::interval_at(Instant::now() + STEP_PERIOD, STEP_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.ticker = Some(interval);
        self.state.start_running();
        info!(period_ms = STEP_PERIOD.as_millis(), "auto-run started");
        self.publish_ok();
    }

    /// Cancel the auto-run interval and settle back in `Idle`.
    ///
    /// No-op unless running. The epoch is bumped so a step response that
    /// was in flight when the user paused is discarded on arrival.
    fn pause_auto_run(&mut self) {
        if self.state.run_state() != RunState::Running {
            debug!(
                run_state = self.state.run_state().as_str(),
                "pause ignored, auto-run not active"
            );
            return;
        }

        self.cancel_ticker();
        self.state.bump_epoch();
        self.state.pause();
        info!("auto-run paused");
        self.publish_ok();
    }

    /// One auto-run tick fired.
    fn handle_tick(&mut self) {
        if self.in_flight.is_some() {
            trace!("auto-run tick dropped, step still in flight");
            return;
        }
        self.request_step("auto");
    }

    /// A dispatched step resolved (or its task died).
    fn handle_step_outcome(&mut self, epoch: u64, result: Result<Snapshot, ServiceError>) {
        if epoch != self.state.epoch() {
            debug!(
                response_epoch = epoch,
                current_epoch = self.state.epoch(),
                "discarding stale step response"
            );
            return;
        }

        match result {
            Ok(snapshot) => {
                if let Some(previous) = self.state.snapshot()
                    && (snapshot.turns_elapsed < previous.turns_elapsed
                        || snapshot.trash_remaining > previous.trash_remaining)
                {
                    warn!(
                        turns_elapsed = snapshot.turns_elapsed,
                        trash_remaining = snapshot.trash_remaining,
                        "snapshot regressed against the previous one"
                    );
                }

                let turns_elapsed = snapshot.turns_elapsed;
                let finished = self.state.replace_snapshot(snapshot);
                if finished {
                    self.cancel_ticker();
                    info!(turns_elapsed, "simulation finished");
                }
                self.publish_ok();
            }
            Err(error) => {
                warn!(error = %error, "step failed, dropping back to idle");
                self.cancel_ticker();
                self.state.fail_step();
                self.publish_error(error.into());
            }
        }
    }

    fn cancel_ticker(&mut self) {
        if self.ticker.take().is_some() {
            debug!("auto-run timer cancelled");
        }
    }

    fn publish_ok(&self) {
        self.publish(None);
    }

    fn publish_error(&self, error: ControlError) {
        self.publish(Some(error));
    }

    /// Publish the current state to observers. Receivers may all be
    /// gone; the driver does not care.
    fn publish(&self, last_error: Option<ControlError>) {
        let update = ControlUpdate {
            run_state: self.state.run_state(),
            snapshot: self.state.snapshot().cloned(),
            totals: self.state.totals(),
            last_error,
        };
        let _ = self.updates.send(update);
    }
}

/// Resolve the in-flight step, or wait forever if there is none.
///
/// Cancel-safe: the handle stays in the slot until it actually resolves,
/// so losing the `select!` race never loses the response.
async fn next_outcome(
    slot: &mut Option<InFlightStep>,
) -> (u64, Result<Snapshot, ServiceError>) {
    match slot.as_mut() {
        Some(in_flight) => {
            let joined = (&mut in_flight.handle).await;
            let epoch = in_flight.epoch;
            *slot = None;
            let result = joined.unwrap_or_else(|join_error| {
                Err(ServiceError::ServiceUnavailable(format!(
                    "step task failed: {join_error}"
                )))
            });
            (epoch, result)
        }
        None => std::future::pending().await,
    }
}

/// Wait for the next auto-run tick, or forever if the timer is off.
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}
