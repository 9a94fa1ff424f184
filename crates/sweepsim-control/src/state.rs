//! Lifecycle state owned by the simulation driver.
//!
//! [`ControlState`] is the single owner of the current snapshot, the
//! remembered configuration, and the epoch counter. All lifecycle rules
//! live here as small synchronous methods; the driver module only
//! orchestrates service calls and timing around them.

use sweepsim_types::{RememberedTotals, SimulationConfig, Snapshot};

// ---------------------------------------------------------------------------
// RunState
// ---------------------------------------------------------------------------

/// Where the control loop is in the simulation lifecycle.
///
/// Exactly one value exists at any time; it is a function of snapshot
/// presence, the snapshot's finished flag, and whether the auto-run
/// timer is currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No configuration has ever been submitted.
    Uninitialized,
    /// A snapshot is loaded and the loop is waiting for commands.
    Idle,
    /// The auto-run timer is active.
    Running,
    /// The current run reported `is_finished`; terminal until a reset.
    Finished,
}

impl RunState {
    /// Lowercase name for log fields.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Finished => "finished",
        }
    }
}

// ---------------------------------------------------------------------------
// ControlState
// ---------------------------------------------------------------------------

/// The configuration and totals remembered for the current run.
struct RememberedRun {
    /// The configuration the run was created with (reset replays it).
    config: SimulationConfig,
    /// Totals captured at create time for derived statistics.
    totals: RememberedTotals,
}

/// Snapshot, remembered run, and epoch, owned exclusively by the driver.
pub(crate) struct ControlState {
    run_state: RunState,
    snapshot: Option<Snapshot>,
    remembered: Option<RememberedRun>,
    epoch: u64,
}

impl ControlState {
    /// Fresh state: nothing configured, epoch zero.
    pub(crate) const fn new() -> Self {
        Self {
            run_state: RunState::Uninitialized,
            snapshot: None,
            remembered: None,
            epoch: 0,
        }
    }

    /// Current lifecycle state.
    pub(crate) const fn run_state(&self) -> RunState {
        self.run_state
    }

    /// The currently displayed snapshot, if any.
    pub(crate) const fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Totals captured when the current run was created.
    pub(crate) fn totals(&self) -> Option<RememberedTotals> {
        self.remembered.as_ref().map(|run| run.totals)
    }

    /// The configuration a reset would replay.
    pub(crate) fn remembered_config(&self) -> Option<SimulationConfig> {
        self.remembered.as_ref().map(|run| run.config)
    }

    /// The current request generation.
    pub(crate) const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Start a new request generation; responses tagged with an older
    /// epoch must be discarded when they arrive.
    pub(crate) const fn bump_epoch(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Whether a step request may be issued right now.
    pub(crate) fn can_step(&self) -> bool {
        matches!(self.run_state, RunState::Idle | RunState::Running)
            && self.snapshot.as_ref().is_some_and(|s| !s.is_finished)
    }

    /// Whether the auto-run timer may be started right now.
    pub(crate) fn can_start_auto_run(&self) -> bool {
        matches!(self.run_state, RunState::Idle)
            && self.snapshot.as_ref().is_some_and(|s| !s.is_finished)
    }

    /// Install a freshly created run: remember its configuration and
    /// totals, store its initial snapshot, and settle in `Idle`.
    pub(crate) fn install_run(&mut self, config: SimulationConfig, snapshot: Snapshot) {
        self.remembered = Some(RememberedRun {
            totals: RememberedTotals::for_config(&config),
            config,
        });
        self.snapshot = Some(snapshot);
        self.run_state = RunState::Idle;
    }

    /// Replace the snapshot with a newer one. Returns true if the new
    /// snapshot finished the run (the state moves to `Finished`).
    pub(crate) fn replace_snapshot(&mut self, snapshot: Snapshot) -> bool {
        let finished = snapshot.is_finished;
        self.snapshot = Some(snapshot);
        if finished {
            self.run_state = RunState::Finished;
        }
        finished
    }

    /// The auto-run timer was started.
    pub(crate) const fn start_running(&mut self) {
        self.run_state = RunState::Running;
    }

    /// The auto-run timer was cancelled by a pause.
    pub(crate) const fn pause(&mut self) {
        self.run_state = RunState::Idle;
    }

    /// A step failed; the loop drops back to `Idle` so it never retries
    /// silently against a failing service.
    pub(crate) const fn fail_step(&mut self) {
        self.run_state = RunState::Idle;
    }
}
