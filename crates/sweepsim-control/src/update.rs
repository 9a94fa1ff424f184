//! The view of driver state published to observers.

use sweepsim_types::{RememberedTotals, Snapshot};

use crate::error::ControlError;
use crate::state::RunState;

/// One published view of the control loop's state.
///
/// Sent on the driver's watch channel after every transition that changes
/// observable state. Presentation layers derive their render model and
/// statistics from `snapshot` and `totals` on each update; `last_error`
/// carries a surfaced, non-fatal failure (the previous valid snapshot is
/// always retained alongside it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlUpdate {
    /// Where the lifecycle currently stands.
    pub run_state: RunState,
    /// The authoritative snapshot being displayed, if any.
    pub snapshot: Option<Snapshot>,
    /// Totals captured when the displayed run was created.
    pub totals: Option<RememberedTotals>,
    /// The error surfaced by the most recent transition, if it failed.
    pub last_error: Option<ControlError>,
}

impl ControlUpdate {
    /// The value observers see before any command has been processed.
    pub(crate) const fn initial() -> Self {
        Self {
            run_state: RunState::Uninitialized,
            snapshot: None,
            totals: None,
            last_error: None,
        }
    }
}
