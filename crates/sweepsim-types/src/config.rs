//! Simulation configuration submitted to the remote service.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SimulationConfig
// ---------------------------------------------------------------------------

/// Parameters for a new simulation run.
///
/// Immutable once submitted. The control loop remembers the most recently
/// submitted configuration solely so that a reset can recreate the same
/// run. Field names are the service's wire contract.
///
/// The service enforces its own acceptable ranges (robots 1-20, trash
/// 1-400, base coordinates 0-31); this client does not duplicate that
/// validation and surfaces rejections as errors instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of cleaning robots to spawn.
    pub num_robots: u32,
    /// Number of trash items scattered on the grid.
    pub num_trash: u32,
    /// Row coordinate of the collection base.
    pub base_x: u32,
    /// Column coordinate of the collection base.
    pub base_y: u32,
}

impl Default for SimulationConfig {
    /// The defaults offered by the configuration form: 4 robots chasing
    /// 20 trash items, base in the top-left corner.
    fn default() -> Self {
        Self {
            num_robots: 4,
            num_trash: 20,
            base_x: 0,
            base_y: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// RememberedTotals
// ---------------------------------------------------------------------------

/// Totals captured when a simulation is created.
///
/// Snapshots only report trash *remaining*, so the initial count must be
/// remembered to derive collected-so-far. Captured once per run and never
/// updated until the next create/reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RememberedTotals {
    /// Trash item count at turn zero.
    pub initial_trash_count: u32,
}

impl RememberedTotals {
    /// Capture the totals for a run started with `config`.
    pub const fn for_config(config: &SimulationConfig) -> Self {
        Self {
            initial_trash_count: config.num_trash,
        }
    }
}
