//! The simulation record returned by create and reset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Descriptor of a simulation run as stored by the service.
///
/// Returned by the create and reset operations. It echoes the submitted
/// configuration plus zeroed counters and bookkeeping timestamps; it does
/// not carry the grid, so a fresh [`crate::Snapshot`] must be fetched
/// separately after create/reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationDescriptor {
    /// Service-assigned identifier of this run.
    pub id: i64,
    /// Number of robots, echoed from the configuration.
    pub num_robots: u32,
    /// Number of trash items, echoed from the configuration.
    pub num_trash: u32,
    /// Side length of the square grid.
    pub grid_size: u32,
    /// Row coordinate of the base, echoed from the configuration.
    pub base_x: u32,
    /// Column coordinate of the base, echoed from the configuration.
    pub base_y: u32,
    /// Turns executed so far (zero for a fresh run).
    pub turns_elapsed: u64,
    /// Whether the service considers the run active.
    pub is_running: bool,
    /// Whether the run has finished.
    pub is_finished: bool,
    /// When the run was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_decodes_service_payload() {
        let payload = serde_json::json!({
            "id": 17,
            "num_robots": 4,
            "num_trash": 20,
            "grid_size": 32,
            "base_x": 0,
            "base_y": 0,
            "turns_elapsed": 0,
            "is_running": false,
            "is_finished": false,
            "created_at": "2025-03-01T09:30:00Z",
            "updated_at": "2025-03-01T09:30:00Z"
        });

        let descriptor: SimulationDescriptor =
            serde_json::from_value(payload).unwrap();
        assert_eq!(descriptor.id, 17);
        assert_eq!(descriptor.grid_size, 32);
        assert_eq!(descriptor.turns_elapsed, 0);
        assert!(!descriptor.is_finished);
    }
}
