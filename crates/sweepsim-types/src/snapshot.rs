//! The authoritative simulation state as reported by the remote service.
//!
//! A [`Snapshot`] is wholly owned by the control loop between the moment
//! the service returns it and the moment it is superseded by a newer one
//! (or cleared by a fresh create). Downstream components only read it --
//! they derive presentation data, they never mutate.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CellTag
// ---------------------------------------------------------------------------

/// Content tag of a single grid cell on the wire.
///
/// Serialized as the service's short string codes: `""`, `"T"`, `"B"`,
/// `"R"`, `"RT"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellTag {
    /// Nothing on this cell.
    #[serde(rename = "")]
    Empty,
    /// A trash item waiting to be collected.
    #[serde(rename = "T")]
    Trash,
    /// The collection base robots carry trash back to.
    #[serde(rename = "B")]
    Base,
    /// A robot with empty hands.
    #[serde(rename = "R")]
    Robot,
    /// A robot currently carrying a trash item.
    #[serde(rename = "RT")]
    RobotWithTrash,
}

// ---------------------------------------------------------------------------
// Robot
// ---------------------------------------------------------------------------

/// Position and cargo state of one robot.
///
/// Per the service's coordinate convention, `x` is the row index and `y`
/// the column index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Robot {
    /// Stable identifier assigned by the service.
    pub id: u32,
    /// Row index of the robot's cell.
    pub x: u32,
    /// Column index of the robot's cell.
    pub y: u32,
    /// Whether the robot is carrying a trash item.
    pub carrying_trash: bool,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// One authoritative report of full simulation state at a point in time.
///
/// Within one run, `trash_remaining` is monotonically non-increasing and
/// `turns_elapsed` monotonically non-decreasing across successive
/// snapshots -- the service owns those invariants, the client only
/// observes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Cell tags, outer vec is rows.
    pub grid: Vec<Vec<CellTag>>,
    /// All robots, in the service's stable order.
    pub robots: Vec<Robot>,
    /// Trash items not yet delivered to the base.
    pub trash_remaining: u32,
    /// Turns executed since the run was created.
    pub turns_elapsed: u64,
    /// True once every trash item has been delivered.
    pub is_finished: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn cell_tags_use_wire_codes() {
        let codes = [
            (CellTag::Empty, "\"\""),
            (CellTag::Trash, "\"T\""),
            (CellTag::Base, "\"B\""),
            (CellTag::Robot, "\"R\""),
            (CellTag::RobotWithTrash, "\"RT\""),
        ];
        for (tag, expected) in codes {
            let encoded = serde_json::to_string(&tag).unwrap_or_default();
            assert_eq!(encoded, expected);
            let decoded: Result<CellTag, _> = serde_json::from_str(expected);
            assert_eq!(decoded.ok(), Some(tag));
        }
    }

    #[test]
    fn unknown_cell_tag_is_rejected() {
        let decoded: Result<CellTag, _> = serde_json::from_str("\"X\"");
        assert!(decoded.is_err());
    }

    #[test]
    fn snapshot_decodes_service_payload() {
        let payload = serde_json::json!({
            "grid": [["", "T"], ["B", "RT"]],
            "robots": [
                {"id": 0, "x": 1, "y": 1, "carrying_trash": true}
            ],
            "trash_remaining": 3,
            "turns_elapsed": 12,
            "is_finished": false
        });

        let snapshot: Snapshot = serde_json::from_value(payload).unwrap();

        assert_eq!(
            snapshot.grid,
            vec![
                vec![CellTag::Empty, CellTag::Trash],
                vec![CellTag::Base, CellTag::RobotWithTrash],
            ]
        );
        assert_eq!(snapshot.robots.len(), 1);
        assert_eq!(
            snapshot.robots.first().copied(),
            Some(Robot {
                id: 0,
                x: 1,
                y: 1,
                carrying_trash: true
            })
        );
        assert_eq!(snapshot.trash_remaining, 3);
        assert_eq!(snapshot.turns_elapsed, 12);
        assert!(!snapshot.is_finished);
    }
}
