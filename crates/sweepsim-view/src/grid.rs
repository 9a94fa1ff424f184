//! The renderable cell matrix built from a snapshot.
//!
//! Maps the wire grid plus the robot list into per-cell presentation
//! data, independent of any UI toolkit. The robot list is the authority
//! for occupancy: a robot standing on a cell always wins the class and
//! label decision, and the underlying tile tag is never shown beneath
//! it.

use std::collections::HashMap;

use sweepsim_types::{CellTag, Robot, Snapshot};

// ---------------------------------------------------------------------------
// Cell model
// ---------------------------------------------------------------------------

/// Background class of a rendered cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellClass {
    /// Nothing to show.
    Empty,
    /// An uncollected trash item.
    Trash,
    /// The collection base.
    Base,
    /// A robot with empty hands.
    Robot,
    /// A robot carrying a trash item.
    RobotCarrying,
}

impl CellClass {
    /// Stable string key for style lookup.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Trash => "trash",
            Self::Base => "base",
            Self::Robot => "robot",
            Self::RobotCarrying => "robot-carrying",
        }
    }
}

/// One renderable cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    /// Background class.
    pub class: CellClass,
    /// Short text label, if the cell shows one.
    pub label: Option<&'static str>,
    /// Whether to decorate the cell with a carrying marker.
    pub carrying: bool,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Build the renderable matrix for `snapshot`.
///
/// Robot coordinates follow the service convention: `x` is the row
/// index, `y` the column. If two robots report the same coordinate --
/// tolerated degenerate data, not an error -- the first in list order
/// wins the cell.
pub fn grid_view(snapshot: &Snapshot) -> Vec<Vec<CellView>> {
    let mut occupants: HashMap<(usize, usize), &Robot> = HashMap::new();
    for robot in &snapshot.robots {
        let key = (robot.x as usize, robot.y as usize);
        occupants.entry(key).or_insert(robot);
    }

    snapshot
        .grid
        .iter()
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(col, tag)| cell_view(*tag, occupants.get(&(row, col)).copied()))
                .collect()
        })
        .collect()
}

/// Resolve one cell, giving the occupying robot precedence over the tag.
fn cell_view(tag: CellTag, robot: Option<&Robot>) -> CellView {
    match robot {
        Some(robot) if robot.carrying_trash => CellView {
            class: CellClass::RobotCarrying,
            label: Some("R"),
            carrying: true,
        },
        Some(_) => CellView {
            class: CellClass::Robot,
            label: Some("R"),
            carrying: false,
        },
        None => unoccupied_cell(tag),
    }
}

/// Resolve a cell no robot stands on.
const fn unoccupied_cell(tag: CellTag) -> CellView {
    let (class, label) = match tag {
        CellTag::Empty => (CellClass::Empty, None),
        CellTag::Trash => (CellClass::Trash, Some("T")),
        CellTag::Base => (CellClass::Base, Some("B")),
        // A robot tag with no matching robots entry: keep the label but
        // no robot background, matching the service's stale-tag quirk.
        CellTag::Robot | CellTag::RobotWithTrash => (CellClass::Empty, Some("R")),
    };
    CellView {
        class,
        label,
        carrying: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn robot(id: u32, x: u32, y: u32, carrying_trash: bool) -> Robot {
        Robot {
            id,
            x,
            y,
            carrying_trash,
        }
    }

    fn cell(view: &[Vec<CellView>], row: usize, col: usize) -> CellView {
        view.get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(CellView {
                class: CellClass::Empty,
                label: Some("?"),
                carrying: false,
            })
    }

    #[test]
    fn plain_tags_map_to_classes_and_labels() {
        let snapshot = Snapshot {
            grid: vec![vec![CellTag::Empty, CellTag::Trash, CellTag::Base]],
            robots: Vec::new(),
            trash_remaining: 1,
            turns_elapsed: 0,
            is_finished: false,
        };
        let view = grid_view(&snapshot);

        assert_eq!(cell(&view, 0, 0).class, CellClass::Empty);
        assert_eq!(cell(&view, 0, 0).label, None);
        assert_eq!(cell(&view, 0, 1).class, CellClass::Trash);
        assert_eq!(cell(&view, 0, 1).label, Some("T"));
        assert_eq!(cell(&view, 0, 2).class, CellClass::Base);
        assert_eq!(cell(&view, 0, 2).label, Some("B"));
    }

    #[test]
    fn robot_wins_over_underlying_tag() {
        // The tag says trash, but a robot stands there: the robot's
        // presence decides both class and label.
        let snapshot = Snapshot {
            grid: vec![vec![CellTag::Trash]],
            robots: vec![robot(0, 0, 0, false)],
            trash_remaining: 1,
            turns_elapsed: 0,
            is_finished: false,
        };
        let view = grid_view(&snapshot);

        assert_eq!(cell(&view, 0, 0).class, CellClass::Robot);
        assert_eq!(cell(&view, 0, 0).label, Some("R"));
        assert!(!cell(&view, 0, 0).carrying);
    }

    #[test]
    fn carrying_robot_gets_distinct_class_and_marker() {
        let snapshot = Snapshot {
            grid: vec![vec![CellTag::RobotWithTrash]],
            robots: vec![robot(0, 0, 0, true)],
            trash_remaining: 1,
            turns_elapsed: 3,
            is_finished: false,
        };
        let view = grid_view(&snapshot);

        assert_eq!(cell(&view, 0, 0).class, CellClass::RobotCarrying);
        assert!(cell(&view, 0, 0).carrying);
    }

    #[test]
    fn first_robot_in_list_order_wins_shared_coordinate() {
        let snapshot = Snapshot {
            grid: vec![vec![CellTag::Robot]],
            robots: vec![robot(7, 0, 0, true), robot(8, 0, 0, false)],
            trash_remaining: 0,
            turns_elapsed: 1,
            is_finished: false,
        };
        let view = grid_view(&snapshot);

        // Robot 7 carries, robot 8 does not; robot 7 is first.
        assert_eq!(cell(&view, 0, 0).class, CellClass::RobotCarrying);
    }

    #[test]
    fn robot_coordinates_are_row_then_column() {
        let snapshot = Snapshot {
            grid: vec![
                vec![CellTag::Empty, CellTag::Empty],
                vec![CellTag::Empty, CellTag::Robot],
            ],
            robots: vec![robot(0, 1, 1, false)],
            trash_remaining: 0,
            turns_elapsed: 1,
            is_finished: false,
        };
        let view = grid_view(&snapshot);

        assert_eq!(cell(&view, 1, 1).class, CellClass::Robot);
        assert_eq!(cell(&view, 0, 1).class, CellClass::Empty);
    }

    #[test]
    fn robot_tag_without_robot_entry_keeps_label_only() {
        let snapshot = Snapshot {
            grid: vec![vec![CellTag::Robot]],
            robots: Vec::new(),
            trash_remaining: 0,
            turns_elapsed: 0,
            is_finished: false,
        };
        let view = grid_view(&snapshot);

        assert_eq!(cell(&view, 0, 0).class, CellClass::Empty);
        assert_eq!(cell(&view, 0, 0).label, Some("R"));
    }

    #[test]
    fn class_keys_are_stable() {
        assert_eq!(CellClass::Empty.key(), "empty");
        assert_eq!(CellClass::Trash.key(), "trash");
        assert_eq!(CellClass::Base.key(), "base");
        assert_eq!(CellClass::Robot.key(), "robot");
        assert_eq!(CellClass::RobotCarrying.key(), "robot-carrying");
    }
}
