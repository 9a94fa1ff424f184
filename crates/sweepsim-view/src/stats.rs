//! Collection statistics derived from a snapshot.

use sweepsim_types::{RememberedTotals, Snapshot};

/// Display metrics for the current snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectionStats {
    /// Trash items delivered to the base so far.
    pub collected: u32,
    /// Share of the initial trash collected, rounded to the nearest
    /// whole percent (0-100).
    pub percent_collected: u8,
    /// Robots currently carrying a trash item.
    pub robots_carrying: usize,
    /// Items collected per turn, rounded to two decimal places.
    pub throughput: f64,
}

/// Derive the display metrics for `snapshot`.
///
/// Snapshots only report trash *remaining*, so collected-so-far is
/// reconstructed from the totals captured at create time, clamped at
/// zero in case the service ever reports more remaining than the run
/// started with. `percent_collected` is 0 when the run started with no
/// trash; `throughput` is 0 before the first turn.
pub fn collection_stats(snapshot: &Snapshot, totals: RememberedTotals) -> CollectionStats {
    let initial = totals.initial_trash_count;
    let collected = initial.saturating_sub(snapshot.trash_remaining);

    let percent_collected = if initial == 0 {
        0
    } else {
        let ratio = f64::from(collected) / f64::from(initial);
        (ratio * 100.0).round() as u8
    };

    let robots_carrying = snapshot
        .robots
        .iter()
        .filter(|robot| robot.carrying_trash)
        .count();

    let throughput = if snapshot.turns_elapsed > 0 {
        round_to_hundredths(f64::from(collected) / snapshot.turns_elapsed as f64)
    } else {
        0.0
    };

    CollectionStats {
        collected,
        percent_collected,
        robots_carrying,
        throughput,
    }
}

/// Round to two decimal places for display.
fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweepsim_types::{CellTag, Robot};

    fn snapshot(trash_remaining: u32, turns_elapsed: u64, carrying: &[bool]) -> Snapshot {
        let robots = carrying
            .iter()
            .enumerate()
            .map(|(i, carrying_trash)| Robot {
                id: i as u32,
                x: 0,
                y: i as u32,
                carrying_trash: *carrying_trash,
            })
            .collect();
        Snapshot {
            grid: vec![vec![CellTag::Base]],
            robots,
            trash_remaining,
            turns_elapsed,
            is_finished: false,
        }
    }

    const fn totals(initial: u32) -> RememberedTotals {
        RememberedTotals {
            initial_trash_count: initial,
        }
    }

    #[test]
    fn collected_is_initial_minus_remaining() {
        let stats = collection_stats(&snapshot(12, 5, &[]), totals(20));
        assert_eq!(stats.collected, 8);
        assert_eq!(stats.percent_collected, 40);
    }

    #[test]
    fn collected_clamps_at_zero() {
        // A degenerate service report of more remaining than we started
        // with must not underflow.
        let stats = collection_stats(&snapshot(25, 5, &[]), totals(20));
        assert_eq!(stats.collected, 0);
        assert_eq!(stats.percent_collected, 0);
    }

    #[test]
    fn full_completion_reports_exactly_one_hundred_percent() {
        let stats = collection_stats(&snapshot(0, 9, &[]), totals(1));
        assert_eq!(stats.percent_collected, 100);
    }

    #[test]
    fn zero_initial_trash_reports_zero_percent() {
        let stats = collection_stats(&snapshot(0, 3, &[]), totals(0));
        assert_eq!(stats.percent_collected, 0);
    }

    #[test]
    fn percent_rounds_to_nearest() {
        // 1 of 3 collected: 33.33...% rounds down to 33.
        let stats = collection_stats(&snapshot(2, 1, &[]), totals(3));
        assert_eq!(stats.percent_collected, 33);
        // 2 of 3 collected: 66.66...% rounds up to 67.
        let stats = collection_stats(&snapshot(1, 1, &[]), totals(3));
        assert_eq!(stats.percent_collected, 67);
    }

    #[test]
    fn throughput_is_zero_before_first_turn() {
        let stats = collection_stats(&snapshot(20, 0, &[]), totals(20));
        assert!(stats.throughput.abs() < f64::EPSILON);
    }

    #[test]
    fn throughput_rounds_to_two_decimals() {
        // 1 collected over 3 turns: 0.333... rounds to 0.33.
        let stats = collection_stats(&snapshot(2, 3, &[]), totals(3));
        assert!((stats.throughput - 0.33).abs() < f64::EPSILON);
    }

    #[test]
    fn carrying_robots_are_counted() {
        let stats = collection_stats(&snapshot(5, 2, &[true, false, true]), totals(10));
        assert_eq!(stats.robots_carrying, 2);
    }

    #[test]
    fn derivation_is_idempotent() {
        let snap = snapshot(7, 4, &[true]);
        let first = collection_stats(&snap, totals(20));
        let second = collection_stats(&snap, totals(20));
        assert_eq!(first, second);
    }
}
