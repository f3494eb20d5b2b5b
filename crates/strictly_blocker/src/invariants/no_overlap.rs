//! Occupancy invariants: one thing per cell.

use super::super::Puzzle;
use super::Invariant;
use std::collections::HashSet;

/// Invariant: no two active obstacles share a cell, and the player never
/// stands on an active obstacle.
pub struct NoOverlapInvariant;

impl Invariant<Puzzle> for NoOverlapInvariant {
    fn holds(puzzle: &Puzzle) -> bool {
        let mut seen = HashSet::with_capacity(puzzle.obstacles().len() + 1);
        seen.insert(*puzzle.player());
        puzzle.obstacles().active().all(|(_, at)| seen.insert(at))
    }

    fn description() -> &'static str {
        "No two active obstacles or the player share a cell"
    }
}

/// Invariant: no active obstacle rests on the transporter tile.
///
/// Anything pushed onto the transporter leaves play in the same move.
pub struct TransporterClearInvariant;

impl Invariant<Puzzle> for TransporterClearInvariant {
    fn holds(puzzle: &Puzzle) -> bool {
        puzzle.obstacle_at(*puzzle.transporter()).is_none()
    }

    fn description() -> &'static str {
        "No active obstacle rests on the transporter"
    }
}
