//! Sentinel permanence: removal from play is final.

use super::super::Puzzle;
use super::TransitionInvariant;

/// Transition property: an obstacle on the sentinel before a move is still
/// on the sentinel afterwards.
///
/// Together with [`Coord::SENTINEL`](crate::Coord::SENTINEL) never matching
/// a lookup, this means a removed obstacle never interacts with anything
/// again.
pub struct SentinelPermanence;

impl TransitionInvariant<Puzzle> for SentinelPermanence {
    fn holds(before: &Puzzle, after: &Puzzle) -> bool {
        before.obstacles().len() == after.obstacles().len()
            && before
                .obstacles()
                .iter()
                .filter(|(_, at)| at.is_sentinel())
                .all(|(id, _)| after.obstacles().is_removed(id))
    }

    fn description() -> &'static str {
        "Removed obstacles stay removed"
    }
}
