//! Bounds invariant: everything in play stays on the grid.

use super::super::Puzzle;
use super::Invariant;

/// Invariant: the player and every active obstacle lie inside the grid.
///
/// Removed obstacles sit on the sentinel, which is the only off-grid
/// position allowed.
pub struct InBoundsInvariant;

impl Invariant<Puzzle> for InBoundsInvariant {
    fn holds(puzzle: &Puzzle) -> bool {
        let grid = puzzle.grid();
        grid.contains(*puzzle.player())
            && puzzle
                .obstacles()
                .iter()
                .all(|(_, at)| at.is_sentinel() || grid.contains(at))
    }

    fn description() -> &'static str {
        "Player and active obstacles stay within the grid"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coord, LevelConfig};

    #[test]
    fn test_classic_level_holds() {
        let puzzle = LevelConfig::default().build().unwrap();
        assert!(InBoundsInvariant::holds(&puzzle));
    }

    #[test]
    fn test_removed_obstacle_is_allowed() {
        let mut puzzle = LevelConfig::default().build().unwrap();
        let id = puzzle.obstacles().id(0).unwrap();
        puzzle.obstacles_mut().remove_from_play(id);
        assert!(InBoundsInvariant::holds(&puzzle));
    }

    #[test]
    fn test_off_grid_obstacle_violates() {
        let mut puzzle = LevelConfig::default().build().unwrap();
        let id = puzzle.obstacles().id(1).unwrap();
        puzzle.obstacles_mut().set_obstacle_position(id, 8, 0);
        assert!(!InBoundsInvariant::holds(&puzzle));
    }

    #[test]
    fn test_off_grid_player_violates() {
        let mut puzzle = LevelConfig::default().build().unwrap();
        puzzle.set_player(Coord::new(0, 8));
        assert!(!InBoundsInvariant::holds(&puzzle));
    }
}
