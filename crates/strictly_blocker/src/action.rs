//! First-class move outcomes.
//!
//! Resolving a move never fails. Instead it reports what happened as a
//! domain event that can be logged, asserted on, or shown to the player.

use super::registry::ObstacleId;
use super::types::{Coord, Direction};
use serde::Serialize;

/// Why a move left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
pub enum Rejection {
    /// The player would leave the grid.
    #[display("player would leave the grid at {}", _0)]
    OutOfBounds(Coord),

    /// The pushed obstacle would leave the grid.
    #[display("{} would be pushed off the grid", obstacle)]
    PushOutOfBounds {
        /// Obstacle the player walked into.
        obstacle: ObstacleId,
    },

    /// Another obstacle sits where the pushed one would land.
    #[display("{} is blocked by {}", obstacle, blocker)]
    PushBlocked {
        /// Obstacle the player walked into.
        obstacle: ObstacleId,
        /// Obstacle already occupying the landing cell.
        blocker: ObstacleId,
    },
}

/// What a call to [`Puzzle::attempt_move`](crate::Puzzle::attempt_move) did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
pub enum MoveOutcome {
    /// No direction was pressed.
    #[display("idle")]
    Idle,

    /// The player walked into an empty cell.
    #[display("stepped {} to {}", direction, to)]
    Stepped {
        /// Direction of travel.
        direction: Direction,
        /// New player position.
        to: Coord,
    },

    /// The player pushed an obstacle one cell along.
    #[display("pushed {} {} to {}", obstacle, direction, obstacle_to)]
    Pushed {
        /// Direction of travel.
        direction: Direction,
        /// New player position (the obstacle's old cell).
        to: Coord,
        /// Obstacle that moved.
        obstacle: ObstacleId,
        /// Where the obstacle landed.
        obstacle_to: Coord,
    },

    /// The player pushed an obstacle onto the transporter tile.
    #[display("pushed {} {} onto the transporter", obstacle, direction)]
    Transported {
        /// Direction of travel.
        direction: Direction,
        /// New player position (the obstacle's old cell).
        to: Coord,
        /// Obstacle that left play.
        obstacle: ObstacleId,
    },

    /// Nothing moved.
    #[display("rejected: {}", _0)]
    Rejected(Rejection),
}

impl MoveOutcome {
    /// Returns true if the move mutated the puzzle.
    pub fn changed(&self) -> bool {
        !matches!(self, MoveOutcome::Idle | MoveOutcome::Rejected(_))
    }

    /// Returns the obstacle displaced by this move, if any.
    pub fn displaced(&self) -> Option<ObstacleId> {
        match self {
            MoveOutcome::Pushed { obstacle, .. } | MoveOutcome::Transported { obstacle, .. } => {
                Some(*obstacle)
            }
            _ => None,
        }
    }

    /// Returns the rejection reason, if the move was rejected.
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            MoveOutcome::Rejected(reason) => Some(*reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LevelConfig;

    #[test]
    fn test_changed_and_displaced() {
        let mut puzzle = LevelConfig::default().build().unwrap();
        let outcomes = puzzle.apply_all([Direction::Left, Direction::Up, Direction::Up]);

        assert!(outcomes[0].changed());
        assert_eq!(outcomes[0].displaced(), None);

        assert!(outcomes[1].changed());
        assert_eq!(outcomes[1].displaced(), puzzle.obstacles().id(0));

        assert!(!outcomes[2].changed());
        assert!(matches!(
            outcomes[2].rejection(),
            Some(Rejection::PushOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_display() {
        let outcome = MoveOutcome::Stepped {
            direction: Direction::Left,
            to: Coord::new(1, 2),
        };
        assert_eq!(outcome.to_string(), "stepped Left to (1, 2)");
        assert_eq!(
            MoveOutcome::Rejected(Rejection::OutOfBounds(Coord::new(-1, 0))).to_string(),
            "rejected: player would leave the grid at (-1, 0)"
        );
    }

    #[test]
    fn test_serializes_for_logs() {
        let outcome = MoveOutcome::Stepped {
            direction: Direction::Up,
            to: Coord::new(0, 0),
        };
        let json = serde_json::to_value(outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "Stepped": { "direction": "Up", "to": { "x": 0, "y": 0 } } })
        );
    }
}
