//! Move resolution: walking, pushing, and the transporter.

use super::action::{MoveOutcome, Rejection};
use super::puzzle::Puzzle;
use super::registry::ObstacleId;
use super::types::{Coord, Direction};
use tracing::{debug, instrument, trace};

/// A fully validated transition, ready to be written back.
enum Commit {
    Step(Coord),
    Push {
        player: Coord,
        obstacle: ObstacleId,
        to: Coord,
    },
    Transport {
        player: Coord,
        obstacle: ObstacleId,
    },
}

impl Puzzle {
    /// Resolves one input event against the puzzle.
    ///
    /// Every call either commits a complete transition or leaves the state
    /// exactly as it was. A push writes the player and the obstacle in the
    /// same call, so no caller can observe one without the other.
    ///
    /// In debug builds the [`MoveContract`](crate::MoveContract)
    /// postcondition is asserted after every move.
    #[instrument(skip(self), fields(player = %self.player()))]
    pub fn attempt_move(&mut self, direction: Direction) -> MoveOutcome {
        #[cfg(debug_assertions)]
        let before = self.clone();

        let outcome = match self.plan(direction) {
            Ok(Some(commit)) => self.commit(direction, commit),
            Ok(None) => MoveOutcome::Idle,
            Err(reason) => {
                trace!(%reason, "Move rejected");
                MoveOutcome::Rejected(reason)
            }
        };

        #[cfg(debug_assertions)]
        {
            use super::contracts::{Contract, MoveContract};
            if let Err(violation) = MoveContract::post(&before, self, &outcome) {
                panic!("{violation}");
            }
        }

        outcome
    }

    /// Applies [`Puzzle::attempt_move`] for each direction in turn.
    #[instrument(skip(self, directions))]
    pub fn apply_all(&mut self, directions: impl IntoIterator<Item = Direction>) -> Vec<MoveOutcome> {
        directions
            .into_iter()
            .map(|direction| self.attempt_move(direction))
            .collect()
    }

    /// Decides what `direction` would do without touching any state.
    ///
    /// `Ok(None)` means there is nothing to do.
    fn plan(&self, direction: Direction) -> Result<Option<Commit>, Rejection> {
        if direction == Direction::Stay {
            return Ok(None);
        }

        let next = self.player().step(direction);
        if !self.grid().contains(next) {
            return Err(Rejection::OutOfBounds(next));
        }

        let Some(obstacle) = self.obstacles().find_at(next) else {
            return Ok(Some(Commit::Step(next)));
        };

        // The obstacle sits on `next`, so its landing cell is one more step.
        let landing = next.step(direction);
        if !self.grid().contains(landing) {
            return Err(Rejection::PushOutOfBounds { obstacle });
        }
        if let Some(blocker) = self.obstacles().find_at(landing) {
            return Err(Rejection::PushBlocked { obstacle, blocker });
        }

        if landing == *self.transporter() {
            Ok(Some(Commit::Transport {
                player: next,
                obstacle,
            }))
        } else {
            Ok(Some(Commit::Push {
                player: next,
                obstacle,
                to: landing,
            }))
        }
    }

    /// Writes a planned transition back.
    fn commit(&mut self, direction: Direction, commit: Commit) -> MoveOutcome {
        match commit {
            Commit::Step(to) => {
                self.set_player(to);
                debug!(%to, "Player stepped");
                MoveOutcome::Stepped { direction, to }
            }
            Commit::Push {
                player,
                obstacle,
                to,
            } => {
                self.obstacles_mut().set_obstacle_position(obstacle, to.x, to.y);
                self.set_player(player);
                debug!(%obstacle, %to, player = %player, "Obstacle pushed");
                MoveOutcome::Pushed {
                    direction,
                    to: player,
                    obstacle,
                    obstacle_to: to,
                }
            }
            Commit::Transport { player, obstacle } => {
                self.obstacles_mut().remove_from_play(obstacle);
                self.set_player(player);
                debug!(%obstacle, player = %player, "Obstacle transported off the board");
                MoveOutcome::Transported {
                    direction,
                    to: player,
                    obstacle,
                }
            }
        }
    }
}
