//! Contract-based validation for move resolution.
//!
//! Contracts define correctness through preconditions and postconditions,
//! in the Hoare style `{P} action {Q}`. The move resolver asserts the
//! postcondition after every move in debug builds.

use super::action::MoveOutcome;
use super::invariants::{BlockerInvariants, InvariantSet, SentinelPermanence, TransitionInvariant};
use super::types::{Coord, Direction};
use super::Puzzle;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A, O> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), ContractViolation>;

    /// Checks postconditions after applying the action.
    ///
    /// `outcome` is what the transition reported about itself.
    fn post(before: &S, after: &S, outcome: &O) -> Result<(), ContractViolation>;
}

/// A broken pre- or postcondition.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Contract violation: {description}")]
pub struct ContractViolation {
    /// What went wrong.
    pub description: String,
}

impl ContractViolation {
    /// Creates a new contract violation.
    pub fn new(description: impl Into<String>) -> Self {
        let description = description.into();
        warn!(%description, "Contract violated");
        Self { description }
    }
}

impl std::error::Error for ContractViolation {}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for [`Puzzle::attempt_move`].
///
/// Preconditions:
/// - The puzzle satisfies every per-state invariant
///
/// Postconditions:
/// - The puzzle still satisfies every per-state invariant
/// - Removed obstacles stay removed
/// - Grid, transporter, and slot count never change
/// - Idle and rejected moves leave the state untouched
/// - A step moves only the player, by one cell
/// - A push moves the player and exactly one obstacle, each by one cell
pub struct MoveContract;

impl Contract<Puzzle, Direction, MoveOutcome> for MoveContract {
    fn pre(puzzle: &Puzzle, _direction: &Direction) -> Result<(), ContractViolation> {
        BlockerInvariants::check_all(puzzle).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            ContractViolation::new(format!("Precondition failed: {}", descriptions))
        })
    }

    #[instrument(skip(before, after))]
    fn post(before: &Puzzle, after: &Puzzle, outcome: &MoveOutcome) -> Result<(), ContractViolation> {
        BlockerInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            ContractViolation::new(format!("Postcondition failed: {}", descriptions))
        })?;

        if !SentinelPermanence::holds(before, after) {
            return Err(ContractViolation::new(SentinelPermanence::description()));
        }

        if before.grid() != after.grid() || before.transporter() != after.transporter() {
            return Err(ContractViolation::new("Level layout changed during a move"));
        }

        match *outcome {
            MoveOutcome::Idle | MoveOutcome::Rejected(_) => {
                if before != after {
                    return Err(ContractViolation::new(format!(
                        "State changed although the move reported {outcome}"
                    )));
                }
            }
            MoveOutcome::Stepped { direction, to } => {
                expect_player(before, after, direction, to)?;
                if before.obstacles() != after.obstacles() {
                    return Err(ContractViolation::new("A step moved an obstacle"));
                }
            }
            MoveOutcome::Pushed {
                direction,
                to,
                obstacle,
                obstacle_to,
            } => {
                expect_player(before, after, direction, to)?;
                if obstacle_to != to.step(direction) {
                    return Err(ContractViolation::new(format!(
                        "{obstacle} landed on {obstacle_to}, not one cell past {to}"
                    )));
                }
                expect_single_displacement(before, after, obstacle.index(), to, obstacle_to)?;
            }
            MoveOutcome::Transported {
                direction,
                to,
                obstacle,
            } => {
                expect_player(before, after, direction, to)?;
                if to.step(direction) != *before.transporter() {
                    return Err(ContractViolation::new(format!(
                        "{obstacle} was transported without reaching the transporter"
                    )));
                }
                expect_single_displacement(before, after, obstacle.index(), to, Coord::SENTINEL)?;
            }
        }

        Ok(())
    }
}

/// The player moved exactly one cell in `direction` and ended on `to`.
fn expect_player(
    before: &Puzzle,
    after: &Puzzle,
    direction: Direction,
    to: Coord,
) -> Result<(), ContractViolation> {
    let expected = before.player().step(direction);
    if to != expected || *after.player() != expected {
        return Err(ContractViolation::new(format!(
            "Player went {} -> {}, expected {}",
            before.player(),
            after.player(),
            expected
        )));
    }
    Ok(())
}

/// Exactly one obstacle slot changed, from `from` to `to`.
fn expect_single_displacement(
    before: &Puzzle,
    after: &Puzzle,
    slot: usize,
    from: Coord,
    to: Coord,
) -> Result<(), ContractViolation> {
    let changed: Vec<usize> = before
        .obstacles()
        .positions()
        .iter()
        .zip(after.obstacles().positions())
        .enumerate()
        .filter(|(_, (old, new))| old != new)
        .map(|(index, _)| index)
        .collect();

    if changed != [slot] {
        return Err(ContractViolation::new(format!(
            "Push changed obstacle slots {changed:?}, expected only {slot}"
        )));
    }

    let old = before.obstacles().positions().get(slot).copied();
    let new = after.obstacles().positions().get(slot).copied();
    if old != Some(from) || new != Some(to) {
        return Err(ContractViolation::new(format!(
            "Pushed obstacle went {old:?} -> {new:?}, expected {from} -> {to}"
        )));
    }
    Ok(())
}

/// Asserts that all puzzle invariants hold (panic on violation in debug builds).
#[instrument(skip(puzzle))]
pub fn assert_invariants(puzzle: &Puzzle) {
    debug_assert!(
        BlockerInvariants::check_all(puzzle).is_ok(),
        "Puzzle invariants violated"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LevelConfig, Rejection};

    fn classic() -> Puzzle {
        LevelConfig::default().build().unwrap()
    }

    #[test]
    fn test_precondition_holds_for_built_level() {
        assert!(MoveContract::pre(&classic(), &Direction::Up).is_ok());
    }

    #[test]
    fn test_precondition_detects_corruption() {
        let mut puzzle = classic();
        puzzle.set_player(Coord::new(1, 1));
        assert!(MoveContract::pre(&puzzle, &Direction::Up).is_err());
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = classic();
        let mut after = before.clone();
        let outcome = after.attempt_move(Direction::Left);
        assert!(MoveContract::post(&before, &after, &outcome).is_ok());
    }

    #[test]
    fn test_postcondition_detects_silent_change() {
        let before = classic();
        let mut after = before.clone();
        after.set_player(Coord::new(3, 2));
        let outcome = MoveOutcome::Rejected(Rejection::OutOfBounds(Coord::new(3, -1)));
        assert!(MoveContract::post(&before, &after, &outcome).is_err());
    }

    #[test]
    fn test_postcondition_detects_partial_push() {
        // Player below the obstacle at (1, 1) pushes up, but the obstacle stays put.
        let mut start = classic();
        start.set_player(Coord::new(1, 2));
        let mut half = start.clone();
        half.set_player(Coord::new(1, 1));
        let obstacle = start.obstacles().id(0).unwrap();
        let outcome = MoveOutcome::Pushed {
            direction: Direction::Up,
            to: Coord::new(1, 1),
            obstacle,
            obstacle_to: Coord::new(1, 0),
        };
        assert!(MoveContract::post(&start, &half, &outcome).is_err());
    }

    #[test]
    fn test_postcondition_detects_teleporting_step() {
        let before = classic();
        let mut after = before.clone();
        after.set_player(Coord::new(4, 2));
        let outcome = MoveOutcome::Stepped {
            direction: Direction::Right,
            to: Coord::new(4, 2),
        };
        assert!(MoveContract::post(&before, &after, &outcome).is_err());
    }
}
