//! First-class invariants for the block-pushing puzzle.
//!
//! Invariants are logical properties that must hold in every reachable
//! state. They are checked after every move in debug builds, swept over
//! the whole state space by [`explore()`](crate::explore()), and proven for a
//! single step under Kani.

#[cfg(kani)]
mod verification;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// A property relating a state to its successor.
pub trait TransitionInvariant<S> {
    /// Checks if the property holds across `before -> after`.
    fn holds(before: &S, after: &S) -> bool;

    /// Human-readable description of the property.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{description}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of [`Invariant`]s.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns every violated invariant, not just the first.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

// Implement InvariantSet for 3-tuples
impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        collect(violations)
    }
}

// Implement InvariantSet for 2-tuples
impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        collect(violations)
    }
}

pub mod in_bounds;
pub mod no_overlap;
pub mod sentinel;

pub use in_bounds::InBoundsInvariant;
pub use no_overlap::{NoOverlapInvariant, TransporterClearInvariant};
pub use sentinel::SentinelPermanence;

/// All per-state puzzle invariants as a composable set.
pub type BlockerInvariants = (
    InBoundsInvariant,
    NoOverlapInvariant,
    TransporterClearInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coord, Direction, LevelConfig};

    #[test]
    fn test_invariant_set_holds_for_classic_level() {
        let puzzle = LevelConfig::default().build().unwrap();
        assert!(BlockerInvariants::check_all(&puzzle).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let mut puzzle = LevelConfig::default().build().unwrap();
        puzzle.apply_all([Direction::Left, Direction::Up, Direction::Up, Direction::Right]);
        assert!(BlockerInvariants::check_all(&puzzle).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut puzzle = LevelConfig::default().build().unwrap();
        // Stack both obstacles on the player, outside any move.
        let player = *puzzle.player();
        let ids: Vec<_> = puzzle.obstacles().iter().map(|(id, _)| id).collect();
        for id in ids {
            puzzle.obstacles_mut().set_obstacle_position(id, player.x, player.y);
        }
        puzzle.set_player(Coord::new(-3, 0));

        let violations = BlockerInvariants::check_all(&puzzle).unwrap_err();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].description, InBoundsInvariant::description());
        assert_eq!(violations[1].description, NoOverlapInvariant::description());
    }

    #[test]
    fn test_two_invariants_as_set() {
        let puzzle = LevelConfig::default().build().unwrap();

        type TwoInvariants = (InBoundsInvariant, NoOverlapInvariant);
        assert!(TwoInvariants::check_all(&puzzle).is_ok());
    }
}
