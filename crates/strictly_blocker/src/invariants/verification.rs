//! Formal verification of invariants using Kani model checker.
//!
//! These harnesses prove that one move from any valid puzzle on a small
//! grid lands in another valid puzzle.

#[cfg(kani)]
mod proofs {
    use crate::{
        BlockerInvariants, Direction, InvariantSet, Puzzle, SentinelPermanence,
        TransitionInvariant,
    };

    /// Verify every move preserves the per-state invariants.
    #[kani::proof]
    #[kani::unwind(4)]
    fn verify_move_preserves_invariants() {
        let mut puzzle: Puzzle = kani::any();
        kani::assume(BlockerInvariants::check_all(&puzzle).is_ok());

        let direction: Direction = kani::any();
        puzzle.attempt_move(direction);

        assert!(
            BlockerInvariants::check_all(&puzzle).is_ok(),
            "Move broke a puzzle invariant"
        );
    }

    /// Verify removed obstacles stay removed.
    #[kani::proof]
    #[kani::unwind(4)]
    fn verify_sentinel_permanence() {
        let before: Puzzle = kani::any();
        kani::assume(BlockerInvariants::check_all(&before).is_ok());

        let mut after = before.clone();
        let direction: Direction = kani::any();
        after.attempt_move(direction);

        assert!(
            SentinelPermanence::holds(&before, &after),
            "Removed obstacle came back"
        );
    }

    /// Verify a rejected move changes nothing.
    #[kani::proof]
    #[kani::unwind(4)]
    fn verify_rejected_move_is_noop() {
        let before: Puzzle = kani::any();
        kani::assume(BlockerInvariants::check_all(&before).is_ok());

        let mut after = before.clone();
        let direction: Direction = kani::any();
        let outcome = after.attempt_move(direction);

        if !outcome.changed() {
            assert!(before == after, "Rejected move mutated the puzzle");
        }
    }
}
