//! Property tests: random levels, random button mashing.
//!
//! Invariants covered:
//! - Every per-state invariant holds after every move.
//! - Rejected and idle moves leave the puzzle untouched.
//! - A successful move changes the player by exactly one cell.
//! - At most one obstacle changes position per move.
//! - Removed obstacles stay removed.

use proptest::prelude::*;
use strictly_blocker::{
    BlockerInvariants, Contract, Coord, Direction, InvariantSet, LevelConfig, MoveContract,
    MoveOutcome, Puzzle, SentinelPermanence, TransitionInvariant,
};

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
        Just(Direction::Stay),
    ]
}

/// Valid levels on grids up to 6×6 with up to four obstacles.
fn level() -> impl Strategy<Value = Puzzle> {
    (1u32..=6, 1u32..=6)
        .prop_flat_map(|(w, h)| {
            let cell = (0..w as i32, 0..h as i32).prop_map(Coord::from);
            (
                Just((w, h)),
                cell.clone(),
                cell.clone(),
                prop::collection::vec(cell, 0..=4),
            )
        })
        .prop_filter_map("layout must be valid", |((w, h), player, transporter, obstacles)| {
            let mut unique = Vec::new();
            for at in obstacles {
                if at != player && at != transporter && !unique.contains(&at) {
                    unique.push(at);
                }
            }
            LevelConfig::new(w, h, player, unique, transporter).build().ok()
        })
}

fn changed_slots(before: &Puzzle, after: &Puzzle) -> usize {
    before
        .obstacles()
        .positions()
        .iter()
        .zip(after.obstacles().positions())
        .filter(|(old, new)| old != new)
        .count()
}

proptest! {
    #[test]
    fn invariants_hold_along_random_walks(
        start in level(),
        moves in prop::collection::vec(direction(), 0..64),
    ) {
        let mut puzzle = start;
        prop_assert!(BlockerInvariants::check_all(&puzzle).is_ok());

        for direction in moves {
            let before = puzzle.clone();
            let outcome = puzzle.attempt_move(direction);

            prop_assert!(BlockerInvariants::check_all(&puzzle).is_ok(), "after {}", outcome);
            prop_assert!(SentinelPermanence::holds(&before, &puzzle));
            prop_assert!(MoveContract::post(&before, &puzzle, &outcome).is_ok());
            prop_assert!(changed_slots(&before, &puzzle) <= 1);

            if outcome.changed() {
                let (px, py) = (puzzle.player().x, puzzle.player().y);
                let (bx, by) = (before.player().x, before.player().y);
                prop_assert_eq!((px - bx).abs() + (py - by).abs(), 1);
            } else {
                prop_assert_eq!(&puzzle, &before);
            }
        }
    }

    #[test]
    fn stay_never_changes_anything(start in level()) {
        let mut puzzle = start.clone();
        prop_assert_eq!(puzzle.attempt_move(Direction::Stay), MoveOutcome::Idle);
        prop_assert_eq!(puzzle, start);
    }

    #[test]
    fn removed_obstacles_are_never_found(
        start in level(),
        moves in prop::collection::vec(direction(), 0..64),
    ) {
        let mut puzzle = start;
        for direction in moves {
            puzzle.attempt_move(direction);
            for (id, at) in puzzle.obstacles().iter() {
                if at.is_sentinel() {
                    for cell in puzzle.grid().cells() {
                        prop_assert_ne!(puzzle.obstacle_at(cell), Some(id));
                    }
                } else {
                    prop_assert_eq!(puzzle.obstacle_at(at), Some(id));
                }
            }
        }
    }
}
