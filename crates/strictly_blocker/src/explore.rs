//! Exhaustive reachability checking.
//!
//! Starting from one puzzle, every state reachable under any sequence of
//! button presses is visited once. The move contract is checked on every
//! transition, so a clean report means no input sequence of any length can
//! break an invariant.

use super::action::MoveOutcome;
use super::contracts::{Contract, MoveContract};
use super::types::Direction;
use super::Puzzle;
use derive_getters::Getters;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use tracing::{debug, info, instrument, warn};

/// Default cap on the number of distinct states visited.
pub const DEFAULT_MAX_STATES: usize = 1_000_000;

/// A transition that broke the move contract.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct Counterexample {
    /// Move script from the start state that triggers the violation.
    path: String,
    /// What the contract reported.
    description: String,
}

/// Summary of an exploration run.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct Exploration {
    /// Distinct states visited, including the start.
    states: usize,
    /// Moves resolved (four per visited state).
    transitions: usize,
    /// Moves that were rejected.
    rejected: usize,
    /// Moves that pushed an obstacle, onto the transporter or not.
    pushes: usize,
    /// Most obstacles removed from play in any single state.
    max_removed: usize,
    /// Shortest move script reaching a state with `max_removed` removals.
    deepest_path: String,
    /// False if the search stopped at the state cap.
    complete: bool,
    /// Contract violations found, with the script that reproduces each.
    violations: Vec<Counterexample>,
}

impl Exploration {
    /// Returns true if the search finished and found no violation.
    pub fn is_clean(&self) -> bool {
        self.complete && self.violations.is_empty()
    }
}

/// Explores every state reachable from `start`, up to `max_states`.
///
/// Breadth-first, so reported paths are as short as possible.
#[instrument(skip(start))]
pub fn explore(start: &Puzzle, max_states: usize) -> Exploration {
    // Discovered states, with how each was first reached.
    let mut seen: HashMap<Puzzle, usize> = HashMap::new();
    let mut parents: Vec<Option<(usize, Direction)>> = Vec::new();
    let mut queue: VecDeque<(usize, Puzzle)> = VecDeque::new();

    let mut report = Exploration {
        states: 0,
        transitions: 0,
        rejected: 0,
        pushes: 0,
        max_removed: start.obstacles().removed_count(),
        deepest_path: String::new(),
        complete: true,
        violations: Vec::new(),
    };

    if let Err(violation) = MoveContract::pre(start, &Direction::Stay) {
        warn!(%violation, "Start state is already invalid");
        report.violations.push(Counterexample {
            path: String::new(),
            description: violation.description,
        });
        return report;
    }

    seen.insert(start.clone(), 0);
    parents.push(None);
    queue.push_back((0, start.clone()));

    while let Some((index, state)) = queue.pop_front() {
        for direction in Direction::MOVES {
            let mut next = state.clone();
            let outcome = next.attempt_move(direction);
            report.transitions += 1;

            match outcome {
                MoveOutcome::Rejected(_) => report.rejected += 1,
                MoveOutcome::Pushed { .. } | MoveOutcome::Transported { .. } => report.pushes += 1,
                MoveOutcome::Idle | MoveOutcome::Stepped { .. } => {}
            }

            if let Err(violation) = MoveContract::post(&state, &next, &outcome) {
                let mut path = path_to(&parents, index);
                path.push(direction.to_char());
                warn!(%path, %violation, "Counterexample found");
                report.violations.push(Counterexample {
                    path,
                    description: violation.description,
                });
                continue;
            }

            if seen.contains_key(&next) {
                continue;
            }
            if seen.len() >= max_states {
                report.complete = false;
                continue;
            }

            let next_index = parents.len();
            parents.push(Some((index, direction)));
            let removed = next.obstacles().removed_count();
            if removed > report.max_removed {
                report.max_removed = removed;
                report.deepest_path = path_to(&parents, next_index);
                debug!(removed, path = %report.deepest_path, "New removal depth reached");
            }
            seen.insert(next.clone(), next_index);
            queue.push_back((next_index, next));
        }
    }

    report.states = seen.len();
    info!(
        states = report.states,
        transitions = report.transitions,
        violations = report.violations.len(),
        complete = report.complete,
        "Exploration finished"
    );
    report
}

/// Rebuilds the move script leading to state `index`.
fn path_to(parents: &[Option<(usize, Direction)>], mut index: usize) -> String {
    let mut moves = Vec::new();
    while let Some(Some((parent, direction))) = parents.get(index) {
        moves.push(direction.to_char());
        index = *parent;
    }
    moves.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coord, LevelConfig};

    #[test]
    fn test_empty_grid_visits_every_cell() {
        let puzzle = LevelConfig::new(3, 2, Coord::new(0, 0), vec![], Coord::new(2, 1))
            .build()
            .unwrap();
        let report = explore(&puzzle, DEFAULT_MAX_STATES);
        assert!(report.is_clean());
        assert_eq!(*report.states(), 6);
        assert_eq!(*report.transitions(), 24);
        assert_eq!(*report.pushes(), 0);
    }

    #[test]
    fn test_transporter_reached_with_shortest_path() {
        let puzzle = LevelConfig::new(4, 1, Coord::new(0, 0), vec![Coord::new(1, 0)], Coord::new(3, 0))
            .build()
            .unwrap();
        let report = explore(&puzzle, DEFAULT_MAX_STATES);
        assert!(report.is_clean());
        assert_eq!(*report.max_removed(), 1);
        assert_eq!(report.deepest_path(), "RR");
    }

    #[test]
    fn test_state_cap_marks_incomplete() {
        let puzzle = LevelConfig::default().build().unwrap();
        let report = explore(&puzzle, 10);
        assert!(!report.complete());
        assert!(!report.is_clean());
        assert_eq!(*report.states(), 10);
    }

    #[test]
    fn test_invalid_start_reported() {
        let mut puzzle = LevelConfig::default().build().unwrap();
        puzzle.set_player(Coord::new(1, 1));
        let report = explore(&puzzle, DEFAULT_MAX_STATES);
        assert_eq!(report.violations().len(), 1);
        assert_eq!(report.violations()[0].path(), "");
    }

    #[test]
    fn test_path_reconstruction() {
        let parents = vec![
            None,
            Some((0, Direction::Up)),
            Some((1, Direction::Left)),
        ];
        assert_eq!(path_to(&parents, 2), "UL");
        assert_eq!(path_to(&parents, 0), "");
    }
}
