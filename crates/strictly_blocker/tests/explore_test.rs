//! Exhaustive reachability checks over small levels.

use strictly_blocker::{explore, Coord, LevelConfig, DEFAULT_MAX_STATES};

#[test]
fn test_small_level_is_clean() {
    let puzzle = LevelConfig::new(
        5,
        5,
        Coord::new(0, 0),
        vec![Coord::new(1, 1), Coord::new(2, 2), Coord::new(3, 1)],
        Coord::new(4, 4),
    )
    .build()
    .expect("valid level");

    let report = explore(&puzzle, DEFAULT_MAX_STATES);

    assert!(report.is_clean(), "violations: {:?}", report.violations());
    assert!(*report.states() > 25);
    assert!(*report.rejected() > 0);
    assert!(*report.pushes() > 0);
    assert!(*report.max_removed() >= 1);
}

#[test]
fn test_deepest_path_replays_to_removal() {
    let puzzle = LevelConfig::new(
        4,
        4,
        Coord::new(0, 0),
        vec![Coord::new(1, 1), Coord::new(2, 1)],
        Coord::new(3, 3),
    )
    .build()
    .expect("valid level");

    let report = explore(&puzzle, DEFAULT_MAX_STATES);
    assert!(report.is_clean());

    let mut replay = puzzle.clone();
    let moves = strictly_blocker::parse_script(report.deepest_path()).expect("explorer emits valid scripts");
    replay.apply_all(moves);
    assert_eq!(replay.obstacles().removed_count(), *report.max_removed());
}

#[test]
fn test_obstacle_in_corner_can_never_be_removed() {
    // An obstacle in a corner can only be pushed out of bounds.
    let puzzle = LevelConfig::new(
        4,
        4,
        Coord::new(1, 1),
        vec![Coord::new(0, 0)],
        Coord::new(2, 2),
    )
    .build()
    .expect("valid level");

    let report = explore(&puzzle, DEFAULT_MAX_STATES);
    assert!(report.is_clean());
    assert_eq!(*report.max_removed(), 0);
    assert_eq!(report.deepest_path(), "");
    assert_eq!(*report.pushes(), 0);
    assert_eq!(*report.states(), 15);
}

#[test]
fn test_classic_level_is_clean() {
    let puzzle = LevelConfig::default().build().expect("classic level is valid");
    let report = explore(&puzzle, DEFAULT_MAX_STATES);

    assert!(*report.complete());
    assert!(report.violations().is_empty());
    assert!(*report.max_removed() >= 1);
}
