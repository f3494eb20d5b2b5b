//! Kani arbitrary implementations for puzzle types.
//!
//! Puzzles are generated on a 4×4 grid with two obstacle slots, which is
//! enough to reach every push and transporter case.

#[cfg(kani)]
use super::{Coord, Direction, Grid, ObstacleRegistry, Puzzle};

#[cfg(kani)]
const KANI_GRID: u32 = 4;

#[cfg(kani)]
impl kani::Arbitrary for Direction {
    fn any() -> Self {
        let index: u8 = kani::any();
        kani::assume(index < 5);
        match index {
            0 => Direction::Up,
            1 => Direction::Down,
            2 => Direction::Left,
            3 => Direction::Right,
            _ => Direction::Stay,
        }
    }
}

#[cfg(kani)]
impl kani::Arbitrary for Coord {
    fn any() -> Self {
        let x: i32 = kani::any();
        let y: i32 = kani::any();
        kani::assume((-1..KANI_GRID as i32).contains(&x));
        kani::assume((-1..KANI_GRID as i32).contains(&y));
        Coord::new(x, y)
    }
}

#[cfg(kani)]
impl kani::Arbitrary for Puzzle {
    fn any() -> Self {
        let Some(grid) = Grid::new(KANI_GRID, KANI_GRID) else {
            unreachable!()
        };
        let first: Coord = kani::any();
        let second: Coord = kani::any();
        // Note: This bypasses level validation, allowing Kani to explore invalid states
        Puzzle::from_parts(
            grid,
            kani::any(),
            ObstacleRegistry::new([first, second]),
            kani::any(),
        )
    }
}
