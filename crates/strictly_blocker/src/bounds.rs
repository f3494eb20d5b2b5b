//! Grid bounds checking.

use super::types::Coord;
use derive_getters::Getters;
use serde::Serialize;
use tracing::instrument;

/// Edge length of one tile in display pixels.
pub const TILE_SIZE: u32 = 8;

/// The fixed rectangular playable area, measured in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Getters, Serialize)]
pub struct Grid {
    /// Number of columns.
    width: i32,
    /// Number of rows.
    height: i32,
}

impl Grid {
    /// Creates a grid of `width` × `height` tiles.
    ///
    /// Returns `None` if either dimension is zero or too large to address
    /// with signed coordinates.
    #[instrument]
    pub fn new(width: u32, height: u32) -> Option<Self> {
        let width = i32::try_from(width).ok().filter(|w| *w > 0)?;
        let height = i32::try_from(height).ok().filter(|h| *h > 0)?;
        Some(Self { width, height })
    }

    /// Derives the grid from a display resolution in pixels.
    #[instrument]
    pub fn from_screen(screen_width: u32, screen_height: u32) -> Option<Self> {
        Self::new(screen_width / TILE_SIZE, screen_height / TILE_SIZE)
    }

    /// Returns true iff `0 <= x < width` and `0 <= y < height`.
    pub fn within_bounds(&self, x: i32, y: i32) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    /// Coordinate form of [`Grid::within_bounds`].
    pub fn contains(&self, at: Coord) -> bool {
        self.within_bounds(at.x, at.y)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Coord::new(x, y)))
    }
}
