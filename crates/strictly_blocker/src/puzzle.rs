//! The owned game state that the move resolver mutates.

use super::bounds::Grid;
use super::registry::{ObstacleId, ObstacleRegistry};
use super::types::Coord;
use derive_getters::Getters;
use serde::Serialize;

/// Glyph for the player in text frames.
pub const PLAYER_GLYPH: char = '@';
/// Glyph for an active obstacle in text frames.
pub const OBSTACLE_GLYPH: char = '#';
/// Glyph for the transporter tile in text frames.
pub const TRANSPORTER_GLYPH: char = 'O';
/// Glyph for an empty cell in text frames.
pub const EMPTY_GLYPH: char = '.';

/// Complete puzzle state.
///
/// Grid, transporter, and the number of obstacle slots are fixed once the
/// puzzle is built. Only [`Puzzle::attempt_move`] changes positions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, Serialize)]
pub struct Puzzle {
    /// Playable area.
    grid: Grid,
    /// Player position.
    player: Coord,
    /// Obstacle positions.
    obstacles: ObstacleRegistry,
    /// Tile that removes obstacles pushed onto it.
    transporter: Coord,
}

impl Puzzle {
    /// Assembles a puzzle without validation.
    ///
    /// Public construction goes through
    /// [`LevelConfig::build`](crate::LevelConfig::build).
    pub(crate) fn from_parts(
        grid: Grid,
        player: Coord,
        obstacles: ObstacleRegistry,
        transporter: Coord,
    ) -> Self {
        Self {
            grid,
            player,
            obstacles,
            transporter,
        }
    }

    pub(crate) fn set_player(&mut self, at: Coord) {
        self.player = at;
    }

    pub(crate) fn obstacles_mut(&mut self) -> &mut ObstacleRegistry {
        &mut self.obstacles
    }

    /// Returns the active obstacle on `at`, if any.
    pub fn obstacle_at(&self, at: Coord) -> Option<ObstacleId> {
        self.obstacles.find_at(at)
    }

    /// Glyph shown for a cell.
    pub fn glyph_at(&self, at: Coord) -> char {
        if at == self.player {
            PLAYER_GLYPH
        } else if self.obstacles.find_at(at).is_some() {
            OBSTACLE_GLYPH
        } else if at == self.transporter {
            TRANSPORTER_GLYPH
        } else {
            EMPTY_GLYPH
        }
    }

    /// Formats the grid as rows of glyphs separated by newlines.
    pub fn display(&self) -> String {
        let width = *self.grid.width();
        let height = *self.grid.height();
        let mut result = String::new();
        for y in 0..height {
            for x in 0..width {
                result.push(self.glyph_at(Coord::new(x, y)));
            }
            if y + 1 < height {
                result.push('\n');
            }
        }
        result
    }
}

impl std::fmt::Display for Puzzle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use crate::LevelConfig;

    #[test]
    fn test_display_classic_level() {
        let puzzle = LevelConfig::default().build().unwrap();
        let expected = "\
........
.#......
..@.....
........
..#.....
.....O..
........
........";
        assert_eq!(puzzle.display(), expected);
        assert_eq!(puzzle.to_string(), expected);
    }
}
