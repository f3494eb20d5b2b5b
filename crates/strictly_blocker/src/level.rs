//! Level configuration: the constants a puzzle is built from.

use super::bounds::Grid;
use super::contracts::assert_invariants;
use super::registry::ObstacleRegistry;
use super::types::Coord;
use super::Puzzle;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Starting layout of a puzzle.
///
/// The grid size is given either in tiles (`width`, `height`) or as a
/// display resolution in pixels (`screen_width`, `screen_height`), which is
/// divided by [`TILE_SIZE`](crate::TILE_SIZE).
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Grid width in tiles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    width: Option<u32>,

    /// Grid height in tiles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    height: Option<u32>,

    /// Display width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    screen_width: Option<u32>,

    /// Display height in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    screen_height: Option<u32>,

    /// Player starting cell.
    player: Coord,

    /// Transporter tile.
    transporter: Coord,

    /// Obstacle starting cells, one per obstacle slot.
    #[serde(default)]
    obstacles: Vec<Coord>,
}

impl Default for LevelConfig {
    /// The classic level: 8×8 grid, two obstacles, transporter at (5, 5).
    fn default() -> Self {
        Self::new(
            8,
            8,
            Coord::new(2, 2),
            vec![Coord::new(1, 1), Coord::new(2, 4)],
            Coord::new(5, 5),
        )
    }
}

impl LevelConfig {
    /// Creates a level on a `width` × `height` tile grid.
    pub fn new(
        width: u32,
        height: u32,
        player: Coord,
        obstacles: Vec<Coord>,
        transporter: Coord,
    ) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            screen_width: None,
            screen_height: None,
            player,
            transporter,
            obstacles,
        }
    }

    /// Creates a level sized from a display resolution in pixels.
    pub fn for_screen(
        screen_width: u32,
        screen_height: u32,
        player: Coord,
        obstacles: Vec<Coord>,
        transporter: Coord,
    ) -> Self {
        Self {
            width: None,
            height: None,
            screen_width: Some(screen_width),
            screen_height: Some(screen_height),
            player,
            transporter,
            obstacles,
        }
    }

    /// Parses a level from TOML.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, LevelError> {
        toml::from_str(content).map_err(|e| LevelError::Parse(e.to_string()))
    }

    /// Loads a level from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        debug!("Loading level from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| LevelError::Io(format!("Failed to read level file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;

        info!(obstacles = config.obstacles.len(), "Level loaded successfully");
        Ok(config)
    }

    /// Serializes the level as TOML.
    #[instrument(skip(self))]
    pub fn to_toml_string(&self) -> Result<String, LevelError> {
        toml::to_string(self).map_err(|e| LevelError::Parse(e.to_string()))
    }

    /// Resolves the grid from whichever size fields are set.
    #[instrument(skip(self))]
    pub fn grid(&self) -> Result<Grid, LevelError> {
        let grid = match (self.width, self.height, self.screen_width, self.screen_height) {
            (Some(width), Some(height), None, None) => Grid::new(width, height),
            (None, None, Some(width), Some(height)) => Grid::from_screen(width, height),
            _ => return Err(LevelError::AmbiguousSize),
        };
        grid.ok_or(LevelError::EmptyGrid)
    }

    /// Validates the level and builds the starting puzzle.
    ///
    /// Rejects any layout that breaks a puzzle invariant before the first
    /// move is made.
    #[instrument(skip(self))]
    pub fn build(&self) -> Result<Puzzle, LevelError> {
        let grid = self.grid()?;

        if !grid.contains(self.player) {
            return Err(LevelError::PlayerOutOfBounds(self.player));
        }
        if !grid.contains(self.transporter) {
            return Err(LevelError::TransporterOutOfBounds(self.transporter));
        }

        let mut occupied: HashMap<Coord, usize> = HashMap::with_capacity(self.obstacles.len());
        for (index, at) in self.obstacles.iter().copied().enumerate() {
            if !grid.contains(at) {
                return Err(LevelError::ObstacleOutOfBounds { index, at });
            }
            if at == self.player {
                return Err(LevelError::PlayerOnObstacle { index, at });
            }
            if at == self.transporter {
                return Err(LevelError::ObstacleOnTransporter { index, at });
            }
            if let Some(first) = occupied.insert(at, index) {
                return Err(LevelError::ObstaclesOverlap {
                    first,
                    second: index,
                    at,
                });
            }
        }

        let puzzle = Puzzle::from_parts(
            grid,
            self.player,
            ObstacleRegistry::new(self.obstacles.iter().copied()),
            self.transporter,
        );
        assert_invariants(&puzzle);

        info!(
            width = grid.width(),
            height = grid.height(),
            obstacles = self.obstacles.len(),
            "Puzzle built"
        );
        Ok(puzzle)
    }
}

/// Error building a puzzle from a level.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum LevelError {
    /// One of the grid dimensions is zero.
    #[display("Grid must be at least one tile in each direction")]
    EmptyGrid,

    /// Size given both in tiles and pixels, or only partially.
    #[display("Give either width/height or screen_width/screen_height")]
    AmbiguousSize,

    /// Player starts off the grid.
    #[display("Player start {} is outside the grid", _0)]
    PlayerOutOfBounds(Coord),

    /// Transporter is off the grid.
    #[display("Transporter {} is outside the grid", _0)]
    TransporterOutOfBounds(Coord),

    /// An obstacle starts off the grid.
    #[display("Obstacle {} at {} is outside the grid", index, at)]
    ObstacleOutOfBounds {
        /// Slot index.
        index: usize,
        /// Configured position.
        at: Coord,
    },

    /// Two obstacles start on the same cell.
    #[display("Obstacles {} and {} both start at {}", first, second, at)]
    ObstaclesOverlap {
        /// Earlier slot index.
        first: usize,
        /// Later slot index.
        second: usize,
        /// Shared position.
        at: Coord,
    },

    /// An obstacle starts under the player.
    #[display("Obstacle {} starts under the player at {}", index, at)]
    PlayerOnObstacle {
        /// Slot index.
        index: usize,
        /// Shared position.
        at: Coord,
    },

    /// An obstacle starts on the transporter.
    #[display("Obstacle {} starts on the transporter at {}", index, at)]
    ObstacleOnTransporter {
        /// Slot index.
        index: usize,
        /// Shared position.
        at: Coord,
    },

    /// The level text is not valid TOML for a level.
    #[display("Failed to parse level: {}", _0)]
    Parse(String),

    /// The level file could not be read.
    #[display("{}", _0)]
    Io(String),
}

impl std::error::Error for LevelError {}
