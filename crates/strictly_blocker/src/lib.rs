//! Strictly Blocker - type-safe rules for a block-pushing puzzle
//!
//! The player walks a small grid one cell at a time, pushing obstacles
//! ahead of them. An obstacle pushed onto the transporter tile leaves play
//! for good.
//!
//! # Architecture
//!
//! - **Bounds**: [`Grid`] answers whether a coordinate is on the board
//! - **Registry**: [`ObstacleRegistry`] is a fixed arena of obstacle positions
//! - **Resolver**: [`Puzzle::attempt_move`] applies the walk/push/transport rules
//! - **Invariants**: [`BlockerInvariants`] and [`MoveContract`] state what every move must preserve
//! - **Explore**: [`explore()`] checks every reachable state
//! - **Game loop**: [`GameLoop`] connects an [`InputSource`] to a [`Renderer`]
//!
//! # Example
//!
//! ```
//! use strictly_blocker::{Coord, Direction, LevelConfig, MoveOutcome};
//!
//! let mut puzzle = LevelConfig::default().build()?;
//! let outcome = puzzle.attempt_move(Direction::Left);
//! assert!(matches!(outcome, MoveOutcome::Stepped { .. }));
//! assert_eq!(*puzzle.player(), Coord::new(1, 2));
//! # Ok::<(), strictly_blocker::LevelError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod bounds;
mod contracts;
mod game_loop;
mod kani_support;
mod level;
mod puzzle;
mod registry;
mod resolver;
mod types;

pub mod explore;
pub mod invariants;

pub use action::{MoveOutcome, Rejection};
pub use bounds::{Grid, TILE_SIZE};
pub use contracts::{assert_invariants, Contract, ContractViolation, MoveContract};
pub use explore::{explore, Counterexample, Exploration, DEFAULT_MAX_STATES};
pub use game_loop::{
    parse_script, GameLoop, InputSource, LoopError, Renderer, ScriptError, ScriptedInput,
    TextRenderer,
};
pub use invariants::{
    BlockerInvariants, InBoundsInvariant, Invariant, InvariantSet, InvariantViolation,
    NoOverlapInvariant, SentinelPermanence, TransitionInvariant, TransporterClearInvariant,
};
pub use level::{LevelConfig, LevelError};
pub use puzzle::{Puzzle, EMPTY_GLYPH, OBSTACLE_GLYPH, PLAYER_GLYPH, TRANSPORTER_GLYPH};
pub use registry::{ObstacleId, ObstacleRegistry};
pub use types::{Coord, Direction};
