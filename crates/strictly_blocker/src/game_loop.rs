//! The single-threaded control loop and its collaborators.
//!
//! The loop owns the [`Puzzle`]. Input sources only decode directions and
//! renderers only read committed state; neither can reach the puzzle any
//! other way.

use super::action::MoveOutcome;
use super::types::Direction;
use super::Puzzle;
use derive_getters::Getters;
use std::convert::Infallible;
use tracing::{debug, info, instrument};

/// Supplies one decoded direction per loop iteration.
pub trait InputSource {
    /// Error raised by the underlying device.
    type Error;

    /// Returns the next direction, or `None` when input has ended.
    fn next_direction(&mut self) -> Result<Option<Direction>, Self::Error>;
}

/// Observes the puzzle after each resolved move.
pub trait Renderer {
    /// Error raised by the underlying device.
    type Error;

    /// Draws the current state.
    ///
    /// `last` is the outcome of the move just resolved, or `None` for the
    /// initial frame.
    fn render(&mut self, puzzle: &Puzzle, last: Option<&MoveOutcome>) -> Result<(), Self::Error>;
}

/// Failure inside the loop, from whichever side raised it.
#[derive(Debug, derive_more::Display)]
pub enum LoopError<I, R> {
    /// The input source failed.
    #[display("input failed: {}", _0)]
    Input(I),
    /// The renderer failed.
    #[display("render failed: {}", _0)]
    Render(R),
}

impl<I, R> std::error::Error for LoopError<I, R>
where
    I: std::error::Error,
    R: std::error::Error,
{
}

/// Owns the puzzle and drives it from an input source to a renderer.
#[derive(Debug, Clone, Getters)]
pub struct GameLoop {
    /// Current state.
    puzzle: Puzzle,
    /// Moves resolved so far.
    moves: usize,
}

impl GameLoop {
    /// Creates a loop around a freshly built puzzle.
    #[instrument(skip(puzzle))]
    pub fn new(puzzle: Puzzle) -> Self {
        Self { puzzle, moves: 0 }
    }

    /// Resolves a single direction.
    #[instrument(skip(self))]
    pub fn step(&mut self, direction: Direction) -> MoveOutcome {
        let outcome = self.puzzle.attempt_move(direction);
        self.moves += 1;
        debug!(moves = self.moves, %outcome, "Move resolved");
        outcome
    }

    /// Runs until the input source reports the end of input.
    ///
    /// Renders once before the first move and once after every move.
    #[instrument(skip_all)]
    pub fn run<In, Out>(
        &mut self,
        input: &mut In,
        renderer: &mut Out,
    ) -> Result<(), LoopError<In::Error, Out::Error>>
    where
        In: InputSource,
        Out: Renderer,
    {
        info!("Game loop started");
        renderer.render(&self.puzzle, None).map_err(LoopError::Render)?;

        while let Some(direction) = input.next_direction().map_err(LoopError::Input)? {
            let outcome = self.step(direction);
            renderer
                .render(&self.puzzle, Some(&outcome))
                .map_err(LoopError::Render)?;
        }

        info!(moves = self.moves, "Game loop finished");
        Ok(())
    }

    /// Gives the puzzle back.
    pub fn into_puzzle(self) -> Puzzle {
        self.puzzle
    }
}

/// A bad character in a move script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("Unexpected {ch:?} at offset {offset} in move script (use U, D, L, R or .)")]
pub struct ScriptError {
    /// The offending character.
    pub ch: char,
    /// Byte offset of the character.
    pub offset: usize,
}

impl std::error::Error for ScriptError {}

/// Parses a move script such as `"LLU.R"`.
///
/// Whitespace is ignored.
#[instrument]
pub fn parse_script(script: &str) -> Result<Vec<Direction>, ScriptError> {
    script
        .char_indices()
        .filter(|(_, ch)| !ch.is_whitespace())
        .map(|(offset, ch)| Direction::from_char(ch).ok_or(ScriptError { ch, offset }))
        .collect()
}

/// Input source that replays a fixed sequence of directions.
#[derive(Debug, Clone)]
pub struct ScriptedInput<I> {
    directions: I,
}

impl<I> ScriptedInput<I>
where
    I: Iterator<Item = Direction>,
{
    /// Wraps any iterator of directions.
    pub fn new(directions: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            directions: directions.into_iter(),
        }
    }
}

impl ScriptedInput<std::vec::IntoIter<Direction>> {
    /// Parses a move script into an input source.
    pub fn from_script(script: &str) -> Result<Self, ScriptError> {
        Ok(Self::new(parse_script(script)?))
    }
}

impl<I> InputSource for ScriptedInput<I>
where
    I: Iterator<Item = Direction>,
{
    type Error = Infallible;

    fn next_direction(&mut self) -> Result<Option<Direction>, Self::Error> {
        Ok(self.directions.next())
    }
}

/// Renderer that keeps every frame as text.
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    frames: Vec<String>,
}

impl TextRenderer {
    /// Creates an empty renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every frame drawn so far, oldest first.
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    /// The most recent frame.
    pub fn last_frame(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }
}

impl Renderer for TextRenderer {
    type Error = Infallible;

    fn render(&mut self, puzzle: &Puzzle, _last: Option<&MoveOutcome>) -> Result<(), Self::Error> {
        self.frames.push(puzzle.display());
        Ok(())
    }
}
