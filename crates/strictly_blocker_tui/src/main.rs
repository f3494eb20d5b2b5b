//! Terminal front end for Strictly Blocker

#![warn(missing_docs)]

mod cli;
mod input;
mod ui;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use strictly_blocker::{explore, parse_script, Exploration, GameLoop, LevelConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use input::KeyboardInput;
use ui::TerminalRenderer;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Play { level, log_file } => {
            init_file_logging(log_file.as_deref())?;
            play(level.as_deref())
        }
        Command::Replay { level, moves } => {
            init_stderr_logging();
            replay(level.as_deref(), &moves)
        }
        Command::Check {
            level,
            max_states,
            json,
        } => {
            init_stderr_logging();
            check(level.as_deref(), max_states, json)
        }
        Command::ShowLevel { level } => {
            init_stderr_logging();
            let config = load_level(level.as_deref())?;
            config.build().context("Level is not playable")?;
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

/// The game owns the terminal, so logs only go to a file.
fn init_file_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_level(path: Option<&Path>) -> Result<LevelConfig> {
    match path {
        Some(path) => LevelConfig::from_file(path)
            .with_context(|| format!("Failed to load level {}", path.display())),
        None => Ok(LevelConfig::default()),
    }
}

fn play(level: Option<&Path>) -> Result<()> {
    let puzzle = load_level(level)?.build().context("Level is not playable")?;
    info!("Starting Strictly Blocker");

    let mut game = GameLoop::new(puzzle);
    let result = {
        let mut renderer = TerminalRenderer::enter().context("Failed to set up terminal")?;
        game.run(&mut KeyboardInput, &mut renderer)
    };
    result.context("Game loop failed")?;

    let obstacles = game.puzzle().obstacles();
    println!(
        "{} moves, {} of {} obstacles transported",
        game.moves(),
        obstacles.removed_count(),
        obstacles.len()
    );
    Ok(())
}

fn replay(level: Option<&Path>, moves: &str) -> Result<()> {
    let puzzle = load_level(level)?.build().context("Level is not playable")?;
    let directions = parse_script(moves)?;

    let mut game = GameLoop::new(puzzle);
    for (turn, direction) in directions.into_iter().enumerate() {
        let outcome = game.step(direction);
        println!("{:>4} {}: {}", turn + 1, direction.to_char(), outcome);
    }

    println!();
    print!("{}", game.puzzle());
    println!("Player at {}", game.puzzle().player());
    Ok(())
}

fn check(level: Option<&Path>, max_states: usize, json: bool) -> Result<()> {
    let puzzle = load_level(level)?.build().context("Level is not playable")?;
    let report = explore(&puzzle, max_states);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if !report.violations().is_empty() {
        bail!("{} contract violation(s) found", report.violations().len());
    }
    Ok(())
}

fn print_report(report: &Exploration) {
    println!("States:      {}", report.states());
    println!("Transitions: {}", report.transitions());
    println!("Rejected:    {}", report.rejected());
    println!("Pushes:      {}", report.pushes());
    println!("Max removed: {}", report.max_removed());
    if !report.deepest_path().is_empty() {
        println!("  reached by {}", report.deepest_path());
    }
    if !*report.complete() {
        println!("Stopped at the state cap; raise --max-states to search further");
    }
    for violation in report.violations() {
        println!("VIOLATION after {:?}: {}", violation.path(), violation.description());
    }
}
