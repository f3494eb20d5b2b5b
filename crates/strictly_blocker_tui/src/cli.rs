//! Command-line interface for strictly_blocker.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Blocker - push the blocks onto the transporter
#[derive(Parser, Debug)]
#[command(name = "strictly_blocker")]
#[command(about = "Block-pushing puzzle with checked rules", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Level file (TOML). Uses the classic level if omitted.
        #[arg(short, long)]
        level: Option<PathBuf>,

        /// Write logs to this file (the terminal is busy drawing the game)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Apply a move script and print every outcome and the final board
    Replay {
        /// Level file (TOML). Uses the classic level if omitted.
        #[arg(short, long)]
        level: Option<PathBuf>,

        /// Moves: U, D, L, R, or . for no move
        moves: String,
    },

    /// Visit every reachable state and check the rules hold in all of them
    Check {
        /// Level file (TOML). Uses the classic level if omitted.
        #[arg(short, long)]
        level: Option<PathBuf>,

        /// Stop after this many distinct states
        #[arg(long, default_value_t = strictly_blocker::DEFAULT_MAX_STATES)]
        max_states: usize,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the resolved level as TOML
    ShowLevel {
        /// Level file (TOML). Uses the classic level if omitted.
        #[arg(short, long)]
        level: Option<PathBuf>,
    },
}
