//! Ludo CLI - play, watch, simulate and check Snakes & Ladders games.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Ludo - a turn-coordinated Snakes & Ladders engine
#[derive(Parser, Debug)]
#[command(name = "ludo")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a game, interactively or on an autoplay timer
    Play {
        /// Board definition file
        #[arg(required = true)]
        board: PathBuf,

        /// Number of players (2-26)
        #[arg(short, long, default_value = "4")]
        players: u8,

        /// Start in autoplay mode instead of reading commands
        #[arg(short, long)]
        autoplay: bool,

        /// Autoplay delay in milliseconds
        #[arg(short, long, default_value = "1000")]
        delay: u64,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format for the final summary: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Watch an automated game in an interactive TUI
    Watch {
        /// Board definition file
        #[arg(required = true)]
        board: PathBuf,

        /// Number of players (2-26)
        #[arg(short, long, default_value = "4")]
        players: u8,

        /// Turn delay in milliseconds (default: 500)
        #[arg(long, default_value = "500")]
        speed: u64,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Run mass headless games and aggregate statistics
    Sim {
        /// Board definition file
        #[arg(required = true)]
        board: PathBuf,

        /// Number of players (2-26)
        #[arg(short, long, default_value = "4")]
        players: u8,

        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Per-game turn cap (default: 100000)
        #[arg(long, default_value = "100000")]
        max_turns: u32,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::SimFormat,

        /// Show progress bar
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Check a board definition file
    Check {
        /// Board file to check
        #[arg(required = true)]
        board: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Play {
            board,
            players,
            autoplay,
            delay,
            seed,
            format,
        } => cli::play::execute(&board, players, autoplay, delay, seed, format),

        Commands::Watch {
            board,
            players,
            speed,
            seed,
        } => cli::watch::execute(&board, players, speed, seed),

        Commands::Sim {
            board,
            players,
            games,
            seed,
            threads,
            max_turns,
            format,
            progress,
        } => cli::sim::execute(&board, players, games, seed, threads, max_turns, format, progress),

        Commands::Check { board } => cli::check::execute(&board),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
