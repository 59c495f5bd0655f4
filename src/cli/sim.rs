//! Sim command implementation.

use super::output::{format_sim_csv, format_sim_text, JsonSimResult};
use super::{entropy_seed, CliError, SimFormat};
use indicatif::{ProgressBar, ProgressStyle};
use ludo::game::Board;
use ludo::sim::{run_sim, SimConfig};
use std::path::Path;
use std::time::Instant;

/// Execute the sim command.
///
/// # Errors
///
/// Returns an error if the board cannot be loaded or the player count is
/// invalid.
#[allow(clippy::too_many_arguments)]
pub(crate) fn execute(
    board: &Path,
    players: u8,
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    max_turns: u32,
    format: SimFormat,
    progress: bool,
) -> Result<(), CliError> {
    let board = Board::load(board)
        .map_err(|e| CliError::new(format!("failed to load {}: {e}", board.display())))?;

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed.unwrap_or_else(entropy_seed);
    let config = SimConfig {
        players,
        games,
        base_seed,
        max_turns,
    };

    let pb = if progress {
        let pb = ProgressBar::new(games);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
                .expect("valid template")
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    let stats = run_sim(&board, &config, || {
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    })?;

    if let Some(pb) = &pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        #[allow(clippy::cast_precision_loss)]
        let rate = stats.games as f64 / duration.as_secs_f64();
        rate
    } else {
        0.0
    };

    match format {
        SimFormat::Text => {
            println!();
            print!("{}", format_sim_text(&stats));
            println!();
            println!(
                "Duration: {:.2}s ({games_per_sec:.0} games/sec)",
                duration.as_secs_f64()
            );
        }
        SimFormat::Json => {
            let json_result = JsonSimResult::from_stats(&stats);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
        SimFormat::Csv => {
            print!("{}", format_sim_csv(&stats));
        }
    }

    Ok(())
}
