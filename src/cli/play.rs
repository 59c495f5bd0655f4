//! Play command implementation.

use super::output::{format_summary_text, JsonGameSummary};
use super::{entropy_seed, CliError, OutputFormat};
use ludo::game::Board;
use ludo::{Coordinator, CoordinatorConfig};
use std::io;
use std::path::Path;
use std::time::Duration;

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the board cannot be loaded, the actor fabric fails
/// to launch, or the game dies on a protocol error.
pub(crate) fn execute(
    board: &Path,
    players: u8,
    autoplay: bool,
    delay: u64,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let board = Board::load(board)
        .map_err(|e| CliError::new(format!("failed to load {}: {e}", board.display())))?;

    let seed = seed.unwrap_or_else(entropy_seed);
    let config = CoordinatorConfig {
        autoplay,
        delay: Duration::from_millis(delay),
        seed,
        ..CoordinatorConfig::default()
    };

    if !autoplay {
        println!("Commands: next, delay <ms>, autoplay, quit");
        println!();
    }

    let mut coordinator = Coordinator::launch(board, players, config, Box::new(io::stdout()))?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let run_result = coordinator.run(&mut input);

    let roster = coordinator.snapshot();
    let turns = coordinator.turns_dispatched();
    coordinator.shutdown();

    let finished = run_result?;

    println!();
    match format {
        OutputFormat::Text => {
            print!("{}", format_summary_text(&roster, seed, turns, finished));
        }
        OutputFormat::Json => {
            let summary = JsonGameSummary::new(&roster, seed, turns, finished);
            let json = serde_json::to_string_pretty(&summary)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
