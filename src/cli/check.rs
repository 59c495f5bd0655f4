//! Board check command implementation.

use super::CliError;
use ludo::game::{Board, FINISH};
use std::path::Path;

/// Execute the check command.
///
/// # Errors
///
/// Returns an error if the board file cannot be read or parsed.
pub(crate) fn execute(board_path: &Path) -> Result<(), CliError> {
    println!("Checking: {}", board_path.display());
    println!();

    let board = Board::load(board_path)
        .map_err(|e| CliError::new(format!("failed to load {}: {e}", board_path.display())))?;

    let ladders: Vec<_> = board.ladders().collect();
    let snakes: Vec<_> = board.snakes().collect();

    println!("Ladders ({}):", ladders.len());
    for (from, to) in &ladders {
        println!("  {from} -> {to}");
    }
    println!("Snakes ({}):", snakes.len());
    for (from, to) in &snakes {
        println!("  {from} -> {to}");
    }
    println!();

    let targets_ok = (1..=FINISH).all(|cell| match board.jump(cell) {
        Some((target, _)) => (1..=FINISH).contains(&target),
        None => true,
    });
    print_check("effect targets within 1..=100", targets_ok);

    let loop_cells = effect_loop_cells(&board);
    print_check("no effect loops", loop_cells.is_empty());
    if !loop_cells.is_empty() {
        println!(
            "    note: cells {loop_cells:?} chain back onto themselves; the \
             resolver's cycle guard will stop them, but the board is \
             probably not what you meant"
        );
    }

    println!();
    println!("Board OK");

    Ok(())
}

/// Cells whose effect chain revisits a cell (e.g. `L 3 7` + `S 7 3`).
fn effect_loop_cells(board: &Board) -> Vec<u8> {
    let mut looping = Vec::new();
    for start in 1..FINISH {
        let mut visited = [false; 101];
        let mut cell = start;
        loop {
            if visited[cell as usize] {
                looping.push(start);
                break;
            }
            visited[cell as usize] = true;
            match board.jump(cell) {
                Some((target, _)) if target < FINISH => cell = target,
                _ => break,
            }
        }
    }
    looping
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
