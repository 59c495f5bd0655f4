//! Plain-text board rendering and turn narration.
//!
//! The grid walks the classic zigzag layout: cells 91..=100 across the top
//! row, 1..=10 along the bottom, with odd rows reversed. Styling is left to
//! the TUI path; this output is plain text for line-oriented sinks.

use crate::game::{symbol, Board, EffectKind, Roster, TurnRecord, Verdict};

const GRID_ROWS: usize = 10;
const GRID_COLS: usize = 10;

/// The cell number shown at `(row, col)`, with row 0 at the top.
#[must_use]
pub fn display_cell(row: usize, col: usize) -> u8 {
    let base_row = GRID_ROWS - 1 - row;
    let cell = if base_row % 2 == 0 {
        base_row * GRID_COLS + col + 1
    } else {
        base_row * GRID_COLS + (GRID_COLS - col)
    };
    #[allow(clippy::cast_possible_truncation)]
    let cell = cell as u8;
    cell
}

/// Label for one cell: the occupying player's symbol, or an `L`/`S` marker,
/// in front of the cell number.
#[must_use]
pub fn cell_label(board: &Board, roster: &Roster, cell: u8) -> String {
    if let Some(player) = roster.occupant(cell) {
        return format!("{}{cell}", symbol(player));
    }
    match board.jump(cell) {
        Some((_, EffectKind::Ladder)) => format!("L{cell}"),
        Some((_, EffectKind::Snake)) => format!("S{cell}"),
        None => cell.to_string(),
    }
}

/// Render the full board with home/finished footers.
#[must_use]
pub fn board_grid(board: &Board, roster: &Roster) -> String {
    let rule = format!("+{}+\n", "-".repeat(GRID_COLS * 7 + 1));
    let mut out = String::new();

    out.push_str(&rule);
    for row in 0..GRID_ROWS {
        out.push_str("| ");
        for col in 0..GRID_COLS {
            let cell = display_cell(row, col);
            let label = cell_label(board, roster, cell);
            out.push_str(&format!("{label:<6} "));
        }
        out.push_str("|\n");
    }
    out.push_str(&rule);

    out.push_str(&format!("  Home: {}\n", roster_list(roster, |p| roster.position(p) == 0)));
    out.push_str(&format!("  Finished: {}\n", finished_list(roster)));
    out.push_str(&format!(
        "  Active players: {} / {}\n",
        roster.active_count(),
        roster.player_count()
    ));

    out
}

fn roster_list(roster: &Roster, keep: impl Fn(u8) -> bool) -> String {
    let names: Vec<String> = roster
        .players()
        .filter(|&p| keep(p))
        .map(|p| symbol(p).to_string())
        .collect();
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}

fn finished_list(roster: &Roster) -> String {
    let names: Vec<String> = roster
        .players()
        .filter_map(|p| roster.rank(p).map(|rank| format!("{} (rank {rank})", symbol(p))))
        .collect();
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}

/// Narrate one turn as display lines.
#[must_use]
pub fn narrate(record: &TurnRecord) -> Vec<String> {
    let sym = symbol(record.player);
    let mut lines = Vec::new();

    let (Some(roll), Some(resolution)) = (&record.roll, &record.resolution) else {
        lines.push(format!(">>> {sym} has already finished, turn passes"));
        return lines;
    };

    lines.push(format!(">>> {sym}'s turn (at cell {})", record.at));
    lines.push(format!("    {sym} throws: {roll}"));

    match resolution.verdict {
        Verdict::Cancelled => lines.push("    three 6s, move cancelled".to_string()),
        Verdict::Overshoot => lines.push(format!(
            "    move not allowed: {} + {} passes 100",
            record.at,
            roll.total()
        )),
        Verdict::Occupied => lines.push(format!(
            "    move not allowed: cell {} is occupied",
            record.at + roll.total()
        )),
        Verdict::Moved => {
            lines.push(format!(
                "    {sym} moves: {} -> {}",
                record.at,
                record.at + roll.total()
            ));
            for hop in &resolution.hops {
                let line = match hop.kind {
                    EffectKind::Ladder => {
                        format!("    {sym} climbs ladder: {} -> {}", hop.from, hop.to)
                    }
                    EffectKind::Snake => {
                        format!("    {sym} bitten by snake: {} -> {}", hop.from, hop.to)
                    }
                };
                lines.push(line);
            }
            if let Some(cell) = resolution.halted_at {
                lines.push(format!(
                    "    cell {cell} is occupied, {sym} stays at {}",
                    resolution.to
                ));
            }
            if let Some(rank) = record.rank {
                lines.push(format!("    *** {sym} reaches 100, rank {rank} ***"));
            }
        }
    }

    lines
}
