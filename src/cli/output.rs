//! Output formatting utilities for CLI.

use ludo::game::{symbol, Roster};
use ludo::sim::SimStats;
use serde::Serialize;

/// JSON-serializable end-of-game summary.
#[derive(Debug, Serialize)]
pub(super) struct JsonGameSummary {
    /// Random seed used.
    pub(super) seed: u64,
    /// Turns dispatched.
    pub(super) turns: u32,
    /// Whether every player finished (false on quit / closed input).
    pub(super) finished: bool,
    /// Per-player results.
    pub(super) players: Vec<JsonPlayerSummary>,
}

/// JSON-serializable player summary.
#[derive(Debug, Serialize)]
pub(super) struct JsonPlayerSummary {
    /// Display symbol (`A`..`Z`).
    pub(super) symbol: char,
    /// Final position (0 home, 100 finished).
    pub(super) position: u8,
    /// Finishing rank (null if still in transit).
    pub(super) rank: Option<u8>,
}

impl JsonGameSummary {
    /// Build from a roster snapshot.
    pub(super) fn new(roster: &Roster, seed: u64, turns: u32, finished: bool) -> Self {
        Self {
            seed,
            turns,
            finished,
            players: roster
                .players()
                .map(|p| JsonPlayerSummary {
                    symbol: symbol(p),
                    position: roster.position(p),
                    rank: roster.rank(p),
                })
                .collect(),
        }
    }
}

/// Format an end-of-game summary as human-readable text.
pub(super) fn format_summary_text(
    roster: &Roster,
    seed: u64,
    turns: u32,
    finished: bool,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Game summary (seed: {seed})\n"));
    let status = if finished {
        "all players finished"
    } else {
        "ended early"
    };
    output.push_str(&format!("  Status: {status}\n"));
    output.push_str(&format!("  Turns: {turns}\n\n"));

    for player in roster.players() {
        match roster.rank(player) {
            Some(rank) => output.push_str(&format!(
                "  Player {}: finished, rank {rank}\n",
                symbol(player)
            )),
            None => output.push_str(&format!(
                "  Player {}: at cell {}\n",
                symbol(player),
                roster.position(player)
            )),
        }
    }

    output
}

/// JSON-serializable simulation result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSimResult {
    /// Games played.
    pub(super) games: u64,
    /// Games that hit the turn cap.
    pub(super) stalled: u64,
    /// Mean turns per game.
    pub(super) mean_turns: f64,
    /// Total ladder transitions.
    pub(super) ladder_hops: u64,
    /// Total snake transitions.
    pub(super) snake_hops: u64,
    /// Total rolls cancelled by three 6s.
    pub(super) cancelled_rolls: u64,
    /// Per-player aggregates.
    pub(super) players: Vec<JsonSimPlayer>,
}

/// JSON-serializable per-player simulation aggregate.
#[derive(Debug, Serialize)]
pub(super) struct JsonSimPlayer {
    /// Display symbol.
    pub(super) symbol: char,
    /// First-place finishes.
    pub(super) wins: u64,
    /// Count per finishing rank (index 0 is rank 1).
    pub(super) rank_counts: Vec<u64>,
}

impl JsonSimResult {
    /// Build from aggregated stats.
    pub(super) fn from_stats(stats: &SimStats) -> Self {
        Self {
            games: stats.games,
            stalled: stats.stalled,
            mean_turns: stats.mean_turns(),
            ladder_hops: stats.ladder_hops,
            snake_hops: stats.snake_hops,
            cancelled_rolls: stats.cancelled_rolls,
            players: stats
                .rank_counts
                .iter()
                .enumerate()
                .map(|(player, counts)| {
                    #[allow(clippy::cast_possible_truncation)]
                    let player = player as u8;
                    JsonSimPlayer {
                        symbol: symbol(player),
                        wins: counts.first().copied().unwrap_or(0),
                        rank_counts: counts.clone(),
                    }
                })
                .collect(),
        }
    }
}

/// Format simulation stats as human-readable text.
pub(super) fn format_sim_text(stats: &SimStats) -> String {
    let mut output = String::new();

    output.push_str(&format!("Simulation ({} games)\n", stats.games));
    if stats.stalled > 0 {
        output.push_str(&format!("  Stalled at turn cap: {}\n", stats.stalled));
    }
    output.push_str(&format!("  Mean turns: {:.1}\n", stats.mean_turns()));
    output.push_str(&format!(
        "  Ladders climbed: {}   Snake bites: {}   Cancelled rolls: {}\n\n",
        stats.ladder_hops, stats.snake_hops, stats.cancelled_rolls
    ));

    for (player, counts) in stats.rank_counts.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let sym = symbol(player as u8);
        let wins = counts.first().copied().unwrap_or(0);
        #[allow(clippy::cast_precision_loss)]
        let win_rate = if stats.games == 0 {
            0.0
        } else {
            wins as f64 * 100.0 / stats.games as f64
        };
        output.push_str(&format!(
            "  Player {sym}: {wins} wins ({win_rate:.1}%)\n"
        ));
    }

    output
}

/// Format simulation stats as CSV (one row per player and rank).
pub(super) fn format_sim_csv(stats: &SimStats) -> String {
    let mut output = String::from("player,rank,count\n");
    for (player, counts) in stats.rank_counts.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let sym = symbol(player as u8);
        for (rank_idx, count) in counts.iter().enumerate() {
            output.push_str(&format!("{sym},{},{count}\n", rank_idx + 1));
        }
    }
    output
}
