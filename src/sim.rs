//! Mass simulation over seeds.
//!
//! Runs many headless games in parallel and aggregates rank and outcome
//! statistics. Each game is a pure function of `(board, players, seed)`, so
//! results merge with a fold/reduce and need no locks.

use crate::engine::TurnEngine;
use crate::game::{Board, RosterError, Verdict};
use rayon::prelude::*;

/// Simulation settings.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// Number of players per game.
    pub players: u8,
    /// Number of games to run.
    pub games: u64,
    /// Seed for the first game; later games increment it.
    pub base_seed: u64,
    /// Per-game turn cap; a game hitting it counts as stalled.
    pub max_turns: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            players: 2,
            games: 1000,
            base_seed: 0,
            max_turns: 100_000,
        }
    }
}

/// Outcome of a single headless game.
#[derive(Debug, Clone)]
pub struct GameOutcome {
    /// Seed the game ran with.
    pub seed: u64,
    /// Turns dispatched before the game ended (or the cap was hit).
    pub turns: u32,
    /// Finishing rank per player; `None` only for stalled games.
    pub ranks: Vec<Option<u8>>,
    /// Whether the turn cap ended the game.
    pub stalled: bool,
    /// Rolls cancelled by three 6s.
    pub cancelled_rolls: u32,
    /// Moves rejected because the landing cell was occupied.
    pub occupied_rejections: u32,
    /// Moves rejected for passing 100.
    pub overshoots: u32,
    /// Ladder transitions taken.
    pub ladder_hops: u32,
    /// Snake transitions taken.
    pub snake_hops: u32,
}

/// Run one headless game to completion.
///
/// # Errors
///
/// Returns [`RosterError`] when the player count is outside 2..=26.
pub fn run_game(
    board: &Board,
    players: u8,
    seed: u64,
    max_turns: u32,
) -> Result<GameOutcome, RosterError> {
    let mut engine = TurnEngine::new(board.clone(), players, seed)?;
    let mut outcome = GameOutcome {
        seed,
        turns: 0,
        ranks: vec![None; players as usize],
        stalled: false,
        cancelled_rolls: 0,
        occupied_rejections: 0,
        overshoots: 0,
        ladder_hops: 0,
        snake_hops: 0,
    };

    while let Some(record) = engine.advance() {
        if let Some(resolution) = &record.resolution {
            match resolution.verdict {
                Verdict::Cancelled => outcome.cancelled_rolls += 1,
                Verdict::Occupied => outcome.occupied_rejections += 1,
                Verdict::Overshoot => outcome.overshoots += 1,
                Verdict::Moved => {
                    for hop in &resolution.hops {
                        match hop.kind {
                            crate::game::EffectKind::Ladder => outcome.ladder_hops += 1,
                            crate::game::EffectKind::Snake => outcome.snake_hops += 1,
                        }
                    }
                }
            }
        }
        if engine.turns_played() >= max_turns {
            outcome.stalled = true;
            break;
        }
    }

    outcome.turns = engine.turns_played();
    for player in engine.roster().players() {
        outcome.ranks[player as usize] = engine.roster().rank(player);
    }
    Ok(outcome)
}

/// Aggregated statistics over many games.
#[derive(Debug, Clone)]
pub struct SimStats {
    /// Games accumulated.
    pub games: u64,
    /// Games that hit the turn cap.
    pub stalled: u64,
    /// Total turns over all games.
    pub total_turns: u64,
    /// `rank_counts[player][rank - 1]` counts how often a player earned a
    /// rank.
    pub rank_counts: Vec<Vec<u64>>,
    /// Total cancelled rolls.
    pub cancelled_rolls: u64,
    /// Total occupied rejections.
    pub occupied_rejections: u64,
    /// Total overshoot rejections.
    pub overshoots: u64,
    /// Total ladder transitions.
    pub ladder_hops: u64,
    /// Total snake transitions.
    pub snake_hops: u64,
}

impl SimStats {
    /// Empty statistics for `players` players.
    #[must_use]
    pub fn new(players: u8) -> Self {
        Self {
            games: 0,
            stalled: 0,
            total_turns: 0,
            rank_counts: vec![vec![0; players as usize]; players as usize],
            cancelled_rolls: 0,
            occupied_rejections: 0,
            overshoots: 0,
            ladder_hops: 0,
            snake_hops: 0,
        }
    }

    /// Fold one game outcome in.
    pub fn add(&mut self, outcome: &GameOutcome) {
        self.games += 1;
        if outcome.stalled {
            self.stalled += 1;
        }
        self.total_turns += u64::from(outcome.turns);
        for (player, rank) in outcome.ranks.iter().enumerate() {
            if let Some(rank) = rank {
                self.rank_counts[player][usize::from(rank - 1)] += 1;
            }
        }
        self.cancelled_rolls += u64::from(outcome.cancelled_rolls);
        self.occupied_rejections += u64::from(outcome.occupied_rejections);
        self.overshoots += u64::from(outcome.overshoots);
        self.ladder_hops += u64::from(outcome.ladder_hops);
        self.snake_hops += u64::from(outcome.snake_hops);
    }

    /// Merge another accumulator in.
    pub fn merge(&mut self, other: &Self) {
        self.games += other.games;
        self.stalled += other.stalled;
        self.total_turns += other.total_turns;
        for (mine, theirs) in self.rank_counts.iter_mut().zip(&other.rank_counts) {
            for (m, t) in mine.iter_mut().zip(theirs) {
                *m += t;
            }
        }
        self.cancelled_rolls += other.cancelled_rolls;
        self.occupied_rejections += other.occupied_rejections;
        self.overshoots += other.overshoots;
        self.ladder_hops += other.ladder_hops;
        self.snake_hops += other.snake_hops;
    }

    /// How often a player finished first.
    #[must_use]
    pub fn wins(&self, player: u8) -> u64 {
        self.rank_counts[player as usize][0]
    }

    /// Mean turns per game.
    #[must_use]
    pub fn mean_turns(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let mean = self.total_turns as f64 / self.games as f64;
            mean
        }
    }
}

/// Run the whole simulation, splitting games across the rayon pool.
///
/// # Errors
///
/// Returns [`RosterError`] when the player count is outside 2..=26.
pub fn run_sim(
    board: &Board,
    config: &SimConfig,
    on_game_done: impl Fn() + Sync,
) -> Result<SimStats, RosterError> {
    // fail fast on a bad player count instead of once per game
    crate::game::Roster::new(config.players)?;

    let stats = (0..config.games)
        .into_par_iter()
        .fold(
            || SimStats::new(config.players),
            |mut local, i| {
                let seed = config.base_seed.wrapping_add(i);
                if let Ok(outcome) =
                    run_game(board, config.players, seed, config.max_turns)
                {
                    local.add(&outcome);
                }
                on_game_done();
                local
            },
        )
        .reduce(
            || SimStats::new(config.players),
            |mut a, b| {
                a.merge(&b);
                a
            },
        );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_board() -> Board {
        Board::from_records("L 4 14 L 9 31 S 17 7 S 54 34 E").unwrap()
    }

    #[test]
    fn test_run_game_finishes_everyone() {
        let outcome = run_game(&test_board(), 3, 11, 100_000).unwrap();
        assert!(!outcome.stalled);
        assert!(outcome.ranks.iter().all(Option::is_some));
        let mut ranks: Vec<u8> = outcome.ranks.iter().map(|r| r.unwrap()).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_run_game_deterministic() {
        let a = run_game(&test_board(), 2, 99, 100_000).unwrap();
        let b = run_game(&test_board(), 2, 99, 100_000).unwrap();
        assert_eq!(a.turns, b.turns);
        assert_eq!(a.ranks, b.ranks);
        assert_eq!(a.ladder_hops, b.ladder_hops);
    }

    #[test]
    fn test_turn_cap_marks_stalled() {
        let outcome = run_game(&test_board(), 2, 5, 3).unwrap();
        assert!(outcome.stalled);
        assert_eq!(outcome.turns, 3);
    }

    #[test]
    fn test_sim_accumulates_all_games() {
        let config = SimConfig {
            players: 2,
            games: 20,
            base_seed: 100,
            max_turns: 100_000,
        };
        let stats = run_sim(&test_board(), &config, || {}).unwrap();
        assert_eq!(stats.games, 20);
        assert_eq!(stats.stalled, 0);
        // every game awards exactly one rank-1 finish
        let firsts: u64 = (0..2).map(|p| stats.wins(p)).sum();
        assert_eq!(firsts, 20);
        assert!(stats.mean_turns() > 0.0);
    }

    #[test]
    fn test_stats_merge_matches_sequential() {
        let mut merged = SimStats::new(2);
        let mut sequential = SimStats::new(2);
        let mut halves = (SimStats::new(2), SimStats::new(2));
        for i in 0..10 {
            let outcome = run_game(&test_board(), 2, i, 100_000).unwrap();
            sequential.add(&outcome);
            if i % 2 == 0 {
                halves.0.add(&outcome);
            } else {
                halves.1.add(&outcome);
            }
        }
        merged.merge(&halves.0);
        merged.merge(&halves.1);
        assert_eq!(merged.games, sequential.games);
        assert_eq!(merged.total_turns, sequential.total_turns);
        assert_eq!(merged.rank_counts, sequential.rank_counts);
    }
}
