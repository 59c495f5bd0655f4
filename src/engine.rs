//! Synchronous turn engine.
//!
//! Drives the same rules as the actor fabric without any threads: one
//! roster, one cursor, one seeded RNG. Backs the TUI viewer, the mass
//! simulator, and tests.

use crate::game::{play_turn, Board, Roster, RosterError, TurnCursor, TurnRecord};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A complete game stepped one turn at a time.
#[derive(Debug, Clone)]
pub struct TurnEngine {
    board: Board,
    roster: Roster,
    cursor: TurnCursor,
    rng: ChaCha8Rng,
    seed: u64,
    turns_played: u32,
}

impl TurnEngine {
    /// Create an engine with every player at home.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError`] when the player count is outside 2..=26.
    pub fn new(board: Board, players: u8, seed: u64) -> Result<Self, RosterError> {
        let roster = Roster::new(players)?;
        Ok(Self {
            board,
            roster,
            cursor: TurnCursor::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            turns_played: 0,
        })
    }

    /// Play the next turn. Returns `None` once no active player remains.
    pub fn advance(&mut self) -> Option<TurnRecord> {
        let player = self.cursor.next_active(&self.roster)?;
        let record = play_turn(&self.board, &mut self.roster, player, &mut self.rng);
        self.turns_played += 1;
        Some(record)
    }

    /// The board in play.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current player state.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The seed this game was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Turns played so far.
    #[must_use]
    pub fn turns_played(&self) -> u32 {
        self.turns_played
    }

    /// Whether every player has finished.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.roster.all_finished()
    }

    /// Reset to the initial state with the original seed.
    pub fn restart(&mut self) {
        let players = self.roster.player_count();
        self.roster = Roster::new(players).expect("player count was already validated");
        self.cursor = TurnCursor::new();
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.turns_played = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::FINISH;

    #[test]
    fn test_engine_runs_to_completion() {
        let board = Board::from_records("L 4 14 L 9 31 S 17 7 S 54 34 E").unwrap();
        let mut engine = TurnEngine::new(board, 2, 42).unwrap();
        for _ in 0..200_000 {
            if engine.advance().is_none() {
                break;
            }
        }
        assert!(engine.is_over());
        assert!(engine.roster().positions().iter().all(|&p| p == FINISH));
        assert_eq!(engine.roster().active_count(), 0);
        // one more advance stays a no-op
        assert!(engine.advance().is_none());
    }

    #[test]
    fn test_engine_is_deterministic() {
        let board = Board::from_records("L 3 20 S 30 12 E").unwrap();
        let mut a = TurnEngine::new(board.clone(), 3, 7).unwrap();
        let mut b = TurnEngine::new(board, 3, 7).unwrap();
        for _ in 0..100 {
            assert_eq!(a.advance(), b.advance());
        }
        assert_eq!(a.roster().positions(), b.roster().positions());
    }

    #[test]
    fn test_restart_replays_identically() {
        let board = Board::from_records("L 3 20 E").unwrap();
        let mut engine = TurnEngine::new(board, 2, 99).unwrap();
        let first: Vec<_> = (0..20).filter_map(|_| engine.advance()).collect();
        engine.restart();
        assert_eq!(engine.turns_played(), 0);
        let second: Vec<_> = (0..20).filter_map(|_| engine.advance()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_finish_is_absorbing() {
        let board = Board::from_records("L 1 100 L 2 100 L 3 100 L 4 100 L 5 100 L 6 100 E")
            .unwrap();
        let mut engine = TurnEngine::new(board, 2, 5).unwrap();
        let mut finished_at: Vec<Option<u32>> = vec![None; 2];
        for _ in 0..100_000 {
            let Some(record) = engine.advance() else { break };
            if record.rank.is_some() {
                finished_at[record.player as usize] = Some(engine.turns_played());
            }
            for player in engine.roster().players() {
                if finished_at[player as usize].is_some() {
                    assert_eq!(engine.roster().position(player), FINISH);
                }
            }
        }
        assert!(engine.is_over());
    }
}
