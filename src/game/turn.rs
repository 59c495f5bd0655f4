//! Round-robin turn order and per-turn move logic.

use crate::game::{resolve, Board, DiceRoll, PlayerId, Resolution, Roster, Verdict, FINISH};
use rand::Rng;

/// Round-robin cursor over active players.
///
/// Owned by the turn supervisor; remembers the most recently dispatched
/// player and scans at most one full lap for the next active one.
#[derive(Debug, Clone, Default)]
pub struct TurnCursor {
    last: Option<PlayerId>,
}

impl TurnCursor {
    /// A cursor that starts before the first player.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently dispatched player.
    #[must_use]
    pub fn last_dispatched(&self) -> Option<PlayerId> {
        self.last
    }

    /// Select the next active player, starting just after the previous
    /// selection and skipping anyone at the finish. Returns `None` when no
    /// active player remains after scanning every candidate once.
    pub fn next_active(&mut self, roster: &Roster) -> Option<PlayerId> {
        let n = roster.player_count();
        let start = self.last.map_or(0, |p| (p + 1) % n);
        for step in 0..n {
            let candidate = (start + step) % n;
            if !roster.is_finished(candidate) {
                self.last = Some(candidate);
                return Some(candidate);
            }
        }
        None
    }
}

/// Everything that happened in one dispatched turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRecord {
    /// The player the turn was dispatched to.
    pub player: PlayerId,
    /// Position before the turn.
    pub at: u8,
    /// The dice thrown; `None` for the no-op turn of a finished player.
    pub roll: Option<DiceRoll>,
    /// The resolved move; `None` for a no-op turn.
    pub resolution: Option<Resolution>,
    /// Finishing rank earned this turn, if the player reached 100.
    pub rank: Option<u8>,
}

impl TurnRecord {
    /// Whether this was a finished player's no-op turn.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.roll.is_none()
    }
}

/// Play one turn for `player`: roll, resolve, and commit the result.
///
/// A player already at the finish takes a no-op turn; this covers a player
/// that finished but is still addressable before the supervisor's
/// bookkeeping catches up. Every call yields a record, including rejected
/// moves, so the caller always has something to render and acknowledge.
pub fn play_turn(
    board: &Board,
    roster: &mut Roster,
    player: PlayerId,
    rng: &mut impl Rng,
) -> TurnRecord {
    let at = roster.position(player);
    if at == FINISH {
        return TurnRecord {
            player,
            at,
            roll: None,
            resolution: None,
            rank: None,
        };
    }

    let roll = DiceRoll::roll(rng);
    let resolution = resolve(board, at, roll.total(), |cell| {
        roster.is_occupied(cell, player)
    });
    let rank = if resolution.verdict == Verdict::Moved {
        roster.commit(player, resolution.to)
    } else {
        None
    };

    TurnRecord {
        player,
        at,
        roll: Some(roll),
        resolution: Some(resolution),
        rank,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_cursor_round_robin() {
        let roster = Roster::new(3).unwrap();
        let mut cursor = TurnCursor::new();
        assert_eq!(cursor.next_active(&roster), Some(0));
        assert_eq!(cursor.next_active(&roster), Some(1));
        assert_eq!(cursor.next_active(&roster), Some(2));
        assert_eq!(cursor.next_active(&roster), Some(0));
    }

    #[test]
    fn test_cursor_skips_finished() {
        let mut roster = Roster::new(3).unwrap();
        roster.commit(1, 100);
        let mut cursor = TurnCursor::new();
        assert_eq!(cursor.next_active(&roster), Some(0));
        assert_eq!(cursor.next_active(&roster), Some(2));
        assert_eq!(cursor.next_active(&roster), Some(0));
    }

    #[test]
    fn test_cursor_exhausted() {
        let mut roster = Roster::new(2).unwrap();
        roster.commit(0, 100);
        roster.commit(1, 100);
        let mut cursor = TurnCursor::new();
        assert_eq!(cursor.next_active(&roster), None);
        // requests after exhaustion stay no-ops
        assert_eq!(cursor.next_active(&roster), None);
    }

    #[test]
    fn test_play_turn_commits_resolution() {
        let board = Board::empty();
        let mut roster = Roster::new(2).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let record = play_turn(&board, &mut roster, 0, &mut rng);
        let resolution = record.resolution.as_ref().expect("rolled turn has a resolution");
        assert_eq!(roster.position(0), resolution.to);
        assert_eq!(record.at, 0);
        assert!(!record.is_noop());
    }

    #[test]
    fn test_play_turn_noop_when_finished() {
        let board = Board::empty();
        let mut roster = Roster::new(2).unwrap();
        roster.commit(0, 100);
        let active_before = roster.active_count();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let record = play_turn(&board, &mut roster, 0, &mut rng);
        assert!(record.is_noop());
        assert_eq!(roster.position(0), 100);
        assert_eq!(roster.active_count(), active_before);
    }

    #[test]
    fn test_play_turn_reports_rank() {
        let board = Board::from_records("L 1 100 L 2 100 L 3 100 L 4 100 L 5 100 L 6 100 E")
            .unwrap();
        let mut roster = Roster::new(2).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        // a first roll of 1..=6 rides a ladder straight to 100
        let mut turns = 0;
        while roster.rank(0).is_none() {
            let record = play_turn(&board, &mut roster, 0, &mut rng);
            if let Some(rank) = record.rank {
                assert_eq!(rank, 1);
            }
            turns += 1;
            assert!(turns < 1000, "player never finished");
        }
        assert_eq!(roster.active_count(), 1);
    }
}
