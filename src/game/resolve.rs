//! Movement resolution.
//!
//! Pure functions from a position and a dice total to the resting cell. The
//! caller owns the state write; nothing here mutates game state.

use crate::game::{Board, EffectKind, BOARD_CELLS, FINISH};

/// One ladder or snake transition taken during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hop {
    /// Cell the effect fired on.
    pub from: u8,
    /// Cell the effect moved the player to.
    pub to: u8,
    /// Ladder or snake.
    pub kind: EffectKind,
}

/// How a move request was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The move was applied (possibly through an effect chain).
    Moved,
    /// The roll was cancelled (three 6s), nothing happened.
    Cancelled,
    /// The dice total would carry the player past 100.
    Overshoot,
    /// The landing cell is occupied by another player.
    Occupied,
}

/// Outcome of resolving one move request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Position before the move.
    pub from: u8,
    /// Resting position after the move; equals `from` for rejected moves.
    pub to: u8,
    /// Effect transitions taken, in order.
    pub hops: Vec<Hop>,
    /// Cell an effect would have entered when the chain was halted by
    /// occupancy; prior hops stand.
    pub halted_at: Option<u8>,
    /// How the request was settled.
    pub verdict: Verdict,
}

impl Resolution {
    fn rejected(from: u8, verdict: Verdict) -> Self {
        Self {
            from,
            to: from,
            hops: Vec::new(),
            halted_at: None,
            verdict,
        }
    }

    /// Whether the player actually changed cell.
    #[must_use]
    pub fn moved(&self) -> bool {
        self.verdict == Verdict::Moved && self.to != self.from
    }
}

/// Resolve one move request.
///
/// `occupied` reports whether a cell holds a different player; it is only
/// consulted for cells 1..=99 (home and finish are never exclusive). The
/// effect chain is followed until a neutral cell, an occupied target, or a
/// cell already visited in this resolution (cycle guard for effect-loop
/// boards such as `L 3 7` + `S 7 3`), so it terminates in at most 100 steps.
pub fn resolve(
    board: &Board,
    from: u8,
    dice_total: u8,
    occupied: impl Fn(u8) -> bool,
) -> Resolution {
    debug_assert!(from < FINISH, "finished players do not move");
    debug_assert!(dice_total <= 18, "dice total out of protocol range");

    if dice_total == 0 {
        return Resolution::rejected(from, Verdict::Cancelled);
    }

    let landing = u16::from(from) + u16::from(dice_total);
    if landing > u16::from(FINISH) {
        return Resolution::rejected(from, Verdict::Overshoot);
    }
    #[allow(clippy::cast_possible_truncation)]
    let landing = landing as u8;

    let blocked = |cell: u8| (1..FINISH).contains(&cell) && occupied(cell);
    if blocked(landing) {
        return Resolution::rejected(from, Verdict::Occupied);
    }

    let mut pos = landing;
    let mut hops = Vec::new();
    let mut halted_at = None;
    let mut visited = [false; BOARD_CELLS];

    while pos >= 1 && pos < FINISH && !visited[pos as usize] {
        visited[pos as usize] = true;
        let Some((target, kind)) = board.jump(pos) else {
            break;
        };
        if blocked(target) {
            halted_at = Some(target);
            break;
        }
        hops.push(Hop {
            from: pos,
            to: target,
            kind,
        });
        pos = target;
    }

    Resolution {
        from,
        to: pos,
        hops,
        halted_at,
        verdict: Verdict::Moved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn free(_cell: u8) -> bool {
        false
    }

    #[test]
    fn test_plain_move() {
        let board = Board::empty();
        let res = resolve(&board, 10, 5, free);
        assert_eq!(res.to, 15);
        assert_eq!(res.verdict, Verdict::Moved);
        assert!(res.hops.is_empty());
        assert!(res.moved());
    }

    #[test]
    fn test_cancelled_roll() {
        let board = Board::empty();
        let res = resolve(&board, 10, 0, free);
        assert_eq!(res.to, 10);
        assert_eq!(res.verdict, Verdict::Cancelled);
        assert!(!res.moved());
    }

    #[test]
    fn test_overshoot_at_98() {
        let board = Board::empty();
        let res = resolve(&board, 98, 5, free);
        assert_eq!(res.to, 98);
        assert_eq!(res.verdict, Verdict::Overshoot);
    }

    #[test]
    fn test_exact_finish() {
        let board = Board::empty();
        let res = resolve(&board, 98, 2, free);
        assert_eq!(res.to, 100);
        assert_eq!(res.verdict, Verdict::Moved);
    }

    #[test]
    fn test_occupied_landing_rejected() {
        let board = Board::empty();
        let res = resolve(&board, 10, 4, |cell| cell == 14);
        assert_eq!(res.to, 10);
        assert_eq!(res.verdict, Verdict::Occupied);
    }

    #[test]
    fn test_finish_never_occupied() {
        let board = Board::empty();
        // another player "at" 100 never blocks the landing check
        let res = resolve(&board, 98, 2, |cell| cell == 100);
        assert_eq!(res.to, 100);
        assert_eq!(res.verdict, Verdict::Moved);
    }

    #[test]
    fn test_ladder_chain() {
        let board = Board::from_records("L 3 20 E").unwrap();
        let res = resolve(&board, 1, 2, free);
        assert_eq!(res.to, 20);
        assert_eq!(
            res.hops,
            vec![Hop {
                from: 3,
                to: 20,
                kind: EffectKind::Ladder
            }]
        );
    }

    #[test]
    fn test_chained_effects() {
        let board = Board::from_records("L 5 30 S 30 12 E").unwrap();
        let res = resolve(&board, 2, 3, free);
        assert_eq!(res.to, 12);
        assert_eq!(res.hops.len(), 2);
        assert_eq!(res.hops[1].kind, EffectKind::Snake);
    }

    #[test]
    fn test_chain_halts_on_occupied_target() {
        let board = Board::from_records("L 5 30 S 30 12 E").unwrap();
        let res = resolve(&board, 2, 3, |cell| cell == 12);
        // the first hop stands, the snake is not taken
        assert_eq!(res.to, 30);
        assert_eq!(res.hops.len(), 1);
        assert_eq!(res.halted_at, Some(12));
        assert_eq!(res.verdict, Verdict::Moved);
    }

    #[test]
    fn test_cycle_guard_terminates() {
        let board = Board::from_records("L 3 7 S 7 3 E").unwrap();
        let res = resolve(&board, 1, 2, free);
        // lands on 3, rides the loop once, stops on the revisit
        assert_eq!(res.verdict, Verdict::Moved);
        assert!(res.to == 3 || res.to == 7);
        assert!(res.hops.len() <= 2);
    }

    #[test]
    fn test_chain_to_finish() {
        let board = Board::from_records("L 97 100 E").unwrap();
        let res = resolve(&board, 95, 2, free);
        assert_eq!(res.to, 100);
    }

    #[test]
    fn test_chain_can_return_to_start() {
        let board = Board::from_records("L 3 7 S 7 3 E").unwrap();
        // from 3, a roll of 4 lands on 7 and the snake slides back to 3;
        // the occupancy closure excludes the mover itself
        let res = resolve(&board, 3, 4, free);
        assert_eq!(res.to, 3);
        assert_eq!(res.verdict, Verdict::Moved);
        assert!(!res.moved());
    }
}
