//! Property-based tests for the movement core.
//!
//! These tests verify the board invariant, the dice protocol, resolver
//! bounds, and the roster's active-count accounting.
//! Run with: cargo test --release prop_game

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use ludo::game::{resolve, Board, DiceRoll, Roster, TurnCursor, Verdict, FINISH};
use ludo::TurnEngine;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Strategy for a syntactically valid board definition.
fn board_records() -> impl Strategy<Value = String> {
    prop::collection::vec((1u8..=100, 1u8..=100), 0..20).prop_map(|pairs| {
        let mut text = String::new();
        for (a, b) in pairs {
            if a == b {
                continue;
            }
            let (from, to) = (a, b);
            if to > from {
                text.push_str(&format!("L {from} {to}\n"));
            } else {
                text.push_str(&format!("S {from} {to}\n"));
            }
        }
        text.push('E');
        text
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// Every parsed board satisfies the target invariant.
    #[test]
    fn prop_board_targets_in_range(records in board_records()) {
        let board = Board::from_records(&records).unwrap();
        for cell in 1..=FINISH {
            if let Some((target, _)) = board.jump(cell) {
                prop_assert!((1..=FINISH).contains(&target));
            }
        }
    }

    /// The resolver never leaves the board and never moves a rejected
    /// player, on any valid board including effect loops.
    #[test]
    fn prop_resolver_bounded(
        records in board_records(),
        from in 0u8..=99,
        total in 0u8..=18,
    ) {
        let board = Board::from_records(&records).unwrap();
        let resolution = resolve(&board, from, total, |_| false);
        prop_assert!(resolution.to <= FINISH);
        if resolution.verdict != Verdict::Moved {
            prop_assert_eq!(resolution.to, from);
            prop_assert!(resolution.hops.is_empty());
        }
        // the cycle guard bounds the chain by the board size
        prop_assert!(resolution.hops.len() <= 100);
    }

    /// With occupancy, a rejected landing never moves the player and a
    /// halted chain still keeps all prior hops.
    #[test]
    fn prop_resolver_occupancy(
        records in board_records(),
        from in 0u8..=99,
        total in 1u8..=18,
        occupied_cell in 1u8..=99,
    ) {
        let board = Board::from_records(&records).unwrap();
        let resolution = resolve(&board, from, total, |cell| cell == occupied_cell);
        match resolution.verdict {
            Verdict::Occupied => prop_assert_eq!(resolution.to, from),
            Verdict::Moved => {
                prop_assert_ne!(resolution.to, occupied_cell,
                    "a player may never rest on an occupied cell");
            }
            _ => {}
        }
    }

    /// Dice totals follow the protocol: sum of rolls, except three 6s
    /// cancel to 0.
    #[test]
    fn prop_dice_totals(seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let roll = DiceRoll::roll(&mut rng);
        let sum: u8 = roll.rolls().iter().sum();
        if roll.is_cancelled() {
            prop_assert_eq!(roll.rolls(), &[6, 6, 6]);
            prop_assert_eq!(roll.total(), 0);
        } else {
            prop_assert_eq!(roll.total(), sum);
            // the run stops at the first non-6
            let last = *roll.rolls().last().unwrap();
            prop_assert_ne!(last, 6);
        }
    }

    /// The round-robin cursor never selects a finished player and returns
    /// `None` exactly when everyone has finished.
    #[test]
    fn prop_cursor_skips_finished(
        players in 2u8..=26,
        finished_mask in any::<u32>(),
        laps in 1usize..=8,
    ) {
        let mut roster = Roster::new(players).unwrap();
        for p in 0..players {
            if (finished_mask & (1 << u32::from(p))) != 0 {
                roster.commit(p, 100);
            }
        }
        let mut cursor = TurnCursor::new();
        for _ in 0..laps * usize::from(players) {
            match cursor.next_active(&roster) {
                Some(p) => prop_assert!(!roster.is_finished(p)),
                None => prop_assert!(roster.all_finished()),
            }
        }
    }

    /// Across a whole game: the finish is absorbing, positions stay on the
    /// board, and the active count always matches the positions.
    #[test]
    fn prop_engine_invariants(seed in any::<u64>(), players in 2u8..=6) {
        let board = Board::from_records("L 4 14 L 40 59 S 17 7 S 54 34 E").unwrap();
        let mut engine = TurnEngine::new(board, players, seed).unwrap();
        let mut finished = vec![false; players as usize];

        for _ in 0..2000 {
            let Some(record) = engine.advance() else { break };
            let roster = engine.roster();

            prop_assert!(roster.positions().iter().all(|&p| p <= 100));
            let unfinished =
                roster.positions().iter().filter(|&&p| p != 100).count();
            prop_assert_eq!(usize::from(roster.active_count()), unfinished);

            if record.rank.is_some() {
                finished[record.player as usize] = true;
            }
            for p in 0..players {
                if finished[p as usize] {
                    prop_assert_eq!(roster.position(p), 100);
                }
            }
        }
    }

    /// On a ladder-only board positions never decrease.
    #[test]
    fn prop_ladders_never_move_backwards(seed in any::<u64>()) {
        let board = Board::from_records("L 4 14 L 9 31 L 40 59 L 71 91 E").unwrap();
        let mut engine = TurnEngine::new(board, 2, seed).unwrap();
        let mut previous = engine.roster().positions().to_vec();

        for _ in 0..2000 {
            if engine.advance().is_none() {
                break;
            }
            let current = engine.roster().positions().to_vec();
            for (before, after) in previous.iter().zip(&current) {
                prop_assert!(after >= before);
            }
            previous = current;
        }
    }
}
