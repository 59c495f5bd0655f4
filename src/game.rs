//! Game rules for Snakes & Ladders.
//!
//! Implements the movement core:
//! - Board with per-cell ladder/snake effects
//! - Player roster (positions, active count, finishing ranks)
//! - Dice protocol (chained 6s, three-6 cancellation)
//! - Movement resolution (overshoot, occupancy, effect chains)
//! - Round-robin turn order

mod board;
mod dice;
mod resolve;
mod roster;
mod turn;

pub use board::{Board, BoardError, EffectKind, BOARD_CELLS, FINISH, HOME};
pub use dice::{DiceRoll, DIE_MAX};
pub use resolve::{resolve, Hop, Resolution, Verdict};
pub use roster::{symbol, PlayerId, Roster, RosterError, MAX_PLAYERS, MIN_PLAYERS};
pub use turn::{play_turn, TurnCursor, TurnRecord};
