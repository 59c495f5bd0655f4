// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Ludo: a turn-coordinated Snakes & Ladders engine.
//!
//! The crate separates the movement rules from the machinery that runs
//! them:
//! - Pure game rules (board effects, dice protocol, movement resolution,
//!   round-robin order)
//! - A synchronous [`TurnEngine`] for viewers, simulation and tests
//! - An actor fabric (coordinator, turn supervisor, per-player workers,
//!   renderer) for the live game, where every turn is gated on a renderer
//!   acknowledgment round-trip
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │   Coordinator (commands, autoplay)   │
//! ├──────────────────────────────────────┤
//! │  Turn Supervisor ─► Player Workers   │
//! ├──────────────────────────────────────┤
//! │   Roster / Board / Move Resolution   │
//! ├──────────────────────────────────────┤
//! │        Renderer (ack round-trip)     │
//! └──────────────────────────────────────┘
//! ```

pub mod actors;
pub mod coordinator;
pub mod engine;
pub mod game;
pub mod render;
pub mod sim;

pub use coordinator::{Command, Coordinator, CoordinatorConfig, CoordinatorError, SetupError};
pub use engine::TurnEngine;

// Re-export key game types at crate root for convenience
pub use game::{
    Board, BoardError, DiceRoll, PlayerId, Resolution, Roster, RosterError, TurnRecord, Verdict,
};
