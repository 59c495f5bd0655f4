//! Actor fabric for the live game.
//!
//! Each actor runs on its own thread and communicates through typed
//! [`std::sync::mpsc`] channels; the original design's out-of-band signals
//! become explicit messages with queue ordering. The roster is the only
//! state shared across threads, and the supervisor's single-flight dispatch
//! keeps it single-writer at any instant.
//!
//! ```text
//! Coordinator --Advance--> Supervisor --TakeTurn--> Worker (per player)
//!      ^                                               |
//!      |                                          Redraw(record)
//!      +------ACK------- Renderer <--------------------+
//! ```

mod link;
mod renderer;
mod supervisor;
mod worker;

pub use link::{ack_link, LinkReceiver, LinkSender, ProtocolError, ACK};
pub use renderer::{spawn_renderer, RendererHandle};
pub use supervisor::{spawn_supervisor, SupervisorHandle};
pub use worker::{spawn_worker, WorkerHandle};

use crate::game::{PlayerId, Roster, TurnRecord};
use std::sync::{Arc, RwLock};

/// The roster shared across actors.
///
/// The lock is uncontended by construction: only the single dispatched
/// worker writes, and readers run between turns.
pub type SharedRoster = Arc<RwLock<Roster>>;

/// Link identity announced by the renderer.
pub const RENDERER_ACTOR: u32 = 1;

/// Link identity announced by the turn supervisor.
pub const SUPERVISOR_ACTOR: u32 = 2;

/// Messages accepted by the turn supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorMsg {
    /// Dispatch one turn to the next active player.
    Advance,
    /// Shut down, terminating and joining every worker first.
    Terminate,
}

/// Messages accepted by a player worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WorkerMsg {
    /// Play one turn.
    TakeTurn,
    /// Exit the worker loop.
    Terminate,
}

/// Messages accepted by the renderer.
#[derive(Debug, Clone)]
pub enum RenderMsg {
    /// Redraw after the given turn; doubles as the move-completed event.
    Redraw(TurnRecord),
    /// Exit the renderer loop.
    Terminate,
}

/// Derive a worker's dice seed from the game seed.
///
/// Same constant as a golden-ratio sequence split so sibling workers never
/// share a stream.
#[must_use]
pub fn worker_seed(base: u64, player: PlayerId) -> u64 {
    base.wrapping_add((u64::from(player) + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}
