//! Player worker actor.
//!
//! One worker per player. A worker blocks on its channel until the
//! supervisor dispatches a turn, plays it under the roster write lock, and
//! hands the record to the renderer. The worker never initiates anything on
//! its own; the single-flight dispatch makes it the sole roster writer for
//! the duration of its turn.

use super::{RenderMsg, SharedRoster, WorkerMsg};
use crate::game::{play_turn, symbol, Board, PlayerId};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// Channel and thread handle for one player worker.
#[derive(Debug)]
pub struct WorkerHandle {
    player: PlayerId,
    tx: mpsc::Sender<WorkerMsg>,
    thread: JoinHandle<()>,
}

impl WorkerHandle {
    /// The player this worker owns.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Dispatch one turn. Returns false if the worker is gone.
    pub(crate) fn dispatch(&self) -> bool {
        self.tx.send(WorkerMsg::TakeTurn).is_ok()
    }

    /// Queue the terminate request.
    pub(crate) fn terminate(&self) {
        let _ = self.tx.send(WorkerMsg::Terminate);
    }

    /// Wait for the worker thread to exit.
    pub(crate) fn join(self) {
        if self.thread.join().is_err() {
            warn!(player = %symbol(self.player), "player worker panicked");
        }
    }
}

/// Spawn the worker thread for one player.
///
/// # Errors
///
/// Returns the OS error if the thread cannot be spawned.
pub fn spawn_worker(
    player: PlayerId,
    board: Arc<Board>,
    roster: SharedRoster,
    render_tx: mpsc::Sender<RenderMsg>,
    seed: u64,
) -> io::Result<WorkerHandle> {
    let (tx, rx) = mpsc::channel();
    let thread = thread::Builder::new()
        .name(format!("player-{}", symbol(player)))
        .spawn(move || run(player, &board, &roster, &render_tx, &rx, seed))?;
    Ok(WorkerHandle { player, tx, thread })
}

fn run(
    player: PlayerId,
    board: &Board,
    roster: &SharedRoster,
    render_tx: &mpsc::Sender<RenderMsg>,
    rx: &mpsc::Receiver<WorkerMsg>,
    seed: u64,
) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    debug!(player = %symbol(player), "worker ready");

    // a dropped sender counts as terminate
    while let Ok(msg) = rx.recv() {
        match msg {
            WorkerMsg::TakeTurn => {
                let record = {
                    let mut roster = roster.write().expect("roster lock poisoned");
                    play_turn(board, &mut roster, player, &mut rng)
                };
                if let Some(rank) = record.rank {
                    info!(player = %symbol(player), rank, "player reached the finish");
                }
                // the redraw request doubles as the move-completed event;
                // the renderer acknowledges the coordinator afterwards
                if render_tx.send(RenderMsg::Redraw(record)).is_err() {
                    break;
                }
            }
            WorkerMsg::Terminate => break,
        }
    }

    debug!(player = %symbol(player), "worker exiting");
}
