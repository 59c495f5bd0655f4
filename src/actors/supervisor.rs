//! Turn supervisor actor.
//!
//! Owns the round-robin cursor and the per-player workers. Each `Advance`
//! dispatches exactly one turn; the coordinator's acknowledgment wait keeps
//! at most one move in flight system-wide, so the supervisor itself never
//! has to track completion. On terminate it winds down every worker and
//! joins them before exiting.

use super::{LinkSender, SharedRoster, SupervisorMsg, WorkerHandle, SUPERVISOR_ACTOR};
use crate::game::{symbol, TurnCursor};
use std::io;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// Channel and thread handle for the supervisor.
#[derive(Debug)]
pub struct SupervisorHandle {
    tx: mpsc::Sender<SupervisorMsg>,
    thread: JoinHandle<()>,
}

impl SupervisorHandle {
    /// Request one turn dispatch. Returns false if the supervisor is gone.
    pub(crate) fn advance(&self) -> bool {
        self.tx.send(SupervisorMsg::Advance).is_ok()
    }

    /// Queue the terminate request.
    pub(crate) fn terminate(&self) {
        let _ = self.tx.send(SupervisorMsg::Terminate);
    }

    /// Wait for the supervisor (and transitively its workers) to exit.
    pub(crate) fn join(self) {
        if self.thread.join().is_err() {
            warn!("turn supervisor panicked");
        }
    }
}

/// Spawn the supervisor thread over an already-spawned worker set.
///
/// # Errors
///
/// Returns the OS error if the thread cannot be spawned.
pub fn spawn_supervisor(
    roster: SharedRoster,
    workers: Vec<WorkerHandle>,
    link: LinkSender,
) -> io::Result<SupervisorHandle> {
    let (tx, rx) = mpsc::channel();
    let thread = thread::Builder::new()
        .name("turn-supervisor".to_string())
        .spawn(move || run(&roster, workers, &link, &rx))?;
    Ok(SupervisorHandle { tx, thread })
}

fn run(
    roster: &SharedRoster,
    workers: Vec<WorkerHandle>,
    link: &LinkSender,
    rx: &mpsc::Receiver<SupervisorMsg>,
) {
    link.hello(SUPERVISOR_ACTOR);
    let mut cursor = TurnCursor::new();
    info!(players = workers.len(), "turn supervisor ready");

    while let Ok(msg) = rx.recv() {
        match msg {
            SupervisorMsg::Advance => {
                let next = {
                    let roster = roster.read().expect("roster lock poisoned");
                    cursor.next_active(&roster)
                };
                match next {
                    Some(player) => {
                        debug!(player = %symbol(player), "dispatching turn");
                        if !workers[player as usize].dispatch() {
                            warn!(player = %symbol(player), "worker unreachable, advance dropped");
                        }
                    }
                    // no side effects when nobody is active
                    None => debug!("advance requested with no active players"),
                }
            }
            SupervisorMsg::Terminate => break,
        }
    }

    info!("terminating player workers");
    for worker in &workers {
        worker.terminate();
    }
    for worker in workers {
        worker.join();
    }
    debug!("turn supervisor exiting");
}
