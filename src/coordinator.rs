//! Top-level game coordinator.
//!
//! Launches the actor fabric, performs the startup handshake, then drives
//! turns either interactively (one per `next` command) or on an autoplay
//! timer. The loop invariant is single-flight: a new advance is never issued
//! before the acknowledgment for the prior one has arrived, which is what
//! keeps the roster single-writer across worker threads.

use crate::actors::{
    ack_link, spawn_renderer, spawn_supervisor, spawn_worker, worker_seed, LinkReceiver,
    ProtocolError, RendererHandle, SharedRoster, SupervisorHandle,
};
use crate::game::{Board, Roster, RosterError};
use std::fmt;
use std::io::{self, BufRead, Write};
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// One line of coordinator input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Advance one turn and wait for the acknowledgment.
    Next,
    /// Set the autoplay interval in milliseconds.
    Delay(u64),
    /// Switch to autoplay, effective from the next loop iteration.
    Autoplay,
    /// End the game immediately.
    Quit,
}

/// An input line that is not a recognized command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadCommand(String);

impl fmt::Display for BadCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown command '{}'", self.0)
    }
}

impl std::error::Error for BadCommand {}

impl Command {
    /// Parse one input line. Empty lines parse to `None` and are ignored;
    /// unrecognized input is a [`BadCommand`], which callers warn about and
    /// ignore. A negative delay clamps to 0.
    ///
    /// # Errors
    ///
    /// Returns [`BadCommand`] for any non-empty line that is not a command.
    pub fn parse(line: &str) -> Result<Option<Self>, BadCommand> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        match line {
            "next" => return Ok(Some(Command::Next)),
            "autoplay" => return Ok(Some(Command::Autoplay)),
            "quit" => return Ok(Some(Command::Quit)),
            _ => {}
        }
        if let Some(rest) = line.strip_prefix("delay ") {
            return match rest.trim().parse::<i64>() {
                #[allow(clippy::cast_sign_loss)]
                Ok(ms) => Ok(Some(Command::Delay(ms.max(0) as u64))),
                Err(_) => Err(BadCommand(line.to_string())),
            };
        }
        Err(BadCommand(line.to_string()))
    }
}

/// Coordinator settings.
#[derive(Debug, Clone, Copy)]
pub struct CoordinatorConfig {
    /// Start in autoplay mode instead of reading commands.
    pub autoplay: bool,
    /// Autoplay interval.
    pub delay: Duration,
    /// Bounded wait for each acknowledgment round-trip.
    pub ack_timeout: Duration,
    /// Game seed; worker dice streams derive from it.
    pub seed: u64,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            autoplay: false,
            delay: Duration::from_millis(1000),
            ack_timeout: Duration::from_secs(10),
            seed: 0,
        }
    }
}

/// Errors that abort the launch before any turn is played.
///
/// All threads spawned up to the failure point are torn down before the
/// error is returned; no partial fabric is left behind.
#[derive(Debug)]
pub enum SetupError {
    /// Invalid player count.
    Roster(RosterError),
    /// A thread could not be spawned.
    Spawn(io::Error),
    /// The startup handshake failed or timed out.
    Handshake(ProtocolError),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::Roster(e) => write!(f, "{e}"),
            SetupError::Spawn(e) => write!(f, "failed to spawn actor thread: {e}"),
            SetupError::Handshake(e) => write!(f, "startup handshake failed: {e}"),
        }
    }
}

impl std::error::Error for SetupError {}

impl From<RosterError> for SetupError {
    fn from(e: RosterError) -> Self {
        SetupError::Roster(e)
    }
}

impl From<io::Error> for SetupError {
    fn from(e: io::Error) -> Self {
        SetupError::Spawn(e)
    }
}

impl From<ProtocolError> for SetupError {
    fn from(e: ProtocolError) -> Self {
        SetupError::Handshake(e)
    }
}

/// Errors that end a running game abnormally.
#[derive(Debug)]
pub enum CoordinatorError {
    /// The acknowledgment round-trip failed.
    Protocol(ProtocolError),
    /// The command input could not be read.
    Input(io::Error),
}

impl fmt::Display for CoordinatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinatorError::Protocol(e) => write!(f, "{e}"),
            CoordinatorError::Input(e) => write!(f, "failed to read command input: {e}"),
        }
    }
}

impl std::error::Error for CoordinatorError {}

impl From<ProtocolError> for CoordinatorError {
    fn from(e: ProtocolError) -> Self {
        CoordinatorError::Protocol(e)
    }
}

/// The running game: launched actors plus the coordinator's own state.
#[derive(Debug)]
pub struct Coordinator {
    roster: SharedRoster,
    supervisor: SupervisorHandle,
    renderer: RendererHandle,
    ack: LinkReceiver,
    config: CoordinatorConfig,
    turns: u32,
}

impl Coordinator {
    /// Launch the actor fabric and complete the startup handshake.
    ///
    /// The handshake is strictly sequential: the renderer announces itself
    /// and acknowledges the initial board before the supervisor is even
    /// spawned, so the original's sleep-ordered FIFO race cannot occur.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] on an invalid player count, a failed thread
    /// spawn, or a broken handshake. Actors spawned before the failure are
    /// terminated and joined.
    pub fn launch(
        board: Board,
        players: u8,
        config: CoordinatorConfig,
        sink: Box<dyn Write + Send>,
    ) -> Result<Self, SetupError> {
        let roster: SharedRoster = Arc::new(RwLock::new(Roster::new(players)?));
        let board = Arc::new(board);
        let (link_tx, link_rx) = ack_link();

        let renderer = spawn_renderer(board.clone(), roster.clone(), sink, link_tx.clone())?;

        let handshake = |link_rx: &LinkReceiver| -> Result<(), ProtocolError> {
            let renderer_id = link_rx.expect_hello(config.ack_timeout)?;
            info!(actor = renderer_id, "renderer connected");
            link_rx.expect_ack(config.ack_timeout)?;
            debug!("initial board acknowledged");
            Ok(())
        };
        if let Err(e) = handshake(&link_rx) {
            renderer.terminate();
            renderer.join();
            return Err(e.into());
        }

        let mut workers = Vec::with_capacity(players as usize);
        for player in 0..players {
            let spawned = spawn_worker(
                player,
                board.clone(),
                roster.clone(),
                renderer.redraw_sender(),
                worker_seed(config.seed, player),
            );
            match spawned {
                Ok(handle) => workers.push(handle),
                Err(e) => {
                    for worker in &workers {
                        worker.terminate();
                    }
                    for worker in workers {
                        worker.join();
                    }
                    renderer.terminate();
                    renderer.join();
                    return Err(e.into());
                }
            }
        }

        let supervisor = match spawn_supervisor(roster.clone(), workers, link_tx) {
            Ok(handle) => handle,
            Err(e) => {
                renderer.terminate();
                renderer.join();
                return Err(e.into());
            }
        };

        let supervisor_id = match link_rx.expect_hello(config.ack_timeout) {
            Ok(id) => id,
            Err(e) => {
                supervisor.terminate();
                supervisor.join();
                renderer.terminate();
                renderer.join();
                return Err(e.into());
            }
        };
        info!(actor = supervisor_id, "turn supervisor connected");

        Ok(Self {
            roster,
            supervisor,
            renderer,
            ack: link_rx,
            config,
            turns: 0,
        })
    }

    /// Players not yet finished.
    #[must_use]
    pub fn active_count(&self) -> u8 {
        self.roster.read().expect("roster lock poisoned").active_count()
    }

    /// A copy of the current roster state.
    #[must_use]
    pub fn snapshot(&self) -> Roster {
        self.roster.read().expect("roster lock poisoned").clone()
    }

    /// Turns dispatched (and acknowledged) so far.
    #[must_use]
    pub fn turns_dispatched(&self) -> u32 {
        self.turns
    }

    /// Dispatch one turn and block until its acknowledgment round-trip
    /// completes. Returns `Ok(false)`, with no side effects, when no active
    /// player remains.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError`] when the acknowledgment stalls, is
    /// malformed, or the fabric has died.
    pub fn advance_turn(&mut self) -> Result<bool, ProtocolError> {
        if self.active_count() == 0 {
            return Ok(false);
        }
        if !self.supervisor.advance() {
            return Err(ProtocolError::Disconnected);
        }
        self.ack.expect_ack(self.config.ack_timeout)?;
        self.turns += 1;
        Ok(true)
    }

    /// Run the command loop until the game ends.
    ///
    /// Returns `true` when every player finished, `false` on `quit` or end
    /// of input. In autoplay mode the loop sleeps for the configured delay
    /// between turns and never returns to interactive input.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorError`] on an input read failure or a fatal
    /// protocol error.
    pub fn run(&mut self, input: &mut dyn BufRead) -> Result<bool, CoordinatorError> {
        let mut autoplay = self.config.autoplay;
        let mut delay = self.config.delay;

        loop {
            if self.active_count() == 0 {
                info!(turns = self.turns, "all players have finished");
                return Ok(true);
            }

            if autoplay {
                thread::sleep(delay);
                if self.active_count() == 0 {
                    info!(turns = self.turns, "all players have finished");
                    return Ok(true);
                }
                self.advance_turn()?;
                continue;
            }

            eprint!("ludo> ");
            let mut line = String::new();
            let read = input.read_line(&mut line).map_err(CoordinatorError::Input)?;
            if read == 0 {
                info!("command input closed");
                return Ok(false);
            }

            match Command::parse(&line) {
                Ok(None) => {}
                Ok(Some(Command::Next)) => {
                    self.advance_turn()?;
                }
                Ok(Some(Command::Delay(ms))) => {
                    delay = Duration::from_millis(ms);
                    info!(delay_ms = ms, "autoplay delay updated");
                }
                Ok(Some(Command::Autoplay)) => {
                    info!(delay_ms = delay.as_millis() as u64, "switching to autoplay");
                    autoplay = true;
                }
                Ok(Some(Command::Quit)) => {
                    info!("quit requested");
                    return Ok(false);
                }
                Err(bad) => warn!(%bad, "ignoring input"),
            }
        }
    }

    /// Orderly shutdown: terminate the supervisor and renderer, then join
    /// them. The supervisor joins its workers before it exits, so when this
    /// returns every thread is gone.
    pub fn shutdown(self) {
        info!("shutting down actors");
        self.supervisor.terminate();
        self.renderer.terminate();
        self.supervisor.join();
        self.renderer.join();
        debug!("shutdown complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("next"), Ok(Some(Command::Next)));
        assert_eq!(Command::parse("autoplay"), Ok(Some(Command::Autoplay)));
        assert_eq!(Command::parse("quit"), Ok(Some(Command::Quit)));
        assert_eq!(Command::parse("delay 250"), Ok(Some(Command::Delay(250))));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(Command::parse("  next \n"), Ok(Some(Command::Next)));
        assert_eq!(Command::parse("\n"), Ok(None));
        assert_eq!(Command::parse(""), Ok(None));
    }

    #[test]
    fn test_parse_clamps_negative_delay() {
        assert_eq!(Command::parse("delay -5"), Ok(Some(Command::Delay(0))));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(Command::parse("nope").is_err());
        assert!(Command::parse("delay").is_err());
        assert!(Command::parse("delay ten").is_err());
    }
}
