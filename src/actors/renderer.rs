//! Renderer actor.
//!
//! Draws the board into an injected sink on every redraw request and
//! acknowledges the coordinator over the link once the drawing is done.
//! The acknowledgment is what releases the next turn, so the renderer acks
//! even when the sink itself fails.

use super::{LinkSender, RenderMsg, SharedRoster, RENDERER_ACTOR};
use crate::game::{Board, TurnRecord};
use crate::render::{board_grid, narrate};
use std::io::{self, Write};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Channel and thread handle for the renderer.
#[derive(Debug)]
pub struct RendererHandle {
    tx: mpsc::Sender<RenderMsg>,
    thread: JoinHandle<()>,
}

impl RendererHandle {
    /// A sender workers use to request redraws.
    #[must_use]
    pub fn redraw_sender(&self) -> mpsc::Sender<RenderMsg> {
        self.tx.clone()
    }

    /// Queue the terminate request.
    pub(crate) fn terminate(&self) {
        let _ = self.tx.send(RenderMsg::Terminate);
    }

    /// Wait for the renderer thread to exit.
    pub(crate) fn join(self) {
        if self.thread.join().is_err() {
            warn!("renderer panicked");
        }
    }
}

/// Spawn the renderer thread.
///
/// The renderer announces itself on the link, draws the initial board and
/// acknowledges it before the first turn is ever dispatched.
///
/// # Errors
///
/// Returns the OS error if the thread cannot be spawned.
pub fn spawn_renderer(
    board: Arc<Board>,
    roster: SharedRoster,
    sink: Box<dyn Write + Send>,
    link: LinkSender,
) -> io::Result<RendererHandle> {
    let (tx, rx) = mpsc::channel();
    let thread = thread::Builder::new()
        .name("renderer".to_string())
        .spawn(move || run(&board, &roster, sink, &link, &rx))?;
    Ok(RendererHandle { tx, thread })
}

fn run(
    board: &Board,
    roster: &SharedRoster,
    mut sink: Box<dyn Write + Send>,
    link: &LinkSender,
    rx: &mpsc::Receiver<RenderMsg>,
) {
    link.hello(RENDERER_ACTOR);
    draw(&mut sink, board, roster, None);
    link.ack();
    debug!("renderer ready");

    while let Ok(msg) = rx.recv() {
        match msg {
            RenderMsg::Redraw(record) => {
                draw(&mut sink, board, roster, Some(&record));
                link.ack();
            }
            RenderMsg::Terminate => break,
        }
    }

    debug!("renderer exiting");
}

fn draw(
    sink: &mut Box<dyn Write + Send>,
    board: &Board,
    roster: &SharedRoster,
    record: Option<&TurnRecord>,
) {
    let text = {
        let roster = roster.read().expect("roster lock poisoned");
        let mut text = String::new();
        if let Some(record) = record {
            for line in narrate(record) {
                text.push_str(&line);
                text.push('\n');
            }
        }
        text.push_str(&board_grid(board, &roster));
        text.push('\n');
        text
    };

    if let Err(e) = sink.write_all(text.as_bytes()).and_then(|()| sink.flush()) {
        warn!(error = %e, "renderer sink write failed");
    }
}
