//! Event watcher: resizes force a repaint, quit keys end the run.
//!
//! Raw mode routes what would otherwise be SIGWINCH and SIGINT through
//! the crossterm event stream, so this role doubles as the run's
//! cancellation source. A resize is treated purely as "redraw needed";
//! the renderer re-queries the geometry itself.

use crate::buffer::FrameBuffer;
use crate::cancel::CancelToken;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

/// How long each poll waits for an event before re-checking the token.
const POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Event actor that watches the terminal event stream.
pub struct EventActor {
    /// Handle to the event thread.
    handle: Option<JoinHandle<()>>,
}

impl EventActor {
    /// Spawn the event thread.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the thread.
    pub fn spawn(buffer: FrameBuffer, token: CancelToken) -> Self {
        let handle = thread::Builder::new()
            .name("respin-events".to_string())
            .spawn(move || {
                Self::run_loop(&buffer, &token);
                debug!("event watcher stopped");
            })
            .expect("failed to spawn event thread");

        Self {
            handle: Some(handle),
        }
    }

    /// Wait for the event thread to finish.
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main event polling loop.
    fn run_loop(buffer: &FrameBuffer, token: &CancelToken) {
        loop {
            if token.is_cancelled() {
                return;
            }

            match event::poll(POLL_TIMEOUT) {
                Ok(true) => match event::read() {
                    Ok(Event::Resize(width, height)) => {
                        debug!(width, height, "terminal resized");
                        buffer.bump();
                    }
                    Ok(Event::Key(key)) if is_quit(&key) => {
                        debug!("quit requested");
                        token.cancel();
                        return;
                    }
                    Ok(_) => {}
                    Err(err) => warn!("event read failed: {err}"),
                },
                Ok(false) => {
                    // Timeout; loop again to check the token.
                }
                Err(err) => warn!("event poll failed: {err}"),
            }
        }
    }
}

/// `q`, `Esc`, or `Ctrl-C` ends the run.
fn is_quit(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
