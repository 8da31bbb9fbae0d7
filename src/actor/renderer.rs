//! Renderer actor: repaints whenever the buffer's generation moves.
//!
//! The renderer is the buffer's only reader. It blocks until the
//! generation passes the last frame it painted, snapshots the full
//! content, and draws it; intermediate generations coalesce away while
//! it is busy. It owns the [`Screen`], so the terminal is restored when
//! the role exits.

use crate::buffer::FrameBuffer;
use crate::cancel::CancelToken;
use crate::terminal::Screen;
use std::io;
use std::thread::{self, JoinHandle};
use tracing::{debug, error};

/// Renderer actor that handles terminal output.
pub struct RendererActor {
    /// Handle to the render thread.
    handle: Option<JoinHandle<()>>,
}

impl RendererActor {
    /// Spawn the render thread, taking ownership of the screen.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the thread.
    pub fn spawn(screen: Screen, buffer: FrameBuffer, token: CancelToken) -> Self {
        let handle = thread::Builder::new()
            .name("respin-render".to_string())
            .spawn(move || {
                if let Err(err) = Self::run_loop(screen, &buffer, &token) {
                    error!("render thread failed: {err}");
                    // The display surface is gone; bring the run down.
                    token.cancel();
                }
                debug!("renderer stopped");
            })
            .expect("failed to spawn render thread");

        Self {
            handle: Some(handle),
        }
    }

    /// Wait for the render thread to finish.
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main render loop: wait, snapshot, paint, remember the generation.
    fn run_loop(mut screen: Screen, buffer: &FrameBuffer, token: &CancelToken) -> io::Result<()> {
        let mut generation = 0;
        while let Some(snapshot) = buffer.wait_for_change(generation, token) {
            screen.draw(&snapshot.text)?;
            generation = snapshot.generation;
        }
        Ok(())
    }
}
