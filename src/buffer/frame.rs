//! `FrameBuffer`: the single piece of shared mutable state in a run.
//!
//! The producer clears it and appends command output; the renderer blocks
//! until the generation moves past what it last painted; the event
//! watcher bumps the generation to force a repaint without new data.

use super::wait::{wait_or_cancel, SharedState};
use crate::cancel::CancelToken;
use std::io::{self, Write};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct State {
    data: Vec<u8>,
    generation: u64,
}

/// A generation-counted byte accumulator shared by the pipeline roles.
///
/// Every mutation holds one mutex, advances the generation by exactly
/// one, and broadcasts the paired condvar. Cloning is cheap and yields a
/// handle to the same buffer.
#[derive(Clone)]
pub struct FrameBuffer {
    shared: SharedState<State>,
}

/// An owned copy of the buffer at some generation.
///
/// Never a live view: later mutations do not affect an issued snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// The accumulated content, with invalid UTF-8 replaced.
    pub text: String,
    /// The generation the content was copied at.
    pub generation: u64,
}

impl FrameBuffer {
    /// Create an empty buffer at generation 0.
    pub fn new() -> Self {
        Self {
            shared: Arc::new((Mutex::new(State::default()), Condvar::new())),
        }
    }

    /// Append bytes and wake all waiters.
    pub fn append(&self, bytes: &[u8]) {
        let mut state = self.lock();
        state.data.extend_from_slice(bytes);
        state.generation += 1;
        self.shared.1.notify_all();
    }

    /// Truncate the content to empty (keeping capacity) and wake all
    /// waiters. Each cycle's output fully replaces the previous cycle's.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.data.clear();
        state.generation += 1;
        self.shared.1.notify_all();
    }

    /// Advance the generation without touching the content, waking all
    /// waiters. Forces a repaint of whatever is already there.
    pub fn bump(&self) {
        let mut state = self.lock();
        state.generation += 1;
        self.shared.1.notify_all();
    }

    /// The current generation.
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Block until the generation exceeds `last_seen`, then return an
    /// owned snapshot, or `None` if `token` fired first.
    ///
    /// The returned generation is always `> last_seen`. Intermediate
    /// generations may be skipped: the snapshot reflects the content at
    /// wake time, and only the latest state matters.
    pub fn wait_for_change(&self, last_seen: u64, token: &CancelToken) -> Option<Snapshot> {
        let mut state = self.lock();
        while state.generation <= last_seen {
            let (reacquired, notified) = wait_or_cancel(&self.shared, state, token);
            if !notified {
                return None;
            }
            state = reacquired;
        }
        Some(Snapshot {
            text: String::from_utf8_lossy(&state.data).into_owned(),
            generation: state.generation,
        })
    }

    /// Lock the state, absorbing poisoning so one panicked role cannot
    /// wedge the others during teardown.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.shared.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Lets child-process output stream straight into the buffer.
impl Write for FrameBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("FrameBuffer")
            .field("generation", &state.generation)
            .field("len", &state.data.len())
            .finish()
    }
}
