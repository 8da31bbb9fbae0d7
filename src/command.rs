//! Child-process execution: stream combined output into the frame buffer.
//!
//! One call runs one cycle of the watched command. Both pipes are drained
//! by reader threads as bytes arrive, so partial output repaints before
//! the command finishes; a supervisor thread kills the child if the run
//! is cancelled mid-flight. All transient threads are joined before the
//! call returns.

use crate::buffer::FrameBuffer;
use crate::cancel::CancelToken;
use crate::error::Error;
use crossbeam_channel::{bounded, select};
use std::io;
use std::process::{Child, ChildStderr, ChildStdout, Command, Stdio};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use tracing::debug;

/// Run `argv`, appending its combined stdout/stderr into `buffer` as it
/// is produced, until the child exits or `token` fires.
///
/// A cancelled run is not an error: the child is killed, reaped, and
/// `Ok(())` returned. Launch failure and non-zero exit are errors; the
/// producer formats them into the buffer rather than aborting.
pub fn run_streaming(
    argv: &[String],
    buffer: &FrameBuffer,
    token: &CancelToken,
) -> Result<(), Error> {
    let (program, args) = argv.split_first().ok_or(Error::EmptyCommand)?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| Error::Spawn {
            command: program.clone(),
            source,
        })?;

    debug!(command = %program, pid = child.id(), "command started");

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let readers = spawn_readers(stdout, stderr, buffer);

    // Supervisor: kill the child on cancellation so the pipes close and
    // the readers unblock. `done` releases it once the pipes have
    // drained on their own.
    let child = Arc::new(Mutex::new(child));
    let (done_tx, done_rx) = bounded::<()>(0);
    let supervisor = {
        let child = Arc::clone(&child);
        let cancelled = token.signal();
        thread::Builder::new()
            .name("respin-reaper".to_string())
            .spawn(move || {
                select! {
                    recv(cancelled) -> _ => {
                        let _ = lock(&child).kill();
                    }
                    recv(done_rx) -> _ => {}
                }
            })
            .expect("failed to spawn reaper thread")
    };

    for reader in readers {
        let _ = reader.join();
    }
    // Errs when the supervisor already exited on the cancel arm.
    let _ = done_tx.send(());
    let _ = supervisor.join();

    let status = lock(&child).wait()?;
    debug!(%status, "command finished");

    if token.is_cancelled() || status.success() {
        Ok(())
    } else {
        Err(Error::Exit { status })
    }
}

/// Drain both pipes into the buffer from dedicated threads.
fn spawn_readers(
    stdout: Option<ChildStdout>,
    stderr: Option<ChildStderr>,
    buffer: &FrameBuffer,
) -> Vec<JoinHandle<()>> {
    let mut readers = Vec::with_capacity(2);

    if let Some(mut pipe) = stdout {
        let mut sink = buffer.clone();
        readers.push(
            thread::Builder::new()
                .name("respin-stdout".to_string())
                .spawn(move || {
                    let _ = io::copy(&mut pipe, &mut sink);
                })
                .expect("failed to spawn stdout reader"),
        );
    }

    if let Some(mut pipe) = stderr {
        let mut sink = buffer.clone();
        readers.push(
            thread::Builder::new()
                .name("respin-stderr".to_string())
                .spawn(move || {
                    let _ = io::copy(&mut pipe, &mut sink);
                })
                .expect("failed to spawn stderr reader"),
        );
    }

    readers
}

fn lock(child: &Mutex<Child>) -> std::sync::MutexGuard<'_, Child> {
    child.lock().unwrap_or_else(PoisonError::into_inner)
}
