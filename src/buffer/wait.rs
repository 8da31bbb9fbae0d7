//! A condition-variable block that a [`CancelToken`] can interrupt.
//!
//! The source of truth for "did anything happen" lives under the mutex
//! that `shared` carries; this function only answers "blocked until
//! notified, or until the token fired, whichever came first" without ever
//! losing a wakeup or leaving waiter state behind.

use crate::cancel::CancelToken;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

/// A lock paired with the condvar that announces changes to it.
pub(crate) type SharedState<T> = Arc<(Mutex<T>, Condvar)>;

/// Block on `shared`'s condvar until it is notified or `token` fires.
///
/// The caller passes the guard it holds for `shared`'s own mutex; the
/// lock is released for the duration of the block and reacquired before
/// returning. The boolean is `true` when the condvar was notified before
/// cancellation, `false` when the token fired first; when the two race,
/// either answer is possible and callers must re-check their predicate.
///
/// `token.cancel()` must never run on a thread that holds `shared`'s
/// mutex: the wake hook registered here acquires it.
pub(crate) fn wait_or_cancel<'a, T: Send + 'static>(
    shared: &'a SharedState<T>,
    guard: MutexGuard<'a, T>,
    token: &CancelToken,
) -> (MutexGuard<'a, T>, bool) {
    // Register the wake hook before checking the flag, so a cancellation
    // landing between the check and the block still notifies us. The hook
    // takes the mutex first: that orders its notify after this thread has
    // atomically released the lock inside `wait`.
    let _wake = token.add_hook({
        let shared = Arc::clone(shared);
        move || {
            let _held = shared.0.lock().unwrap_or_else(PoisonError::into_inner);
            shared.1.notify_all();
        }
    });

    // Cancellations before the hook registration never invoke it; this
    // check covers them.
    if token.is_cancelled() {
        return (guard, false);
    }

    let guard = shared.1.wait(guard).unwrap_or_else(PoisonError::into_inner);
    let notified = !token.is_cancelled();
    (guard, notified)
}
