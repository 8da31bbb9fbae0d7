//! Cancellation: one shared token observed by every blocking role.
//!
//! The token is observable three ways, one per kind of suspension point
//! in the pipeline:
//!
//! - [`CancelToken::is_cancelled`]: a flag check for loop conditions
//! - [`CancelToken::signal`]: a channel that disconnects on cancellation,
//!   for `select!` arms and the cancellable [`CancelToken::sleep`]
//! - wake hooks, registered by the condvar wait in [`crate::buffer`], that
//!   cancellation invokes so blocked waiters are re-broadcast
//!
//! Cancellation is idempotent: the first `cancel` call disconnects the
//! signal channel and runs each registered hook exactly once; later calls
//! return immediately.

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

type Hook = Arc<dyn Fn() + Send + Sync + 'static>;

struct Inner {
    cancelled: AtomicBool,
    next_hook: AtomicU64,
    hooks: Mutex<Vec<(u64, Hook)>>,
    /// Dropped on cancellation so every cloned signal receiver disconnects.
    keep_alive: Mutex<Option<Sender<()>>>,
    signal: Receiver<()>,
}

/// A cloneable, process-wide cancellation signal.
///
/// All clones share one underlying state. Dropping the last clone counts
/// as cancellation for any outstanding [`CancelToken::signal`] receivers.
#[derive(Clone)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

impl CancelToken {
    /// Create a fresh, uncancelled token.
    pub fn new() -> Self {
        let (keep_alive, signal) = bounded::<()>(0);
        Self {
            inner: Arc::new(Inner {
                cancelled: AtomicBool::new(false),
                next_hook: AtomicU64::new(0),
                hooks: Mutex::new(Vec::new()),
                keep_alive: Mutex::new(Some(keep_alive)),
                signal,
            }),
        }
    }

    /// Whether the token has fired.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Fire the token, waking everything blocked on it.
    ///
    /// Must not be called while holding a lock that a registered wake
    /// hook acquires; the hooks run synchronously on this thread.
    pub fn cancel(&self) {
        if self.inner.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }

        // Disconnect the signal channel.
        drop(lock(&self.inner.keep_alive).take());

        // Take the hooks out of the registry before invoking them: a hook
        // acquires whatever lock its waiter sleeps under, and an
        // unregistering waiter needs the registry lock.
        let hooks = std::mem::take(&mut *lock(&self.inner.hooks));
        for (_, hook) in hooks {
            hook();
        }
    }

    /// A receiver that never yields a message and disconnects when the
    /// token fires. Use it in `select!` arms or with `recv_timeout`.
    pub fn signal(&self) -> Receiver<()> {
        self.inner.signal.clone()
    }

    /// Sleep for `duration`, waking early if the token fires.
    ///
    /// Returns `true` if the full duration elapsed, `false` on
    /// cancellation.
    pub fn sleep(&self, duration: Duration) -> bool {
        matches!(
            self.signal().recv_timeout(duration),
            Err(RecvTimeoutError::Timeout)
        )
    }

    /// Register a hook to run once when the token fires.
    ///
    /// Hooks registered after cancellation never run; callers must
    /// re-check [`Self::is_cancelled`] after registering. The hook stays
    /// registered until the returned guard is dropped.
    pub(crate) fn add_hook(&self, hook: impl Fn() + Send + Sync + 'static) -> HookGuard {
        let id = self.inner.next_hook.fetch_add(1, Ordering::SeqCst);
        lock(&self.inner.hooks).push((id, Arc::new(hook)));
        HookGuard {
            inner: Arc::clone(&self.inner),
            id,
        }
    }

    /// Number of currently registered hooks.
    #[cfg(test)]
    pub(crate) fn hook_count(&self) -> usize {
        lock(&self.inner.hooks).len()
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// Unregisters its hook on drop.
pub(crate) struct HookGuard {
    inner: Arc<Inner>,
    id: u64,
}

impl Drop for HookGuard {
    fn drop(&mut self) {
        lock(&self.inner.hooks).retain(|(id, _)| *id != self.id);
    }
}

/// Acquire a mutex, absorbing poisoning: teardown must keep working even
/// if another role panicked while holding the lock.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
