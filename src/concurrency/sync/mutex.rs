use core::fmt;
use core::sync::atomic::Ordering;

use super::state::{MutexState, NotifyPolicy};
use crate::concurrency::atomic::AtomicCell;

/// A blocking mutex built from a single [`AtomicCell<u32>`].
///
/// The raw mutex guards no data of its own. Whatever it protects is tied to it
/// by convention: lock before touching, unlock after. [`Mutex`](super::Mutex)
/// wraps it with an owning guard.
///
/// # Protocol
/// - `lock` tries `Unlocked -> LockedNoWaiter` with one compare-exchange.
/// - On failure it swaps in `LockedWithWaiter` until the swapped-out value is
///   `Unlocked`, parking on the cell between attempts.
/// - `unlock` swaps in `Unlocked` and notifies one waiter if the old value was
///   `LockedWithWaiter`.
///
/// Waiters are not served in FIFO order: a woken thread races every other
/// thread for the next swap, and a newcomer on the fast path can win.
pub struct RawMutex {
    state: AtomicCell<u32>,
    policy: NotifyPolicy,
}

impl RawMutex {
    /// Creates an unlocked mutex with the [`NotifyPolicy::OnContention`] policy.
    pub fn new() -> Self {
        Self::with_policy(NotifyPolicy::OnContention)
    }

    /// Creates an unlocked mutex with an explicit unlock policy.
    pub fn with_policy(policy: NotifyPolicy) -> Self {
        Self {
            state: AtomicCell::new(MutexState::Unlocked.as_raw()),
            policy,
        }
    }

    /// Acquires the lock, blocking the current thread until it is available.
    #[inline]
    pub fn lock(&self) {
        if !self.try_lock() {
            self.lock_contended();
        }
    }

    /// Attempts to acquire the lock without blocking.
    #[inline]
    pub fn try_lock(&self) -> bool {
        let mut expected = MutexState::Unlocked.as_raw();
        self.state.compare_exchange_with(
            &mut expected,
            MutexState::LockedNoWaiter.as_raw(),
            Ordering::Acquire,
            Ordering::Relaxed,
        )
    }

    #[cold]
    fn lock_contended(&self) {
        #[cfg(feature = "tracing")]
        tracing::trace!("mutex contended");

        let contended = MutexState::LockedWithWaiter.as_raw();
        // Swapping in `LockedWithWaiter` before parking is what makes the
        // holder's `unlock` notify us.
        while self.state.swap(contended, Ordering::Acquire) != MutexState::Unlocked.as_raw() {
            self.state.wait(contended);
        }
    }

    /// Releases the lock.
    ///
    /// # Panics
    ///
    /// Panics if the mutex was not locked.
    #[inline]
    #[track_caller]
    pub fn unlock(&self) {
        let previous = MutexState::from_raw(self.state.swap(MutexState::Unlocked.as_raw(), Ordering::Release));
        assert!(previous.is_locked(), "unlock of an unlocked mutex");

        if previous == MutexState::LockedWithWaiter || self.policy == NotifyPolicy::Always {
            let _woken = self.state.notify_one();

            #[cfg(feature = "tracing")]
            tracing::trace!(woken = _woken, "mutex released to waiter");
        }
    }

    /// Current lock word.
    ///
    /// Only a snapshot; it may be stale by the time the caller looks at it.
    pub fn state(&self) -> MutexState {
        MutexState::from_raw(self.state.load(Ordering::Relaxed))
    }

    /// Whether some thread holds the lock (snapshot).
    pub fn is_locked(&self) -> bool {
        self.state().is_locked()
    }

    /// Unlock policy of this mutex.
    pub fn policy(&self) -> NotifyPolicy {
        self.policy
    }
}

impl Default for RawMutex {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RawMutex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawMutex")
            .field("state", &self.state())
            .field("policy", &self.policy)
            .finish()
    }
}
