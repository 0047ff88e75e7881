use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::Ordering;

#[cfg(not(loom))]
use crossbeam_utils::Backoff;

#[cfg(loom)]
use crate::model::Mutex;
use crate::model::{thread, Arc, AtomicBool};
#[cfg(not(loom))]
use crate::model::UnsafeCell;

/// A parked thread and its wake-up flag.
///
/// The flag is the only thing the waiter trusts: `thread::park` may return
/// early, so the waiter re-parks until the flag has been raised.
struct WaitNode {
    thread: thread::Thread,
    notified: AtomicBool,
}

impl WaitNode {
    fn new() -> Self {
        Self {
            thread: thread::current(),
            notified: AtomicBool::new(false),
        }
    }

    fn wake(&self) {
        self.notified.store(true, Ordering::Release);
        self.thread.unpark();
    }

    fn wait(&self) {
        while !self.notified.load(Ordering::Acquire) {
            thread::park();
        }
    }
}

/// The waiter list and the lock guarding it.
///
/// Native builds guard the list with a spin flag; critical sections are a
/// handful of pointer moves, so contention on the flag stays short.
#[cfg(not(loom))]
struct Waiters {
    list: UnsafeCell<VecDeque<Arc<WaitNode>>>,
    lock: AtomicBool,
}

#[cfg(not(loom))]
impl Waiters {
    fn new() -> Self {
        Self {
            list: UnsafeCell::new(VecDeque::new()),
            lock: AtomicBool::new(false),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut VecDeque<Arc<WaitNode>>) -> R) -> R {
        let backoff = Backoff::new();
        while self.lock.swap(true, Ordering::Acquire) {
            backoff.snooze();
        }
        let _unlock = SpinUnlock(&self.lock);
        // SAFETY: the spin flag is held until `_unlock` drops.
        self.list.with_mut(|list| f(unsafe { &mut *list }))
    }
}

#[cfg(not(loom))]
struct SpinUnlock<'a>(&'a AtomicBool);

#[cfg(not(loom))]
impl Drop for SpinUnlock<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The model checker cannot schedule its way out of a spin loop, so under
/// loom the list sits behind a modelled mutex instead.
#[cfg(loom)]
struct Waiters {
    list: Mutex<VecDeque<Arc<WaitNode>>>,
}

#[cfg(loom)]
impl Waiters {
    fn new() -> Self {
        Self {
            list: Mutex::new(VecDeque::new()),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut VecDeque<Arc<WaitNode>>) -> R) -> R {
        let mut list = match self.list.lock() {
            Ok(list) => list,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut list)
    }
}

/// A FIFO queue of parked threads.
pub struct WaitQueue {
    waiters: Waiters,
}

impl WaitQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            waiters: Waiters::new(),
        }
    }

    /// Parks the calling thread if `should_park` still holds.
    ///
    /// The condition is evaluated with the queue locked. A waker that changes
    /// the watched state before calling [`wake_one`](Self::wake_one) or
    /// [`wake_all`](Self::wake_all) therefore either makes the condition fail
    /// here or finds this thread already enqueued.
    ///
    /// Returns `true` if the thread parked and was woken.
    pub fn park_if(&self, should_park: impl FnOnce() -> bool) -> bool {
        let node = self.waiters.with(|waiters| {
            if !should_park() {
                return None;
            }
            let node = Arc::new(WaitNode::new());
            waiters.push_back(Arc::clone(&node));
            Some(node)
        });
        let Some(node) = node else {
            return false;
        };

        #[cfg(feature = "tracing")]
        tracing::trace!("parking thread");

        node.wait();
        true
    }

    /// Wakes the longest-waiting thread. Returns whether one was woken.
    pub fn wake_one(&self) -> bool {
        let node = self.waiters.with(VecDeque::pop_front);
        match node {
            Some(node) => {
                node.wake();
                true
            }
            None => false,
        }
    }

    /// Wakes every parked thread. Returns the number woken.
    pub fn wake_all(&self) -> usize {
        let drained: Vec<_> = self.waiters.with(|waiters| waiters.drain(..).collect());
        for node in &drained {
            node.wake();
        }
        drained.len()
    }

    /// Number of threads currently parked.
    pub fn len(&self) -> usize {
        self.waiters.with(|waiters| waiters.len())
    }

    /// Checks if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for WaitQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaitQueue").field("len", &self.len()).finish()
    }
}

impl Default for WaitQueue {
    fn default() -> Self {
        Self::new()
    }
}

// SAFETY: the waiter list is only reached through `Waiters::with`, which holds its lock.
unsafe impl Sync for WaitQueue {}
unsafe impl Send for WaitQueue {}
