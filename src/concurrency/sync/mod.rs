//! Blocking synchronization built on [`AtomicCell`](crate::AtomicCell).
//!
//! - [`WaitQueue`]: parking support behind `AtomicCell::wait`/`notify_*`.
//! - [`RawMutex`]: three-state lock over a single `AtomicCell<u32>`.
//! - [`Mutex`]: data-owning wrapper with an RAII guard.

mod guard;
mod mutex;
mod state;
mod wait_queue;

pub use guard::{Mutex, MutexGuard};
pub use mutex::RawMutex;
pub use state::{MutexState, NotifyPolicy};
pub use wait_queue::WaitQueue;

#[cfg(all(test, not(loom)))]
mod tests;
