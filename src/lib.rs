//! # `parklock` - Atomic Cells and a Parking Mutex
//!
//! A width-parameterized atomic cell with explicit memory orderings and
//! wait/notify parking, plus a minimal mutual-exclusion lock written purely in
//! terms of that cell.
//!
//! ## Layers
//!
//! 1. **Atomic cell** (`AtomicCell<T>` for `u8`, `u16`, `u32`, `u64`):
//!    - load, store, swap and the full `fetch_*` family, each returning the
//!      value held before the operation
//!    - single-attempt compare-exchange that reports the observed value on failure
//!    - `wait(expected)` / `notify_one()` / `notify_all()` parking
//!
//! 2. **Parking mutex** (`RawMutex`, `Mutex<T>`):
//!    - three-state lock word: `Unlocked`, `LockedNoWaiter`, `LockedWithWaiter`
//!    - compare-exchange fast path, swap-and-park slow path
//!    - `unlock` only notifies when a waiter announced itself
//!
//! 3. **Scenario** (`scenario`): the contended-increment check that both
//!    layers must pass, runnable on OS threads or, built with `--cfg loom`,
//!    under the loom model checker.
//!
//! ## Memory Model
//!
//! Orderings are exactly those passed in. An `Acquire` operation that reads a
//! value written by a `Release` operation on the same cell synchronizes with
//! it; `SeqCst` operations on one cell are totally ordered. Orderings that are
//! invalid for an operation panic.
//!
//! ## Limitations
//!
//! - `wait` has no timeout. A wait that is never paired with a notify blocks forever.
//! - The mutex is not fair: any waiter, or a newcomer, may win the next acquisition.
//! - `RawMutex` does not own the data it protects; use [`Mutex`] for that.
//!
//! ## Example
//!
//! ```rust
//! use parklock::Mutex;
//! use std::thread;
//!
//! let counter = Mutex::new(0u32);
//! thread::scope(|s| {
//!     for _ in 0..4 {
//!         s.spawn(|| *counter.lock() += 1);
//!     }
//! });
//! assert_eq!(counter.into_inner(), 4);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod concurrency;
pub mod runtime;
pub mod scenario;

mod model;

pub use concurrency::atomic::{fence, AtomicCell, AtomicWord, Width};
pub use concurrency::sync::{Mutex, MutexGuard, MutexState, NotifyPolicy, RawMutex};
pub use runtime::Runtime;

// Compile-time assertions for the lock word encoding.
const _: () = {
    assert!(MutexState::Unlocked.as_raw() == 0);
    assert!(MutexState::LockedNoWaiter.as_raw() == 1);
    assert!(MutexState::LockedWithWaiter.as_raw() == 2);
    assert!(Width::W32.bytes() == core::mem::size_of::<u32>());
};
