//! Width-parameterized atomic cells.
//!
//! [`AtomicCell<T>`] is generic over the four unsigned word widths and carries
//! explicit memory orderings on every operation. Besides the usual load, store
//! and read-modify-write family it can park threads until its value changes
//! ([`AtomicCell::wait`]) and wake them again ([`AtomicCell::notify_one`],
//! [`AtomicCell::notify_all`]).
//!
//! Orderings that make no sense for an operation (a `Release` load, an
//! `Acquire` store, a `Release` failure ordering) panic instead of reaching
//! the hardware primitive.

mod cell;
mod order;
mod width;
mod word;

pub use cell::AtomicCell;
pub use width::Width;
pub use word::AtomicWord;

use core::sync::atomic::Ordering;

/// Issues a memory fence with the given ordering.
///
/// # Panics
///
/// Panics if `order` is `Relaxed`.
#[inline]
#[track_caller]
pub fn fence(order: Ordering) {
    crate::model::fence(order::check_fence(order));
}
