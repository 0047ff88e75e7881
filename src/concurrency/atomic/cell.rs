use core::fmt;
use core::sync::atomic::Ordering;

use super::order;
use super::{AtomicWord, Width};
use crate::concurrency::sync::WaitQueue;

/// A fixed-width atomic memory location with wait/notify support.
///
/// The cell owns exactly one storage slot, sized by `T`. The slot is only ever
/// reached through the ordered operations below. Read-modify-write operations
/// return the value the slot held *before* the operation, so retry loops never
/// need a second load.
///
/// # Examples
///
/// ```
/// use core::sync::atomic::Ordering;
/// use parklock::AtomicCell;
///
/// let cell = AtomicCell::new(5u32);
/// assert_eq!(cell.fetch_add(2, Ordering::Relaxed), 5);
///
/// let mut expected = 7;
/// assert!(cell.compare_exchange(&mut expected, 9, Ordering::AcqRel));
/// assert_eq!(cell.load(Ordering::Acquire), 9);
/// ```
pub struct AtomicCell<T: AtomicWord> {
    slot: T::Slot,
    waiters: WaitQueue,
}

impl<T: AtomicWord> AtomicCell<T> {
    /// Creates a cell holding `value`.
    ///
    /// Other threads observe the initial value once a reference to the cell
    /// has been published to them.
    pub fn new(value: T) -> Self {
        Self {
            slot: T::slot(value),
            waiters: WaitQueue::new(),
        }
    }

    /// Width tag of the backing slot.
    #[inline]
    pub fn width(&self) -> Width {
        T::WIDTH
    }

    /// Loads the current value.
    ///
    /// # Panics
    ///
    /// Panics if `order` is `Release` or `AcqRel`.
    #[inline]
    #[track_caller]
    pub fn load(&self, order: Ordering) -> T {
        T::load(&self.slot, order::check_load(order))
    }

    /// Stores `value`.
    ///
    /// # Panics
    ///
    /// Panics if `order` is `Acquire` or `AcqRel`.
    #[inline]
    #[track_caller]
    pub fn store(&self, value: T, order: Ordering) {
        T::store(&self.slot, value, order::check_store(order));
    }

    /// Adds to the current value (wrapping), returning the previous value.
    #[inline]
    pub fn fetch_add(&self, value: T, order: Ordering) -> T {
        T::fetch_add(&self.slot, value, order)
    }

    /// Subtracts from the current value (wrapping), returning the previous value.
    #[inline]
    pub fn fetch_sub(&self, value: T, order: Ordering) -> T {
        T::fetch_sub(&self.slot, value, order)
    }

    /// Bitwise AND with the current value, returning the previous value.
    #[inline]
    pub fn fetch_and(&self, value: T, order: Ordering) -> T {
        T::fetch_and(&self.slot, value, order)
    }

    /// Bitwise OR with the current value, returning the previous value.
    #[inline]
    pub fn fetch_or(&self, value: T, order: Ordering) -> T {
        T::fetch_or(&self.slot, value, order)
    }

    /// Bitwise XOR with the current value, returning the previous value.
    #[inline]
    pub fn fetch_xor(&self, value: T, order: Ordering) -> T {
        T::fetch_xor(&self.slot, value, order)
    }

    /// Bitwise NAND with the current value, returning the previous value.
    #[inline]
    pub fn fetch_nand(&self, value: T, order: Ordering) -> T {
        T::fetch_nand(&self.slot, value, order)
    }

    /// Stores the maximum of the current value and `value`, returning the previous value.
    #[inline]
    pub fn fetch_max(&self, value: T, order: Ordering) -> T {
        T::fetch_max(&self.slot, value, order)
    }

    /// Stores the minimum of the current value and `value`, returning the previous value.
    #[inline]
    pub fn fetch_min(&self, value: T, order: Ordering) -> T {
        T::fetch_min(&self.slot, value, order)
    }

    /// Replaces the current value, returning the previous value.
    #[inline]
    pub fn swap(&self, value: T, order: Ordering) -> T {
        T::swap(&self.slot, value, order)
    }

    /// Single attempt to replace `*expected` with `desired`.
    ///
    /// The failure ordering is derived from `order`: `Release` becomes
    /// `Relaxed` and `AcqRel` becomes `Acquire`.
    ///
    /// On failure `*expected` is overwritten with the value observed in the
    /// slot and `false` is returned.
    #[inline]
    pub fn compare_exchange(&self, expected: &mut T, desired: T, order: Ordering) -> bool {
        self.compare_exchange_with(expected, desired, order, order::failure_for(order))
    }

    /// Single attempt to replace `*expected` with `desired`, with separate
    /// orderings for the success and failure cases.
    ///
    /// On failure `*expected` is overwritten with the value observed in the
    /// slot and `false` is returned. This never loops; contention is left to
    /// the caller's retry loop.
    ///
    /// # Panics
    ///
    /// Panics if `failure` is `Release` or `AcqRel`.
    #[inline]
    #[track_caller]
    pub fn compare_exchange_with(
        &self,
        expected: &mut T,
        desired: T,
        success: Ordering,
        failure: Ordering,
    ) -> bool {
        match T::compare_exchange(&self.slot, *expected, desired, success, order::check_failure(failure)) {
            Ok(_) => true,
            Err(observed) => {
                *expected = observed;
                false
            }
        }
    }

    /// Blocks while the cell holds `expected`.
    ///
    /// Returns immediately if the value already differs. Callers must
    /// re-check their condition after this returns: a wake-up only means the
    /// cell was notified, not that it still holds some other value. There is
    /// no timeout; a wait that is never paired with a notify never returns.
    pub fn wait(&self, expected: T) {
        self.waiters
            .park_if(|| T::load(&self.slot, Ordering::SeqCst) == expected);
    }

    /// Wakes at most one thread blocked in [`wait`](Self::wait).
    ///
    /// Returns whether a thread was woken.
    pub fn notify_one(&self) -> bool {
        self.waiters.wake_one()
    }

    /// Wakes every thread blocked in [`wait`](Self::wait).
    ///
    /// Returns the number of threads woken.
    pub fn notify_all(&self) -> usize {
        self.waiters.wake_all()
    }

    /// Number of threads currently blocked in [`wait`](Self::wait).
    pub fn waiter_count(&self) -> usize {
        self.waiters.len()
    }

    /// Consumes the cell, returning the stored value.
    pub fn into_inner(self) -> T {
        // Ownership of `self` excludes every other accessor.
        self.load(Ordering::Relaxed)
    }
}

impl<T: AtomicWord> Default for AtomicCell<T> {
    fn default() -> Self {
        Self::new(T::zero())
    }
}

impl<T: AtomicWord> From<T> for AtomicCell<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: AtomicWord> fmt::Debug for AtomicCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicCell")
            .field("width", &T::WIDTH)
            .field("value", &self.load(Ordering::Relaxed))
            .finish()
    }
}

impl<T: AtomicWord> Drop for AtomicCell<T> {
    fn drop(&mut self) {
        debug_assert!(
            self.waiters.is_empty(),
            "AtomicCell dropped while threads are still waiting on it"
        );
    }
}
