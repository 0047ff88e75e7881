//! Memory-order preconditions.
//!
//! Every check panics with the offending operation in the message instead of
//! letting an invalid ordering reach the hardware primitive.

use core::sync::atomic::Ordering;

#[inline]
#[track_caller]
pub(crate) fn check_load(order: Ordering) -> Ordering {
    assert!(
        !matches!(order, Ordering::Release | Ordering::AcqRel),
        "load: {order:?} is not a valid ordering for a load"
    );
    order
}

#[inline]
#[track_caller]
pub(crate) fn check_store(order: Ordering) -> Ordering {
    assert!(
        !matches!(order, Ordering::Acquire | Ordering::AcqRel),
        "store: {order:?} is not a valid ordering for a store"
    );
    order
}

#[inline]
#[track_caller]
pub(crate) fn check_failure(order: Ordering) -> Ordering {
    assert!(
        !matches!(order, Ordering::Release | Ordering::AcqRel),
        "compare_exchange: {order:?} is not a valid failure ordering"
    );
    order
}

#[inline]
#[track_caller]
pub(crate) fn check_fence(order: Ordering) -> Ordering {
    assert!(order != Ordering::Relaxed, "fence: Relaxed is not a valid fence ordering");
    order
}

/// Failure ordering implied by a single-ordering compare-exchange.
///
/// A failed exchange is only a load, so the release half is dropped.
#[inline]
pub(crate) const fn failure_for(success: Ordering) -> Ordering {
    match success {
        Ordering::Release => Ordering::Relaxed,
        Ordering::AcqRel => Ordering::Acquire,
        other => other,
    }
}
