//! Primitive shim shared by every module in the crate.
//!
//! Under a normal build these are the `std` primitives. Building with
//! `RUSTFLAGS="--cfg loom"` swaps in the `loom` equivalents so the atomic cell,
//! the wait queue and the mutex can be model checked without code changes.

#[cfg(loom)]
pub(crate) use loom::sync::atomic::{fence, AtomicBool, AtomicU16, AtomicU32, AtomicU64, AtomicU8};
#[cfg(not(loom))]
pub(crate) use std::sync::atomic::{fence, AtomicBool, AtomicU16, AtomicU32, AtomicU64, AtomicU8};

#[cfg(loom)]
pub(crate) use loom::sync::{Arc, Mutex};
#[cfg(not(loom))]
pub(crate) use std::sync::Arc;

pub(crate) mod thread {
    #[cfg(loom)]
    pub(crate) use loom::thread::{current, park, spawn, yield_now, JoinHandle, Thread};
    #[cfg(not(loom))]
    pub(crate) use std::thread::{current, park, spawn, yield_now, JoinHandle, Thread};
}

#[cfg(loom)]
pub(crate) use loom::cell::UnsafeCell;

/// `core::cell::UnsafeCell` with the closure-based access API of
/// `loom::cell::UnsafeCell`.
#[cfg(not(loom))]
pub(crate) struct UnsafeCell<T: ?Sized>(core::cell::UnsafeCell<T>);

#[cfg(not(loom))]
impl<T> UnsafeCell<T> {
    pub(crate) const fn new(data: T) -> Self {
        Self(core::cell::UnsafeCell::new(data))
    }

    pub(crate) fn into_inner(self) -> T {
        self.0.into_inner()
    }
}

#[cfg(not(loom))]
impl<T: ?Sized> UnsafeCell<T> {
    #[inline(always)]
    pub(crate) fn with<R>(&self, f: impl FnOnce(*const T) -> R) -> R {
        f(self.0.get())
    }

    #[inline(always)]
    pub(crate) fn with_mut<R>(&self, f: impl FnOnce(*mut T) -> R) -> R {
        f(self.0.get())
    }
}
