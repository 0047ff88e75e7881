//! Atomic cells and the blocking primitives built on them.
//!
//! Layering is strict: [`atomic::AtomicCell`] is the only code that touches a
//! shared memory word, and [`sync::RawMutex`] is expressed entirely in terms of
//! cell operations.

pub mod atomic;
pub mod sync;
