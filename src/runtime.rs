//! The thread runtime a scenario runs on.
//!
//! The core never creates threads itself. Whoever drives it supplies a
//! [`Runtime`]: OS threads for ordinary tests and benchmarks, or the loom
//! model checker (under `--cfg loom`) to explore every interleaving.

use std::panic;

use crate::model::thread;

/// Spawns, joins and schedules the threads of a concurrent program.
pub trait Runtime {
    /// Joinable handle of a spawned thread producing `T`.
    type Handle<T: Send + 'static>;

    /// Starts `f` on a new thread.
    fn spawn<F, T>(&self, f: F) -> Self::Handle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static;

    /// Blocks until the thread behind `handle` finishes and returns its result.
    ///
    /// A panic in the joined thread is resumed on the caller.
    fn join<T: Send + 'static>(&self, handle: Self::Handle<T>) -> T;

    /// Hints that the current thread may give up its turn.
    fn yield_now(&self);

    /// Runs `f` as the root of a concurrent program.
    ///
    /// A model-checking runtime may call `f` many times, once per explored
    /// schedule.
    fn start<F>(&self, f: F)
    where
        F: Fn() + Send + Sync + 'static;
}

fn join_handle<T>(handle: thread::JoinHandle<T>) -> T {
    match handle.join() {
        Ok(value) => value,
        Err(payload) => panic::resume_unwind(payload),
    }
}

/// Runs threads as OS threads via `std::thread`.
#[cfg(not(loom))]
#[derive(Debug, Clone, Copy, Default)]
pub struct StdRuntime;

#[cfg(not(loom))]
impl Runtime for StdRuntime {
    type Handle<T: Send + 'static> = thread::JoinHandle<T>;

    fn spawn<F, T>(&self, f: F) -> Self::Handle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        thread::spawn(f)
    }

    fn join<T: Send + 'static>(&self, handle: Self::Handle<T>) -> T {
        join_handle(handle)
    }

    fn yield_now(&self) {
        thread::yield_now();
    }

    fn start<F>(&self, f: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        f();
    }
}

/// Runs threads inside the loom model checker.
///
/// [`start`](Runtime::start) explores the interleavings of the root closure
/// up to the configured preemption bound.
#[cfg(loom)]
#[derive(Debug, Clone, Copy, Default)]
pub struct LoomRuntime {
    preemption_bound: Option<usize>,
}

#[cfg(loom)]
impl LoomRuntime {
    /// Runtime with loom's default exploration settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits the number of preemptions explored per schedule.
    pub fn with_preemption_bound(bound: usize) -> Self {
        Self {
            preemption_bound: Some(bound),
        }
    }
}

#[cfg(loom)]
impl Runtime for LoomRuntime {
    type Handle<T: Send + 'static> = thread::JoinHandle<T>;

    fn spawn<F, T>(&self, f: F) -> Self::Handle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        thread::spawn(f)
    }

    fn join<T: Send + 'static>(&self, handle: Self::Handle<T>) -> T {
        join_handle(handle)
    }

    fn yield_now(&self) {
        thread::yield_now();
    }

    fn start<F>(&self, f: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut builder = loom::model::Builder::new();
        if self.preemption_bound.is_some() {
            builder.preemption_bound = self.preemption_bound;
        }
        builder.check(f);
    }
}

#[cfg(all(test, not(loom)))]
mod tests {
    use super::*;

    #[test]
    fn std_runtime_spawns_and_joins() {
        let rt = StdRuntime;
        let handle = rt.spawn(|| 21 * 2);
        rt.yield_now();
        assert_eq!(rt.join(handle), 42);
    }

    #[test]
    #[should_panic(expected = "worker failed")]
    fn join_resumes_worker_panic() {
        let rt = StdRuntime;
        let handle = rt.spawn(|| panic!("worker failed"));
        rt.join::<()>(handle);
    }

    #[test]
    fn start_runs_root_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let runs = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&runs);
        StdRuntime.start(move || {
            counted.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }
}
