//! Contended-increment scenario.
//!
//! `threads` workers share one [`RawMutex`] and one plain counter. Each worker
//! runs `iterations` rounds of lock, increment, unlock. Once every worker has
//! been joined the counter must equal `threads * iterations` and the mutex
//! must be unlocked. Any other outcome means mutual exclusion was violated.
//!
//! ```
//! use parklock::runtime::StdRuntime;
//! use parklock::scenario::{self, ScenarioConfig};
//!
//! let config = ScenarioConfig::default();
//! let report = scenario::run(&StdRuntime, &config)?;
//! report.verify()?;
//! assert_eq!(report.observed, 4);
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::concurrency::sync::{MutexState, NotifyPolicy, RawMutex};
use crate::model::{Arc, UnsafeCell};
use crate::runtime::Runtime;

/// Shape of a scenario run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Number of worker threads.
    pub threads: usize,
    /// Lock/increment/unlock rounds per worker.
    pub iterations: usize,
    /// Unlock policy of the shared mutex.
    pub policy: NotifyPolicy,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            threads: 2,
            iterations: 2,
            policy: NotifyPolicy::OnContention,
        }
    }
}

impl ScenarioConfig {
    /// Parses a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid scenario config")?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the scenario does at least one round on one thread.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.threads >= 1, "scenario needs at least one thread");
        ensure!(self.iterations >= 1, "scenario needs at least one iteration");
        Ok(())
    }

    /// Final counter value a correct mutex produces.
    pub fn expected_count(&self) -> Result<usize> {
        self.threads
            .checked_mul(self.iterations)
            .context("threads * iterations overflows usize")
    }
}

/// Outcome of a scenario run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioReport {
    /// `threads * iterations`.
    pub expected: usize,
    /// Counter value after all workers were joined.
    pub observed: usize,
    /// Mutex state after all workers were joined.
    pub final_state: MutexState,
}

impl ScenarioReport {
    /// Fails if an update was lost or the mutex was left locked.
    pub fn verify(&self) -> Result<()> {
        ensure!(
            self.observed == self.expected,
            "lost updates: counter is {} but {} increments were made",
            self.observed,
            self.expected
        );
        ensure!(
            self.final_state == MutexState::Unlocked,
            "mutex left in state {:?} after all workers finished",
            self.final_state
        );
        Ok(())
    }
}

/// A mutex and the plain counter it guards by convention.
struct Shared {
    lock: RawMutex,
    counter: UnsafeCell<usize>,
}

// SAFETY: `counter` is only touched while `lock` is held.
unsafe impl Sync for Shared {}
unsafe impl Send for Shared {}

impl Shared {
    fn increment(&self) {
        self.lock.lock();
        // SAFETY: the lock is held.
        self.counter.with_mut(|counter| unsafe { *counter += 1 });
        self.lock.unlock();
    }

    fn count(&self) -> usize {
        self.lock.lock();
        // SAFETY: the lock is held.
        let count = self.counter.with(|counter| unsafe { *counter });
        self.lock.unlock();
        count
    }
}

/// Runs one pass of the scenario on `runtime` and reports what it observed.
///
/// The caller decides what to do with the report; under a model-checking
/// runtime use [`run_model`] instead, which verifies every explored schedule.
pub fn run<R: Runtime>(runtime: &R, config: &ScenarioConfig) -> Result<ScenarioReport> {
    config.validate()?;
    let expected = config.expected_count()?;

    #[cfg(feature = "tracing")]
    tracing::debug!(threads = config.threads, iterations = config.iterations, "scenario start");

    let shared = Arc::new(Shared {
        lock: RawMutex::with_policy(config.policy),
        counter: UnsafeCell::new(0),
    });

    let iterations = config.iterations;
    let handles: Vec<_> = (0..config.threads)
        .map(|_| {
            let shared = Arc::clone(&shared);
            runtime.spawn(move || {
                for _ in 0..iterations {
                    shared.increment();
                }
            })
        })
        .collect();
    for handle in handles {
        runtime.join(handle);
    }

    let report = ScenarioReport {
        expected,
        observed: shared.count(),
        final_state: shared.lock.state(),
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(observed = report.observed, expected = report.expected, "scenario finished");

    Ok(report)
}

/// Runs the scenario as the root program of `runtime` and panics on the
/// first run whose report fails [`ScenarioReport::verify`].
///
/// With a model-checking runtime that is every explored interleaving.
pub fn run_model<R>(runtime: R, config: ScenarioConfig) -> Result<()>
where
    R: Runtime + Clone + Send + Sync + 'static,
{
    config.validate()?;
    let root = runtime.clone();
    runtime.start(move || {
        if let Err(err) = run(&root, &config).and_then(|report| report.verify()) {
            panic!("{err:#}");
        }
    });
    Ok(())
}

#[cfg(all(test, not(loom)))]
mod tests {
    use super::*;
    use crate::runtime::StdRuntime;

    #[test]
    fn default_config_is_two_by_two() {
        let config = ScenarioConfig::default();
        assert_eq!((config.threads, config.iterations), (2, 2));
        assert_eq!(config.expected_count().unwrap(), 4);
    }

    #[test]
    fn from_json_fills_defaults() {
        let config = ScenarioConfig::from_json(r#"{ "threads": 8, "policy": "always" }"#).unwrap();
        assert_eq!(config.threads, 8);
        assert_eq!(config.iterations, 2);
        assert_eq!(config.policy, NotifyPolicy::Always);
    }

    #[test]
    fn from_json_rejects_zero_threads() {
        let err = ScenarioConfig::from_json(r#"{ "threads": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("at least one thread"));
    }

    #[test]
    fn from_json_rejects_unknown_fields() {
        assert!(ScenarioConfig::from_json(r#"{ "workers": 3 }"#).is_err());
    }

    #[test]
    fn verify_reports_lost_updates() {
        let report = ScenarioReport {
            expected: 4,
            observed: 3,
            final_state: MutexState::Unlocked,
        };
        let err = report.verify().unwrap_err();
        assert!(err.to_string().contains("lost updates"));
    }

    #[test]
    fn verify_reports_stuck_lock() {
        let report = ScenarioReport {
            expected: 4,
            observed: 4,
            final_state: MutexState::LockedWithWaiter,
        };
        assert!(report.verify().is_err());
    }

    #[test]
    fn single_thread_run() {
        let config = ScenarioConfig {
            threads: 1,
            iterations: 10,
            ..ScenarioConfig::default()
        };
        let report = run(&StdRuntime, &config).unwrap();
        assert_eq!(report.observed, 10);
        report.verify().unwrap();
    }

    #[test]
    fn run_model_on_std_runtime() {
        run_model(StdRuntime, ScenarioConfig::default()).unwrap();
    }
}
