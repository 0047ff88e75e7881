#![cfg(not(loom))]

use core::sync::atomic::Ordering;
use parklock::runtime::StdRuntime;
use parklock::scenario::{self, ScenarioConfig};
use parklock::{AtomicCell, Mutex, NotifyPolicy};
use proptest::prelude::*;
use std::thread;

#[derive(Debug, Clone)]
enum Op {
    Add(u32),
    Sub(u32),
    And(u32),
    Or(u32),
    Xor(u32),
    Nand(u32),
    Max(u32),
    Min(u32),
    Swap(u32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u32>().prop_map(Op::Add),
        any::<u32>().prop_map(Op::Sub),
        any::<u32>().prop_map(Op::And),
        any::<u32>().prop_map(Op::Or),
        any::<u32>().prop_map(Op::Xor),
        any::<u32>().prop_map(Op::Nand),
        any::<u32>().prop_map(Op::Max),
        any::<u32>().prop_map(Op::Min),
        any::<u32>().prop_map(Op::Swap),
    ]
}

fn policy() -> impl Strategy<Value = NotifyPolicy> {
    prop_oneof![Just(NotifyPolicy::OnContention), Just(NotifyPolicy::Always)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn scenario_never_loses_updates(threads in 1usize..6, iterations in 1usize..200, policy in policy()) {
        let config = ScenarioConfig { threads, iterations, policy };
        let report = scenario::run(&StdRuntime, &config).unwrap();
        prop_assert_eq!(report.observed, threads * iterations);
        prop_assert!(report.verify().is_ok());
    }

    #[test]
    fn guarded_counter_matches_total(threads in 1usize..6, iterations in 1usize..200) {
        let counter = Mutex::new(0usize);
        thread::scope(|s| {
            for _ in 0..threads {
                s.spawn(|| {
                    for _ in 0..iterations {
                        *counter.lock() += 1;
                    }
                });
            }
        });
        prop_assert_eq!(counter.into_inner(), threads * iterations);
    }
}

proptest! {
    #[test]
    fn fetch_ops_match_sequential_model(initial in any::<u32>(), ops in proptest::collection::vec(op(), 1..64)) {
        let cell = AtomicCell::new(initial);
        let mut model = initial;

        for op in ops {
            let (previous, next) = match op {
                Op::Add(v) => (cell.fetch_add(v, Ordering::SeqCst), model.wrapping_add(v)),
                Op::Sub(v) => (cell.fetch_sub(v, Ordering::SeqCst), model.wrapping_sub(v)),
                Op::And(v) => (cell.fetch_and(v, Ordering::SeqCst), model & v),
                Op::Or(v) => (cell.fetch_or(v, Ordering::SeqCst), model | v),
                Op::Xor(v) => (cell.fetch_xor(v, Ordering::SeqCst), model ^ v),
                Op::Nand(v) => (cell.fetch_nand(v, Ordering::SeqCst), !(model & v)),
                Op::Max(v) => (cell.fetch_max(v, Ordering::SeqCst), model.max(v)),
                Op::Min(v) => (cell.fetch_min(v, Ordering::SeqCst), model.min(v)),
                Op::Swap(v) => (cell.swap(v, Ordering::SeqCst), v),
            };
            prop_assert_eq!(previous, model, "pre-image mismatch for {:?}", op);
            model = next;
        }
        prop_assert_eq!(cell.load(Ordering::SeqCst), model);
    }

    #[test]
    fn compare_exchange_matches_model(current in any::<u8>(), expected in any::<u8>(), desired in any::<u8>()) {
        let cell = AtomicCell::new(current);
        let mut seen = expected;
        let swapped = cell.compare_exchange(&mut seen, desired, Ordering::AcqRel);

        prop_assert_eq!(swapped, current == expected);
        if swapped {
            prop_assert_eq!(cell.load(Ordering::Acquire), desired);
            prop_assert_eq!(seen, expected);
        } else {
            prop_assert_eq!(cell.load(Ordering::Acquire), current);
            prop_assert_eq!(seen, current);
        }
    }
}
