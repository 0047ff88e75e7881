use super::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn test_raw_mutex_lock_unlock() {
    let mutex = RawMutex::new();
    assert_eq!(mutex.state(), MutexState::Unlocked);

    mutex.lock();
    assert_eq!(mutex.state(), MutexState::LockedNoWaiter);
    assert!(!mutex.try_lock());

    mutex.unlock();
    assert_eq!(mutex.state(), MutexState::Unlocked);
    assert!(mutex.try_lock());
    mutex.unlock();
}

#[test]
#[should_panic(expected = "unlock of an unlocked mutex")]
fn test_double_unlock_panics() {
    let mutex = RawMutex::new();
    mutex.lock();
    mutex.unlock();
    mutex.unlock();
}

#[test]
fn test_contended_lock_marks_waiter() {
    let mutex = Arc::new(RawMutex::new());
    mutex.lock();

    let acquired = Arc::new(AtomicBool::new(false));
    let handle = {
        let mutex = Arc::clone(&mutex);
        let acquired = Arc::clone(&acquired);
        thread::spawn(move || {
            mutex.lock();
            acquired.store(true, Ordering::SeqCst);
            mutex.unlock();
        })
    };

    while mutex.state() != MutexState::LockedWithWaiter {
        thread::sleep(Duration::from_millis(1));
    }
    assert!(!acquired.load(Ordering::SeqCst));

    mutex.unlock();
    handle.join().unwrap();
    assert!(acquired.load(Ordering::SeqCst));
    assert_eq!(mutex.state(), MutexState::Unlocked);
}

#[test]
fn test_always_notify_policy() {
    let mutex = RawMutex::with_policy(NotifyPolicy::Always);
    assert_eq!(mutex.policy(), NotifyPolicy::Always);
    for _ in 0..10 {
        mutex.lock();
        mutex.unlock();
    }
    assert!(!mutex.is_locked());
}

#[test]
fn test_mutex_guard() {
    let mutex = Mutex::new(vec![1, 2]);
    {
        let mut guard = mutex.lock();
        guard.push(3);
        assert!(mutex.try_lock().is_none());
    }
    assert_eq!(*mutex.lock(), vec![1, 2, 3]);
    assert!(!mutex.raw().is_locked());
    assert_eq!(mutex.into_inner(), vec![1, 2, 3]);
}

#[test]
fn test_mutex_contention() {
    let mutex = Mutex::new(0usize);
    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..500 {
                    *mutex.lock() += 1;
                }
            });
        }
    });
    assert_eq!(*mutex.lock(), 2000);
}

#[test]
fn test_mutex_debug_shows_locked() {
    let mutex = Mutex::new(7u8);
    assert_eq!(format!("{mutex:?}"), "Mutex { data: 7 }");
    let _guard = mutex.lock();
    assert_eq!(format!("{mutex:?}"), "Mutex { data: <locked> }");
}

#[test]
fn test_wait_queue_wake_all() {
    let queue = Arc::new(WaitQueue::new());
    let release = Arc::new(AtomicBool::new(false));

    let handles: Vec<_> = (0..3)
        .map(|_| {
            let queue = Arc::clone(&queue);
            let release = Arc::clone(&release);
            thread::spawn(move || {
                while !release.load(Ordering::SeqCst) {
                    queue.park_if(|| !release.load(Ordering::SeqCst));
                }
            })
        })
        .collect();

    while queue.len() < 3 {
        thread::sleep(Duration::from_millis(1));
    }
    release.store(true, Ordering::SeqCst);
    assert_eq!(queue.wake_all(), 3);
    for handle in handles {
        handle.join().unwrap();
    }
    assert!(queue.is_empty());
}

#[test]
fn test_park_if_skips_when_condition_fails() {
    let queue = WaitQueue::new();
    assert!(!queue.park_if(|| false));
    assert!(!queue.wake_one());
}

#[test]
fn test_mutex_get_mut_bypasses_lock() {
    let mut mutex = Mutex::new(String::from("a"));
    mutex.get_mut().push('b');
    assert!(!mutex.raw().is_locked());
    assert_eq!(&*mutex.lock(), "ab");
}
