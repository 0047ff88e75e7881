use serde::{Deserialize, Serialize};

/// Lock word of a [`RawMutex`](super::RawMutex).
///
/// Only these three values are ever stored in the mutex's cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum MutexState {
    /// Nobody holds the lock.
    Unlocked = 0,
    /// Held, and no thread has announced that it is parking.
    LockedNoWaiter = 1,
    /// Held, and at least one thread is or was parked on the lock word.
    LockedWithWaiter = 2,
}

impl MutexState {
    /// Raw lock-word encoding.
    #[inline]
    pub const fn as_raw(self) -> u32 {
        self as u32
    }

    /// Decodes a raw lock word.
    ///
    /// # Panics
    ///
    /// Panics if `raw` is not one of the three encodings; the lock word has
    /// been corrupted.
    #[inline]
    #[track_caller]
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            0 => Self::Unlocked,
            1 => Self::LockedNoWaiter,
            2 => Self::LockedWithWaiter,
            _ => panic!("corrupted mutex state"),
        }
    }

    /// Whether a thread holds the lock.
    #[inline]
    pub const fn is_locked(self) -> bool {
        !matches!(self, Self::Unlocked)
    }
}

impl From<MutexState> for u32 {
    fn from(state: MutexState) -> Self {
        state.as_raw()
    }
}

/// When `unlock` wakes a parked thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyPolicy {
    /// Notify only if the released state was `LockedWithWaiter`.
    #[default]
    OnContention,
    /// Notify on every unlock. Produces redundant wake-ups; useful for
    /// exercising waiters that must tolerate them.
    Always,
}
