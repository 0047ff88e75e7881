use core::fmt;

/// Bit width of the storage slot behind an [`AtomicCell`](super::AtomicCell).
///
/// Fixed by the word type at construction and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Width {
    /// 8-bit slot.
    W8 = 8,
    /// 16-bit slot.
    W16 = 16,
    /// 32-bit slot.
    W32 = 32,
    /// 64-bit slot.
    W64 = 64,
}

impl Width {
    /// Number of bits in the slot.
    #[inline]
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Number of bytes in the slot.
    #[inline]
    pub const fn bytes(self) -> usize {
        self as usize / 8
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}
