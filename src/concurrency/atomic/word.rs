use core::fmt::Debug;
use core::sync::atomic::Ordering;

use num_traits::{PrimInt, Unsigned};

use super::Width;
use crate::model::{AtomicU16, AtomicU32, AtomicU64, AtomicU8};

mod sealed {
    pub trait Sealed {}
}

/// An unsigned machine word that can back an [`AtomicCell`](super::AtomicCell).
///
/// Implemented for `u8`, `u16`, `u32` and `u64` only. Each implementation maps
/// the generic operation set onto the matching hardware atomic.
pub trait AtomicWord: PrimInt + Unsigned + Debug + Send + Sync + 'static + sealed::Sealed {
    /// The storage slot type.
    type Slot: Send + Sync;

    /// Width tag of the slot.
    const WIDTH: Width;

    #[doc(hidden)]
    fn slot(value: Self) -> Self::Slot;
    #[doc(hidden)]
    fn load(slot: &Self::Slot, order: Ordering) -> Self;
    #[doc(hidden)]
    fn store(slot: &Self::Slot, value: Self, order: Ordering);
    #[doc(hidden)]
    fn swap(slot: &Self::Slot, value: Self, order: Ordering) -> Self;
    #[doc(hidden)]
    fn compare_exchange(
        slot: &Self::Slot,
        current: Self,
        new: Self,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Self, Self>;
    #[doc(hidden)]
    fn fetch_add(slot: &Self::Slot, value: Self, order: Ordering) -> Self;
    #[doc(hidden)]
    fn fetch_sub(slot: &Self::Slot, value: Self, order: Ordering) -> Self;
    #[doc(hidden)]
    fn fetch_and(slot: &Self::Slot, value: Self, order: Ordering) -> Self;
    #[doc(hidden)]
    fn fetch_or(slot: &Self::Slot, value: Self, order: Ordering) -> Self;
    #[doc(hidden)]
    fn fetch_xor(slot: &Self::Slot, value: Self, order: Ordering) -> Self;
    #[doc(hidden)]
    fn fetch_nand(slot: &Self::Slot, value: Self, order: Ordering) -> Self;
    #[doc(hidden)]
    fn fetch_max(slot: &Self::Slot, value: Self, order: Ordering) -> Self;
    #[doc(hidden)]
    fn fetch_min(slot: &Self::Slot, value: Self, order: Ordering) -> Self;
}

macro_rules! forward_rmw {
    ($($op:ident),* $(,)?) => {
        $(
            #[inline(always)]
            fn $op(slot: &Self::Slot, value: Self, order: Ordering) -> Self {
                slot.$op(value, order)
            }
        )*
    };
}

macro_rules! impl_atomic_word {
    ($($word:ty => $slot:ty, $width:expr;)*) => {
        $(
            impl sealed::Sealed for $word {}

            impl AtomicWord for $word {
                type Slot = $slot;

                const WIDTH: Width = $width;

                #[inline(always)]
                fn slot(value: Self) -> Self::Slot {
                    <$slot>::new(value)
                }

                #[inline(always)]
                fn load(slot: &Self::Slot, order: Ordering) -> Self {
                    slot.load(order)
                }

                #[inline(always)]
                fn store(slot: &Self::Slot, value: Self, order: Ordering) {
                    slot.store(value, order);
                }

                #[inline(always)]
                fn compare_exchange(
                    slot: &Self::Slot,
                    current: Self,
                    new: Self,
                    success: Ordering,
                    failure: Ordering,
                ) -> Result<Self, Self> {
                    slot.compare_exchange(current, new, success, failure)
                }

                forward_rmw!(
                    swap, fetch_add, fetch_sub, fetch_and, fetch_or, fetch_xor, fetch_nand,
                    fetch_max, fetch_min,
                );
            }
        )*
    };
}

impl_atomic_word! {
    u8 => AtomicU8, Width::W8;
    u16 => AtomicU16, Width::W16;
    u32 => AtomicU32, Width::W32;
    u64 => AtomicU64, Width::W64;
}

const _: () = {
    assert!(<u8 as AtomicWord>::WIDTH.bytes() == core::mem::size_of::<u8>());
    assert!(<u16 as AtomicWord>::WIDTH.bytes() == core::mem::size_of::<u16>());
    assert!(<u32 as AtomicWord>::WIDTH.bytes() == core::mem::size_of::<u32>());
    assert!(<u64 as AtomicWord>::WIDTH.bytes() == core::mem::size_of::<u64>());
};
