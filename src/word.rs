//! The unsigned integer types bits are packed into.

use core::{
    fmt::Debug,
    hash::Hash,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Shl, Shr, ShrAssign},
};

/// An unsigned integer usable as the storage unit of a packed bit container.
///
/// Bit `i` of a container lives in word `i / BITS` at position `i % BITS`,
/// where position 0 is the least significant bit.
///
/// Implemented for `u8`, `u16`, `u32`, `u64`, `u128` and `usize`. The trait is
/// sealed; containers pick their word width through a type parameter instead
/// of probing the target at runtime.
pub trait Word:
    Copy
    + Eq
    + Hash
    + Debug
    + Default
    + Not<Output = Self>
    + BitAnd<Output = Self>
    + BitAndAssign
    + BitOr<Output = Self>
    + BitOrAssign
    + BitXor<Output = Self>
    + BitXorAssign
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + ShrAssign<u32>
    + sealed::Sealed
{
    /// Width of the word in bits.
    const BITS: u32;
    /// All bits clear.
    const ZERO: Self;
    /// Only the least significant bit set.
    const ONE: Self;
    /// All bits set.
    const MAX: Self;

    /// Number of set bits.
    fn count_ones(self) -> u32;

    /// Number of zero bits above the most significant set bit.
    fn leading_zeros(self) -> u32;

    /// Returns the all-ones word when `value` is true, the all-zeros word
    /// otherwise.
    #[inline(always)]
    fn splat(value: bool) -> Self {
        if value { Self::MAX } else { Self::ZERO }
    }

    /// Returns a word with only bit `pos` set.
    #[inline(always)]
    fn bit(pos: u32) -> Self {
        debug_assert!(pos < Self::BITS, "bit position {pos} out of range");
        Self::ONE << pos
    }
}

mod sealed {
    pub trait Sealed {}
}

macro_rules! impl_word {
    ($($t:ty),+ $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl Word for $t {
                const BITS: u32 = <$t>::BITS;
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const MAX: Self = <$t>::MAX;

                #[inline(always)]
                fn count_ones(self) -> u32 {
                    <$t>::count_ones(self)
                }

                #[inline(always)]
                fn leading_zeros(self) -> u32 {
                    <$t>::leading_zeros(self)
                }
            }
        )+
    };
}

impl_word!(u8, u16, u32, u64, u128, usize);

/// Number of `W` words needed to hold `bits` bits.
///
/// Meant to be evaluated in const position when naming a fixed-size set:
///
/// ```
/// use packed_bits::{FixedBitSet, words_for};
///
/// assert_eq!(words_for::<u64>(0), 0);
/// assert_eq!(words_for::<u64>(64), 1);
/// assert_eq!(words_for::<u64>(65), 2);
/// assert_eq!(words_for::<u8>(17), 3);
///
/// let set = FixedBitSet::<100, { words_for::<u32>(100) }, u32>::new();
/// assert_eq!(set.words().len(), 4);
/// ```
#[must_use]
pub const fn words_for<W: Word>(bits: usize) -> usize {
    bits.div_ceil(W::BITS as usize)
}
