//! Bit scanning and mask construction over any [`Word`] width.
//!
//! These are the primitives the containers build their scans on. Every mask
//! builder accepts the full range `0..=W::BITS` without ever shifting a word
//! by its own width.

use crate::word::Word;

/// What [`count_trailing_zeros`] returns for an input of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ZeroBehavior {
    /// Zero yields `W::BITS`.
    #[default]
    Width,
    /// Zero yields an unspecified value in `0..W::BITS`.
    ///
    /// Only for callers that have already ruled out zero and want to skip
    /// the check.
    Undefined,
}

/// Counts the zero bits below the least significant set bit of `value`.
///
/// Uses bisection: the low half of the remaining window is tested with one
/// mask per step, so the count takes `log2(W::BITS)` steps regardless of
/// where the set bit is.
///
/// # Examples
///
/// ```
/// use packed_bits::scan::{ZeroBehavior, count_trailing_zeros};
///
/// assert_eq!(count_trailing_zeros(0b1000u32, ZeroBehavior::Width), 3);
/// assert_eq!(count_trailing_zeros(1u64 << 63, ZeroBehavior::Width), 63);
/// assert_eq!(count_trailing_zeros(0u16, ZeroBehavior::Width), 16);
/// ```
#[must_use]
#[inline]
pub fn count_trailing_zeros<W: Word>(value: W, zero: ZeroBehavior) -> u32 {
    if value == W::ZERO && zero == ZeroBehavior::Width {
        return W::BITS;
    }
    if value & W::ONE != W::ZERO {
        return 0;
    }

    let mut value = value;
    let mut zero_bits = 0;
    let mut shift = W::BITS >> 1;
    let mut mask = W::MAX >> shift;
    while shift != 0 {
        if value & mask == W::ZERO {
            value >>= shift;
            zero_bits |= shift;
        }
        shift >>= 1;
        mask = mask >> shift;
    }
    zero_bits
}

/// Returns a word with the `n` least significant bits set.
///
/// # Examples
///
/// ```
/// use packed_bits::scan::mask_trailing_ones;
///
/// assert_eq!(mask_trailing_ones::<u8>(0), 0);
/// assert_eq!(mask_trailing_ones::<u8>(3), 0b0000_0111);
/// assert_eq!(mask_trailing_ones::<u8>(8), 0xFF);
/// ```
#[must_use]
#[inline]
pub fn mask_trailing_ones<W: Word>(n: u32) -> W {
    debug_assert!(n <= W::BITS, "mask width {n} exceeds word width");
    if n == 0 { W::ZERO } else { W::MAX >> (W::BITS - n) }
}

/// Returns a word with the `n` most significant bits set.
///
/// ```
/// use packed_bits::scan::mask_leading_ones;
///
/// assert_eq!(mask_leading_ones::<u8>(3), 0b1110_0000);
/// ```
#[must_use]
#[inline]
pub fn mask_leading_ones<W: Word>(n: u32) -> W {
    debug_assert!(n <= W::BITS, "mask width {n} exceeds word width");
    !mask_trailing_ones::<W>(W::BITS - n)
}

/// Returns a word with the `n` least significant bits clear and the rest set.
///
/// ```
/// use packed_bits::scan::mask_trailing_zeros;
///
/// assert_eq!(mask_trailing_zeros::<u8>(3), 0b1111_1000);
/// assert_eq!(mask_trailing_zeros::<u8>(8), 0);
/// ```
#[must_use]
#[inline]
pub fn mask_trailing_zeros<W: Word>(n: u32) -> W {
    debug_assert!(n <= W::BITS, "mask width {n} exceeds word width");
    mask_leading_ones::<W>(W::BITS - n)
}

/// Returns a word with the `n` most significant bits clear and the rest set.
///
/// ```
/// use packed_bits::scan::mask_leading_zeros;
///
/// assert_eq!(mask_leading_zeros::<u8>(3), 0b0001_1111);
/// ```
#[must_use]
#[inline]
pub fn mask_leading_zeros<W: Word>(n: u32) -> W {
    debug_assert!(n <= W::BITS, "mask width {n} exceeds word width");
    mask_trailing_ones::<W>(W::BITS - n)
}

/// Finds the lowest bit at position `start` or above whose value is `value`.
///
/// Returns the position within the word, or `None` when no such bit exists.
///
/// ```
/// use packed_bits::scan::find_bit_in_word;
///
/// assert_eq!(find_bit_in_word(0b1010_0000u8, 0, true), Some(5));
/// assert_eq!(find_bit_in_word(0b1010_0000u8, 6, true), Some(7));
/// assert_eq!(find_bit_in_word(0b0000_0111u8, 1, false), Some(3));
/// assert_eq!(find_bit_in_word(0xFFu8, 0, false), None);
/// ```
#[must_use]
#[inline]
pub fn find_bit_in_word<W: Word>(word: W, start: u32, value: bool) -> Option<u32> {
    if start >= W::BITS {
        return None;
    }
    let candidates = if value { word } else { !word };
    let candidates = candidates & mask_trailing_zeros::<W>(start);
    if candidates == W::ZERO {
        None
    } else {
        Some(count_trailing_zeros(candidates, ZeroBehavior::Undefined))
    }
}
