//! A set of flags held in a single word.

use core::fmt;

use crate::word::Word;

/// A set of `W::BITS` flags stored in one word.
///
/// ```
/// use packed_bits::WordBitSet;
///
/// let mut set = WordBitSet::<u32>::new();
/// assert!(set.is_empty());
/// set.set(4).set(31);
/// assert!(set.test(31));
/// set.clear(31);
/// assert_eq!(set.bits(), 1 << 4);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WordBitSet<W: Word = u32> {
    value: W,
}

impl<W: Word> WordBitSet<W> {
    /// Number of flags the set holds.
    pub const CAPACITY: usize = W::BITS as usize;

    /// Creates a set with no flags set.
    #[must_use]
    pub const fn new() -> Self {
        Self { value: W::ZERO }
    }

    /// Creates a set from its raw word.
    #[must_use]
    pub const fn from_bits(value: W) -> Self {
        Self { value }
    }

    /// Returns `true` if no flag is set.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value == W::ZERO
    }

    /// Sets flag `pos`.
    #[inline]
    pub fn set(&mut self, pos: u32) -> &mut Self {
        self.value |= W::bit(pos);
        self
    }

    /// Clears flag `pos`.
    #[inline]
    pub fn clear(&mut self, pos: u32) -> &mut Self {
        self.value &= !W::bit(pos);
        self
    }

    /// Returns the value of flag `pos`.
    #[must_use]
    #[inline]
    pub fn test(&self, pos: u32) -> bool {
        self.value & W::bit(pos) != W::ZERO
    }

    /// Returns the raw word.
    #[must_use]
    #[inline(always)]
    pub const fn bits(&self) -> W {
        self.value
    }
}

impl<W: Word + fmt::Binary> fmt::Debug for WordBitSet<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WordBitSet({:#b})", self.value)
    }
}
