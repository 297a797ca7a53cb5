//! Trait implementations for `BitVector`.

use core::{
    fmt,
    hash::{Hash, Hasher},
    ops::Index,
};

use crate::{BitVector, iter::BitIter, word::Word};

impl<W: Word> Default for BitVector<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Word> fmt::Debug for BitVector<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitVector")
            .field("len", &self.len)
            .field("ones", &DebugOnes(self))
            .finish()
    }
}

struct DebugOnes<'a, W: Word>(&'a BitVector<W>);

impl<W: Word> fmt::Debug for DebugOnes<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.iter_ones()).finish()
    }
}

/// Two vectors are equal when they have the same length and the same bits.
/// Spare capacity does not take part.
impl<W: Word> PartialEq for BitVector<W> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.as_words() == other.as_words()
    }
}

impl<W: Word> Eq for BitVector<W> {}

impl<W: Word> Hash for BitVector<W> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        self.as_words().hash(state);
    }
}

impl<W: Word> Index<usize> for BitVector<W> {
    type Output = bool;

    /// Returns a reference to a static bool holding the value of bit `index`.
    ///
    /// A bit has no address of its own, so this hands out `&true` or
    /// `&false`. Use [`BitVector::bit_mut`] to write.
    ///
    /// ```
    /// use packed_bits::BitVector;
    ///
    /// let mut bv = BitVector::<u64>::with_len(8, false);
    /// bv.set(5);
    /// assert!(bv[5]);
    /// assert!(!bv[4]);
    /// ```
    fn index(&self, index: usize) -> &Self::Output {
        if self.test(index) { &true } else { &false }
    }
}

impl<'a, W: Word> IntoIterator for &'a BitVector<W> {
    type IntoIter = BitIter<&'a [W], W>;
    type Item = usize;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_ones()
    }
}

/// Collects a sequence of bit values, index 0 first.
///
/// ```
/// use packed_bits::BitVector;
///
/// let bv: BitVector<u8> = [true, false, true].into_iter().collect();
/// assert_eq!(bv.len(), 3);
/// assert_eq!(bv.as_words(), &[0b101]);
/// ```
impl<W: Word> FromIterator<bool> for BitVector<W> {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bv = Self::new();
        bv.extend(iter);
        bv
    }
}

impl<W: Word> Extend<bool> for BitVector<W> {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(self.len.saturating_add(lower));
        for bit in iter {
            self.push(bit);
        }
    }
}
