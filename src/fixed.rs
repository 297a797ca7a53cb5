//! `FixedBitSet` struct and implementation.

use core::fmt;

use crate::{
    iter::BitIter,
    macros::bitpos,
    scan::{find_bit_in_word, mask_trailing_ones},
    word::{Word, words_for},
};

/// A set of exactly `BITS` flags packed into an inline array of `WORDS` words.
///
/// `WORDS` must equal [`words_for::<W>(BITS)`](words_for); write it as a const
/// expression in the type so the two can never disagree. A mismatch is
/// rejected when the type is first used.
///
/// The set lives entirely inside its owning value and never allocates.
///
/// # Contract
///
/// Indices at or above `BITS` violate the contract of every method that takes
/// one. Debug builds assert; release builds do not check, and an index that
/// lands in the padding of the last word corrupts the padding-is-zero
/// invariant that [`find_bit`](Self::find_bit), [`count_ones`](Self::count_ones)
/// and equality rely on.
///
/// # Examples
///
/// ```
/// use packed_bits::{FixedBitSet, words_for};
///
/// type Flags = FixedBitSet<70, { words_for::<u64>(70) }, u64>;
///
/// let mut flags = Flags::new();
/// flags.set(3);
/// flags.set(65);
/// assert!(flags.test(65));
/// assert_eq!(flags.find_bit(0, true), 3);
/// assert_eq!(flags.find_bit(4, true), 65);
/// assert_eq!(flags.find_bit(66, true), 70); // not found
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedBitSet<const BITS: usize, const WORDS: usize, W: Word = usize> {
    words: [W; WORDS],
}

impl<const BITS: usize, const WORDS: usize, W: Word> FixedBitSet<BITS, WORDS, W> {
    const LAYOUT: () = assert!(
        WORDS == words_for::<W>(BITS),
        "WORDS must equal words_for::<W>(BITS)"
    );

    /// Creates a set with every bit clear.
    #[must_use]
    pub const fn new() -> Self {
        let () = Self::LAYOUT;
        Self {
            words: [W::ZERO; WORDS],
        }
    }

    /// Creates a set with every bit set.
    ///
    /// ```
    /// use packed_bits::{FixedBitSet, words_for};
    ///
    /// let set = FixedBitSet::<10, { words_for::<u8>(10) }, u8>::full();
    /// assert_eq!(set.count_ones(), 10);
    /// assert_eq!(set.words(), &[0xFF, 0b11]);
    /// ```
    #[must_use]
    pub fn full() -> Self {
        let mut set = Self::new();
        set.set_all();
        set
    }

    /// Number of addressable bits.
    #[must_use]
    #[inline(always)]
    pub const fn len(&self) -> usize {
        BITS
    }

    /// Returns `true` if the set addresses no bits at all (`BITS == 0`).
    #[must_use]
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        BITS == 0
    }

    /// Sets bit `idx`.
    #[inline]
    pub fn set(&mut self, idx: usize) {
        debug_assert!(idx < BITS, "bit index {idx} out of bounds for {BITS} bits");
        let (wi, bi) = bitpos!(idx, W);
        self.words[wi] |= W::bit(bi);
    }

    /// Sets bit `idx` to `value`.
    #[inline]
    pub fn set_value(&mut self, idx: usize, value: bool) {
        if value {
            self.set(idx);
        } else {
            self.clear(idx);
        }
    }

    /// Clears bit `idx`.
    #[inline]
    pub fn clear(&mut self, idx: usize) {
        debug_assert!(idx < BITS, "bit index {idx} out of bounds for {BITS} bits");
        let (wi, bi) = bitpos!(idx, W);
        self.words[wi] &= !W::bit(bi);
    }

    /// Flips bit `idx` and returns its previous value.
    #[inline]
    pub fn toggle(&mut self, idx: usize) -> bool {
        debug_assert!(idx < BITS, "bit index {idx} out of bounds for {BITS} bits");
        let (wi, bi) = bitpos!(idx, W);
        let mask = W::bit(bi);
        let prev = self.words[wi] & mask != W::ZERO;
        self.words[wi] ^= mask;
        prev
    }

    /// Returns the value of bit `idx`.
    #[must_use]
    #[inline]
    pub fn test(&self, idx: usize) -> bool {
        debug_assert!(idx < BITS, "bit index {idx} out of bounds for {BITS} bits");
        let (wi, bi) = bitpos!(idx, W);
        self.words[wi] & W::bit(bi) != W::ZERO
    }

    /// Sets every bit, leaving the padding above `BITS` clear.
    pub fn set_all(&mut self) {
        self.words.fill(W::MAX);
        self.clean_last_word();
    }

    /// Clears every bit.
    pub fn clear_all(&mut self) {
        self.words.fill(W::ZERO);
    }

    /// Sets every bit to `value`.
    pub fn fill(&mut self, value: bool) {
        if value {
            self.set_all();
        } else {
            self.clear_all();
        }
    }

    /// Returns the index of the first bit at or after `start` whose value is
    /// `value`, or `BITS` if there is none.
    ///
    /// Words that hold no bit of the wanted value are skipped with a single
    /// comparison; only the word that contains a match is scanned.
    ///
    /// ```
    /// use packed_bits::{FixedBitSet, words_for};
    ///
    /// let mut set = FixedBitSet::<40, { words_for::<u32>(40) }, u32>::full();
    /// set.clear(35);
    /// assert_eq!(set.find_bit(0, false), 35);
    /// assert_eq!(set.find_bit(36, false), 40);
    /// assert_eq!(set.find_bit(35, true), 36);
    /// ```
    #[must_use]
    pub fn find_bit(&self, start: usize, value: bool) -> usize {
        if start >= BITS {
            return BITS;
        }
        let skip = W::splat(!value);
        let (mut wi, mut bi) = bitpos!(start, W);
        while wi < WORDS {
            let word = self.words[wi];
            if word != skip {
                if let Some(pos) = find_bit_in_word(word, bi, value) {
                    // A search for zero can land in the padding of the last word.
                    return (wi * W::BITS as usize + pos as usize).min(BITS);
                }
            }
            wi += 1;
            bi = 0;
        }
        BITS
    }

    /// Number of set bits.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` if no bit is set.
    #[must_use]
    pub fn is_all_clear(&self) -> bool {
        self.words.iter().all(|&w| w == W::ZERO)
    }

    /// Returns word `idx` of the backing array, for word-at-a-time scans.
    #[must_use]
    #[inline]
    pub fn word(&self, idx: usize) -> W {
        self.words[idx]
    }

    /// Borrows the backing words.
    #[must_use]
    #[inline(always)]
    pub const fn words(&self) -> &[W] {
        &self.words
    }

    /// Returns an iterator over the indices of set bits, in ascending order.
    ///
    /// ```
    /// use packed_bits::{FixedBitSet, words_for};
    ///
    /// let mut set = FixedBitSet::<130, { words_for::<u64>(130) }, u64>::new();
    /// set.set(0);
    /// set.set(64);
    /// set.set(129);
    /// assert_eq!(set.iter_ones().collect::<Vec<_>>(), [0, 64, 129]);
    /// ```
    #[must_use]
    pub fn iter_ones(&self) -> BitIter<&[W], W> {
        BitIter::new(&self.words, 0, BITS)
    }

    #[inline]
    fn clean_last_word(&mut self) {
        let rem = (BITS % W::BITS as usize) as u32;
        if rem != 0 {
            self.words[WORDS - 1] &= mask_trailing_ones::<W>(rem);
        }
    }
}

impl<const BITS: usize, const WORDS: usize, W: Word> Default for FixedBitSet<BITS, WORDS, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const BITS: usize, const WORDS: usize, W: Word> fmt::Debug for FixedBitSet<BITS, WORDS, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter_ones()).finish()
    }
}

impl<'a, const BITS: usize, const WORDS: usize, W: Word> IntoIterator
    for &'a FixedBitSet<BITS, WORDS, W>
{
    type IntoIter = BitIter<&'a [W], W>;
    type Item = usize;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_ones()
    }
}
