//! `BitVector` struct and core implementation.

use alloc::vec::Vec;
use core::mem;

use tracing::{debug, trace};

use crate::{
    error::Error,
    iter::BitIter,
    macros::bitpos,
    scan::{ZeroBehavior, count_trailing_zeros, mask_trailing_ones, mask_trailing_zeros},
    word::{Word, words_for},
};

/// A runtime-sized, resizable vector of bits packed into `W` words.
///
/// # Capacity Model
///
/// The vector exposes [`len`](Self::len) logical bits out of a word buffer
/// that holds [`capacity`](Self::capacity) bits. Shrinking the logical length
/// never releases words; only [`shrink_to_fit`](Self::shrink_to_fit) does.
///
/// Every bit at or above `len`, in the last used word and in all spare words,
/// is kept clear. Whole-word checks such as [`any`](Self::any),
/// [`all`](Self::all) and equality depend on it.
///
/// # Contract
///
/// Indices at or above `len` violate the contract of every method taking a
/// single index. Debug builds assert. Release builds do not check: an index
/// inside the spare capacity silently breaks the clear-padding invariant, and
/// an index past the capacity panics on the slice access.
///
/// # Examples
///
/// ```
/// use packed_bits::BitVector;
///
/// let mut bv = BitVector::<u64>::with_len(10, false);
/// bv.set(3);
/// bv.set(7);
///
/// assert_eq!(bv.find_first_in(0, 10), Some(3));
/// assert_eq!(bv.find_first_in(4, 10), Some(7));
/// assert_eq!(bv.find_first_in(0, 3), None);
///
/// bv.resize(100, true);
/// assert!(bv.test(99));
/// assert!(!bv.test(8));
/// ```
#[derive(Clone)]
pub struct BitVector<W: Word = usize> {
    pub(crate) words: Vec<W>,
    pub(crate) len: usize,
}

impl<W: Word> BitVector<W> {
    /// Creates an empty vector without allocating.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            words: Vec::new(),
            len: 0,
        }
    }

    /// Creates a vector of `len` bits, all set to `fill`.
    ///
    /// # Panics
    ///
    /// Panics if the word buffer cannot be allocated. See
    /// [`try_with_len`](Self::try_with_len) for the fallible variant.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_bits::BitVector;
    ///
    /// let bv = BitVector::<u32>::with_len(5, true);
    /// assert!(bv.all());
    /// assert_eq!(bv.as_words(), &[0b11111]);
    /// ```
    #[must_use]
    pub fn with_len(len: usize, fill: bool) -> Self {
        Self::try_with_len(len, fill).unwrap_or_else(|err| alloc_failed(err))
    }

    /// Creates a vector of `len` bits, all set to `fill`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityOverflow`] or [`Error::AllocFailed`] if the
    /// word buffer cannot be allocated.
    pub fn try_with_len(len: usize, fill: bool) -> Result<Self, Error> {
        let mut bv = Self::new();
        bv.try_resize(len, fill)?;
        Ok(bv)
    }

    /// Adopts `words` as the storage of a vector of `len` bits.
    ///
    /// Any bits of the last word at or above `len` are cleared.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WordCountMismatch`] unless `words` holds exactly
    /// [`words_for::<W>(len)`](words_for) words.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_bits::BitVector;
    ///
    /// let bv = BitVector::<u8>::from_words(vec![0xFF, 0xFF], 12)?;
    /// assert_eq!(bv.count_ones(), 12);
    /// assert_eq!(bv.as_words(), &[0xFF, 0x0F]);
    ///
    /// assert!(BitVector::<u8>::from_words(vec![0; 3], 12).is_err());
    /// # Ok::<(), packed_bits::Error>(())
    /// ```
    pub fn from_words(words: Vec<W>, len: usize) -> Result<Self, Error> {
        let expected = words_for::<W>(len);
        if words.len() != expected {
            return Err(Error::WordCountMismatch {
                expected,
                found: words.len(),
            });
        }
        let mut bv = Self { words, len };
        bv.clear_unused_bits();
        Ok(bv)
    }

    /// Number of logical bits.
    #[must_use]
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vector holds no bits.
    #[must_use]
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of bits the word buffer holds without growing.
    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.words.len().saturating_mul(W::BITS as usize)
    }

    /// Size of the word buffer in bytes.
    #[must_use]
    #[inline]
    pub fn memory_size(&self) -> usize {
        self.words.len() * mem::size_of::<W>()
    }

    /// Borrows the words that hold the logical bits.
    ///
    /// The slice is exactly [`words_for::<W>(len)`](words_for) words long and
    /// its padding bits are clear.
    #[must_use]
    #[inline]
    pub fn as_words(&self) -> &[W] {
        &self.words[..words_for::<W>(self.len)]
    }

    /// Ensures the buffer holds at least `bits` bits.
    ///
    /// # Panics
    ///
    /// Panics if the word buffer cannot be allocated.
    pub fn reserve(&mut self, bits: usize) {
        self.try_reserve(bits).unwrap_or_else(|err| alloc_failed(err));
    }

    /// Ensures the buffer holds at least `bits` bits.
    ///
    /// New words are zeroed. The logical length is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityOverflow`] or [`Error::AllocFailed`] if the
    /// word buffer cannot be grown; the vector is left untouched.
    pub fn try_reserve(&mut self, bits: usize) -> Result<(), Error> {
        if bits > self.capacity() {
            self.grow(words_for::<W>(bits), false)?;
        }
        Ok(())
    }

    /// Grows or shrinks the vector to `new_len` bits.
    ///
    /// Bits gained are set to `fill`; bits at or above `new_len` are cleared.
    ///
    /// # Panics
    ///
    /// Panics if the word buffer cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_bits::BitVector;
    ///
    /// let mut bv = BitVector::<u64>::with_len(8, false);
    /// bv.set(1);
    /// bv.resize(20, false);
    /// assert!(bv.test(1));
    /// assert!(!bv.test(19));
    ///
    /// bv.resize(4, false);
    /// bv.resize(30, true);
    /// assert!(bv.test(1));
    /// assert!(!bv.test(2));
    /// assert!(bv.test(4));
    /// assert!(bv.test(29));
    /// ```
    pub fn resize(&mut self, new_len: usize, fill: bool) {
        self.try_resize(new_len, fill)
            .unwrap_or_else(|err| alloc_failed(err));
    }

    /// Grows or shrinks the vector to `new_len` bits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityOverflow`] or [`Error::AllocFailed`] if the
    /// word buffer cannot be grown; the vector is left untouched.
    pub fn try_resize(&mut self, new_len: usize, fill: bool) -> Result<(), Error> {
        if new_len > self.capacity() {
            self.grow(words_for::<W>(new_len), fill)?;
        }

        // Bits between the old length and the end of the buffer were only
        // clear because of the padding invariant. Give them the fill value
        // before they become logical; anything past `new_len` is cleared below.
        if new_len > self.len {
            self.set_unused_bits(fill);
        }

        let old_len = self.len;
        self.len = new_len;
        if fill || new_len < old_len {
            self.clear_unused_bits();
        }
        Ok(())
    }

    /// Releases spare words beyond the logical length.
    pub fn shrink_to_fit(&mut self) {
        self.words.truncate(words_for::<W>(self.len));
        self.words.shrink_to_fit();
    }

    /// Sets the logical length to zero, keeping the buffer.
    pub fn clear(&mut self) {
        self.words.fill(W::ZERO);
        self.len = 0;
    }

    /// Appends one bit, doubling the buffer when it is full.
    ///
    /// # Panics
    ///
    /// Panics if the word buffer cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_bits::BitVector;
    ///
    /// let mut bv = BitVector::<u8>::new();
    /// for i in 0..20 {
    ///     bv.push(i % 3 == 0);
    /// }
    /// assert_eq!(bv.len(), 20);
    /// assert_eq!(bv.count_ones(), 7);
    /// ```
    pub fn push(&mut self, value: bool) {
        if self.len == self.capacity() {
            let words = self.words.len().saturating_mul(2).max(1);
            self.grow(words, false)
                .unwrap_or_else(|err| alloc_failed(err));
        }
        let idx = self.len;
        self.len += 1;
        if value {
            self.set(idx);
        }
    }

    /// Returns the value of bit `idx`.
    #[must_use]
    #[inline]
    pub fn test(&self, idx: usize) -> bool {
        debug_assert!(idx < self.len, "bit index {idx} out of bounds for {} bits", self.len);
        let (wi, bi) = bitpos!(idx, W);
        self.words[wi] & W::bit(bi) != W::ZERO
    }

    /// Returns the value of bit `idx`. Same as [`test`](Self::test).
    #[must_use]
    #[inline(always)]
    pub fn get(&self, idx: usize) -> bool {
        self.test(idx)
    }

    /// Sets bit `idx`.
    #[inline]
    pub fn set(&mut self, idx: usize) -> &mut Self {
        debug_assert!(idx < self.len, "bit index {idx} out of bounds for {} bits", self.len);
        let (wi, bi) = bitpos!(idx, W);
        self.words[wi] |= W::bit(bi);
        self
    }

    /// Clears bit `idx`.
    #[inline]
    pub fn reset(&mut self, idx: usize) -> &mut Self {
        debug_assert!(idx < self.len, "bit index {idx} out of bounds for {} bits", self.len);
        let (wi, bi) = bitpos!(idx, W);
        self.words[wi] &= !W::bit(bi);
        self
    }

    /// Flips bit `idx`.
    #[inline]
    pub fn flip(&mut self, idx: usize) -> &mut Self {
        debug_assert!(idx < self.len, "bit index {idx} out of bounds for {} bits", self.len);
        let (wi, bi) = bitpos!(idx, W);
        self.words[wi] ^= W::bit(bi);
        self
    }

    /// Sets bit `idx` to `value`.
    #[inline]
    pub fn set_value(&mut self, idx: usize, value: bool) -> &mut Self {
        if value { self.set(idx) } else { self.reset(idx) }
    }

    /// Returns a write-through handle to bit `idx`.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_bits::BitVector;
    ///
    /// let mut bv = BitVector::<u16>::with_len(20, false);
    /// bv.bit_mut(17).set(true);
    /// assert!(bv[17]);
    ///
    /// let mut bit = bv.bit_mut(17);
    /// assert!(bit.get());
    /// bit.toggle();
    /// assert!(!bv[17]);
    /// ```
    #[must_use]
    #[inline]
    pub fn bit_mut(&mut self, idx: usize) -> BitMut<'_, W> {
        debug_assert!(idx < self.len, "bit index {idx} out of bounds for {} bits", self.len);
        let (wi, bi) = bitpos!(idx, W);
        BitMut {
            word: &mut self.words[wi],
            mask: W::bit(bi),
        }
    }

    /// Sets every logical bit.
    pub fn set_all(&mut self) -> &mut Self {
        let used = words_for::<W>(self.len);
        self.words[..used].fill(W::MAX);
        self.clear_unused_bits();
        self
    }

    /// Clears every bit.
    pub fn reset_all(&mut self) -> &mut Self {
        self.words.fill(W::ZERO);
        self
    }

    /// Flips every logical bit.
    pub fn flip_all(&mut self) -> &mut Self {
        let used = words_for::<W>(self.len);
        for word in &mut self.words[..used] {
            *word = !*word;
        }
        self.clear_unused_bits();
        self
    }

    /// Returns `true` if any bit is set.
    #[must_use]
    pub fn any(&self) -> bool {
        self.as_words().iter().any(|&w| w != W::ZERO)
    }

    /// Returns `true` if every bit is set. An empty vector is vacuously full.
    ///
    /// ```
    /// use packed_bits::BitVector;
    ///
    /// let mut bv = BitVector::<u64>::with_len(5, true);
    /// assert!(bv.all());
    /// bv.reset(2);
    /// assert!(!bv.all());
    /// assert!(BitVector::<u64>::new().all());
    /// ```
    #[must_use]
    pub fn all(&self) -> bool {
        let (full, rem) = bitpos!(self.len, W);
        if self.words[..full].iter().any(|&w| w != W::MAX) {
            return false;
        }
        rem == 0 || self.words[full] == mask_trailing_ones::<W>(rem)
    }

    /// Returns `true` if no bit is set.
    #[must_use]
    #[inline]
    pub fn none(&self) -> bool {
        !self.any()
    }

    /// Number of set bits.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.as_words()
            .iter()
            .map(|w| w.count_ones() as usize)
            .sum()
    }

    /// Returns the index of the first set bit in `[begin, end)`, or `None`
    /// if every bit in the range is clear. An empty range never matches.
    ///
    /// `begin <= end <= len` is part of the contract and checked in debug
    /// builds.
    ///
    /// ```
    /// use packed_bits::BitVector;
    ///
    /// let mut bv = BitVector::<u8>::with_len(30, false);
    /// bv.set(0).set(9).set(29);
    /// assert_eq!(bv.find_first_in(0, 0), None);
    /// assert_eq!(bv.find_first_in(1, 30), Some(9));
    /// assert_eq!(bv.find_first_in(10, 29), None);
    /// assert_eq!(bv.find_first_in(10, 30), Some(29));
    /// ```
    #[must_use]
    pub fn find_first_in(&self, begin: usize, end: usize) -> Option<usize> {
        debug_assert!(
            begin <= end && end <= self.len,
            "invalid range {begin}..{end} for {} bits",
            self.len
        );
        if begin >= end {
            return None;
        }

        let (first_wi, first_bi) = bitpos!(begin, W);
        let (last_wi, last_bi) = bitpos!(end - 1, W);

        for wi in first_wi..=last_wi {
            let mut word = self.words[wi];
            if wi == first_wi {
                word &= mask_trailing_zeros::<W>(first_bi);
            }
            if wi == last_wi {
                word &= mask_trailing_ones::<W>(last_bi + 1);
            }
            if word != W::ZERO {
                let bit = count_trailing_zeros(word, ZeroBehavior::Undefined) as usize;
                return Some(wi * W::BITS as usize + bit);
            }
        }
        None
    }

    /// Returns the index of the first set bit, or `None` if there is none.
    #[must_use]
    #[inline]
    pub fn find_first(&self) -> Option<usize> {
        self.find_first_in(0, self.len)
    }

    /// Returns the index of the first set bit after `prev`, or `None`.
    ///
    /// ```
    /// use packed_bits::BitVector;
    ///
    /// let mut bv = BitVector::<u32>::with_len(100, false);
    /// bv.set(10).set(90);
    /// assert_eq!(bv.find_next(10), Some(90));
    /// assert_eq!(bv.find_next(90), None);
    /// ```
    #[must_use]
    pub fn find_next(&self, prev: usize) -> Option<usize> {
        let begin = prev.checked_add(1)?;
        if begin >= self.len {
            return None;
        }
        self.find_first_in(begin, self.len)
    }

    /// Returns an iterator over the indices of set bits, in ascending order.
    #[must_use]
    pub fn iter_ones(&self) -> BitIter<&[W], W> {
        BitIter::new(self.as_words(), 0, self.len)
    }

    /// Grows the buffer to exactly `new_words` words filled with `fill`.
    fn grow(&mut self, new_words: usize, fill: bool) -> Result<(), Error> {
        let old_words = self.words.len();
        debug_assert!(new_words > old_words);

        if new_words
            .checked_mul(mem::size_of::<W>())
            .is_none_or(|bytes| bytes > isize::MAX as usize)
        {
            return Err(Error::CapacityOverflow {
                bits: new_words.saturating_mul(W::BITS as usize),
            });
        }
        if self.words.try_reserve_exact(new_words - old_words).is_err() {
            debug!(old_words, new_words, "bit vector growth failed");
            return Err(Error::AllocFailed { words: new_words });
        }

        trace!(old_words, new_words, fill, "growing bit vector storage");
        self.words.resize(new_words, W::splat(fill));
        Ok(())
    }

    /// Sets every bit at or above `len` to `value`, across the whole buffer.
    fn set_unused_bits(&mut self, value: bool) {
        let used = words_for::<W>(self.len);
        self.words[used..].fill(W::splat(value));

        let (wi, bi) = bitpos!(self.len, W);
        if bi != 0 {
            let extra = mask_trailing_zeros::<W>(bi);
            if value {
                self.words[wi] |= extra;
            } else {
                self.words[wi] &= !extra;
            }
        }
    }

    #[inline]
    fn clear_unused_bits(&mut self) {
        self.set_unused_bits(false);
    }
}

/// A write-through handle to a single bit of a [`BitVector`].
///
/// Returned by [`BitVector::bit_mut`].
#[derive(Debug)]
pub struct BitMut<'a, W: Word> {
    word: &'a mut W,
    mask: W,
}

impl<W: Word> BitMut<'_, W> {
    /// Returns the current value of the bit.
    #[must_use]
    #[inline]
    pub fn get(&self) -> bool {
        *self.word & self.mask != W::ZERO
    }

    /// Writes `value` to the bit.
    #[inline]
    pub fn set(&mut self, value: bool) {
        if value {
            *self.word |= self.mask;
        } else {
            *self.word &= !self.mask;
        }
    }

    /// Flips the bit and returns its previous value.
    #[inline]
    pub fn toggle(&mut self) -> bool {
        let prev = self.get();
        *self.word ^= self.mask;
        prev
    }
}

#[cold]
#[track_caller]
fn alloc_failed(err: Error) -> ! {
    panic!("{err}")
}
