//! Claim bitmap over caller-owned 32-bit words.
//!
//! [`ConcurrentBitmap`] is a view: it borrows a word array that lives
//! somewhere else, typically inline in a larger memory-management structure
//! such as a heap region header, and never allocates or frees it. The word
//! width is fixed at 32 bits so that other code (including generated code)
//! can address the same words directly.
//!
//! ```text
//! |--word 0 (32 bit)--|--word 1 (32 bit)--|-- ... --|--word n-1 (32 bit)--|
//!  bit 0 .. bit 31     bit 32 .. bit 63              bit 32(n-1) .. 32n-1
//! ```
//!
//! # Claim protocol
//!
//! [`set_bit_atomic`](ConcurrentBitmap::set_bit_atomic) moves a bit from
//! clear to set and reports `true` to exactly one of any number of racing
//! callers. A successful claim is sequentially consistent: whatever the
//! winner wrote before claiming is visible to any thread that later observes
//! the bit through [`test`](ConcurrentBitmap::test).
//!
//! Clearing is not part of the protocol. [`clear_bit`](ConcurrentBitmap::clear_bit),
//! [`clear`](ConcurrentBitmap::clear) and
//! [`set_all_bits`](ConcurrentBitmap::set_all_bits) are plain read/write
//! sequences; callers must exclude concurrent claims on the affected words
//! themselves, otherwise a claim can be lost.

use core::{
    mem, slice,
    sync::atomic::{AtomicU32, Ordering},
};

/// Storage unit of a [`ConcurrentBitmap`].
pub type BitmapWord = u32;

/// Bytes per bitmap word.
pub const BYTES_PER_WORD: usize = mem::size_of::<BitmapWord>();

/// Bits per bitmap word.
pub const BITS_PER_WORD: usize = BYTES_PER_WORD * 8;

/// `log2(BITS_PER_WORD)`, for shift-based word indexing.
pub const BITS_PER_WORD_LOG2: u32 = BITS_PER_WORD.trailing_zeros();

/// Mask selecting the bit position within a word from a bit offset.
pub const BITS_PER_WORD_MASK: usize = BITS_PER_WORD - 1;

/// How [`ConcurrentBitmap::set_bit`] touches memory.
///
/// Implemented by the [`Atomic`] and [`NonAtomic`] markers. The choice is a
/// type parameter, so it is resolved at compile time.
pub trait Access: sealed::Sealed {
    /// Sets the bits of `mask` in `word`; returns `false` if they were
    /// already set.
    fn set_bits(word: &AtomicU32, mask: BitmapWord) -> bool;
}

/// Lock-free compare-and-swap access, safe under contention.
#[derive(Debug, Clone, Copy)]
pub struct Atomic;

/// Plain load/store access for a single writer.
#[derive(Debug, Clone, Copy)]
pub struct NonAtomic;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Atomic {}
    impl Sealed for super::NonAtomic {}
}

impl Access for Atomic {
    #[inline]
    fn set_bits(word: &AtomicU32, mask: BitmapWord) -> bool {
        let mut old = word.load(Ordering::Relaxed);
        loop {
            if old & mask != 0 {
                return false;
            }
            match word.compare_exchange_weak(old, old | mask, Ordering::SeqCst, Ordering::Relaxed)
            {
                Ok(_) => return true,
                // Another bit of the word (or this one) changed under us.
                Err(current) => old = current,
            }
        }
    }
}

impl Access for NonAtomic {
    #[inline]
    fn set_bits(word: &AtomicU32, mask: BitmapWord) -> bool {
        let old = word.load(Ordering::Relaxed);
        if old & mask != 0 {
            return false;
        }
        word.store(old | mask, Ordering::Relaxed);
        true
    }
}

/// A bit-claim view over externally owned 32-bit words.
///
/// The view has no size of its own: operations take a bit offset or a bit
/// extent, and callers keep them within the borrowed words. Offsets past the
/// borrowed words panic.
///
/// # Examples
///
/// ```
/// use core::sync::atomic::AtomicU32;
/// use packed_bits::ConcurrentBitmap;
///
/// let words: [AtomicU32; 4] = Default::default();
/// let bitmap = ConcurrentBitmap::from_words(&words);
///
/// assert!(bitmap.set_bit_atomic(70));
/// assert!(!bitmap.set_bit_atomic(70));
/// assert!(bitmap.test(70));
///
/// bitmap.clear_bit(70);
/// assert!(!bitmap.test(70));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConcurrentBitmap<'a> {
    words: &'a [AtomicU32],
}

impl<'a> ConcurrentBitmap<'a> {
    /// Creates a view over `words`.
    #[must_use]
    pub const fn from_words(words: &'a [AtomicU32]) -> Self {
        Self { words }
    }

    /// Creates a view over `len` words starting at `ptr`.
    ///
    /// This is the entry point for bitmaps embedded at a known offset inside
    /// a larger structure that is only reachable through a raw pointer.
    ///
    /// # Safety
    ///
    /// For the whole lifetime `'a`:
    /// - `ptr` must be non-null, aligned to `align_of::<AtomicU32>()` and
    ///   valid for reads and writes of `len` consecutive words;
    /// - every other access to those words must be atomic, for example
    ///   through another `ConcurrentBitmap` over the same memory.
    #[must_use]
    pub const unsafe fn from_raw_parts(ptr: *mut BitmapWord, len: usize) -> Self {
        // SAFETY: `AtomicU32` has the same size and bit validity as `u32`;
        // alignment, validity and exclusive-atomic access are guaranteed by
        // the caller.
        let words = unsafe { slice::from_raw_parts(ptr.cast::<AtomicU32>().cast_const(), len) };
        Self { words }
    }

    /// Borrows the underlying words.
    #[must_use]
    #[inline(always)]
    pub const fn words(&self) -> &'a [AtomicU32] {
        self.words
    }

    /// Number of borrowed words.
    #[must_use]
    #[inline(always)]
    pub const fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Clears every word covering the first `bit_extent` bits.
    ///
    /// Words are written whole, so bits past `bit_extent` in the last covered
    /// word are cleared as well.
    pub fn clear(&self, bit_extent: usize) {
        for word in self.covering(bit_extent) {
            word.store(0, Ordering::Relaxed);
        }
    }

    /// Sets every bit of every word covering the first `bit_extent` bits.
    pub fn set_all_bits(&self, bit_extent: usize) {
        for word in self.covering(bit_extent) {
            word.store(BitmapWord::MAX, Ordering::Relaxed);
        }
    }

    /// Sets the bit at `offset` with the access mode `A`.
    ///
    /// Returns `true` if this call moved the bit from clear to set, `false`
    /// if it was already set.
    ///
    /// ```
    /// use core::sync::atomic::AtomicU32;
    /// use packed_bits::{ConcurrentBitmap, concurrent::{Atomic, NonAtomic}};
    ///
    /// let words: [AtomicU32; 2] = Default::default();
    /// let bitmap = ConcurrentBitmap::from_words(&words);
    /// assert!(bitmap.set_bit::<NonAtomic>(3));
    /// assert!(!bitmap.set_bit::<Atomic>(3));
    /// ```
    #[inline]
    pub fn set_bit<A: Access>(&self, offset: usize) -> bool {
        A::set_bits(&self.words[word_index(offset)], bit_mask(offset))
    }

    /// Sets the bit at `offset` if it is clear; single-writer only.
    ///
    /// Concurrent mutation of the same word, by any method, may lose either
    /// update.
    #[inline]
    pub fn set_bit_non_atomic(&self, offset: usize) -> bool {
        self.set_bit::<NonAtomic>(offset)
    }

    /// Claims the bit at `offset`.
    ///
    /// Lock-free. Among all callers racing on the same clear bit, exactly one
    /// sees `true`; callers that find the bit already set return `false`
    /// without writing.
    #[inline]
    pub fn set_bit_atomic(&self, offset: usize) -> bool {
        self.set_bit::<Atomic>(offset)
    }

    /// Clears the bit at `offset`.
    ///
    /// Not part of the claim protocol; see the [module docs](self).
    #[inline]
    pub fn clear_bit(&self, offset: usize) {
        let word = &self.words[word_index(offset)];
        let old = word.load(Ordering::Relaxed);
        word.store(old & !bit_mask(offset), Ordering::Relaxed);
    }

    /// Returns the value of the bit at `offset`.
    #[must_use]
    #[inline]
    pub fn test(&self, offset: usize) -> bool {
        self.words[word_index(offset)].load(Ordering::Acquire) & bit_mask(offset) != 0
    }

    /// Reads word `index` as a raw value.
    ///
    /// Some owners store a non-bitmap value in a word, for example a region
    /// index in word 0 while the region is not being marked. Use the raw
    /// accessors for that and keep it apart from the bit operations.
    #[must_use]
    #[inline]
    pub fn raw_word(&self, index: usize) -> BitmapWord {
        self.words[index].load(Ordering::Relaxed)
    }

    /// Overwrites word `index` with a raw value.
    ///
    /// ```
    /// use core::sync::atomic::AtomicU32;
    /// use packed_bits::ConcurrentBitmap;
    ///
    /// let words: [AtomicU32; 2] = Default::default();
    /// let bitmap = ConcurrentBitmap::from_words(&words);
    /// bitmap.set_raw_word(0, 17);
    /// assert_eq!(bitmap.raw_word(0), 17);
    /// bitmap.clear(64);
    /// assert_eq!(bitmap.raw_word(0), 0);
    /// ```
    #[inline]
    pub fn set_raw_word(&self, index: usize, value: BitmapWord) {
        self.words[index].store(value, Ordering::Relaxed);
    }

    fn covering(&self, bit_extent: usize) -> &'a [AtomicU32] {
        let count = bit_extent.div_ceil(BITS_PER_WORD);
        debug_assert!(
            count <= self.words.len(),
            "extent of {bit_extent} bits exceeds {} words",
            self.words.len()
        );
        &self.words[..count]
    }
}

#[inline(always)]
const fn word_index(offset: usize) -> usize {
    offset >> BITS_PER_WORD_LOG2
}

#[inline(always)]
const fn bit_mask(offset: usize) -> BitmapWord {
    1 << (offset & BITS_PER_WORD_MASK)
}

/// A fixed array of bitmap words, laid out to be embedded in another
/// structure.
///
/// The struct is `repr(C)` with the words at byte offset
/// [`WORDS_OFFSET`](Self::WORDS_OFFSET), so a containing `repr(C)` structure
/// places the first bitmap word at `offset_of!(Outer, field) + WORDS_OFFSET`.
///
/// ```
/// use core::mem::offset_of;
/// use packed_bits::InlineBitmap;
///
/// #[repr(C)]
/// struct RegionHeader {
///     flags: u64,
///     marks: InlineBitmap<8>,
/// }
///
/// let header = RegionHeader { flags: 0, marks: InlineBitmap::new() };
/// assert!(header.marks.as_bitmap().set_bit_atomic(200));
/// assert_eq!(offset_of!(RegionHeader, marks) + InlineBitmap::<8>::WORDS_OFFSET, 8);
/// ```
#[derive(Debug)]
#[repr(C)]
pub struct InlineBitmap<const WORDS: usize> {
    words: [AtomicU32; WORDS],
}

impl<const WORDS: usize> InlineBitmap<WORDS> {
    /// Byte offset of the word array within the struct.
    pub const WORDS_OFFSET: usize = mem::offset_of!(Self, words);

    /// Number of bits the array holds.
    pub const BIT_CAPACITY: usize = WORDS * BITS_PER_WORD;

    /// Creates an array with every bit clear.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            words: [const { AtomicU32::new(0) }; WORDS],
        }
    }

    /// Borrows the words as a [`ConcurrentBitmap`].
    #[must_use]
    #[inline(always)]
    pub const fn as_bitmap(&self) -> ConcurrentBitmap<'_> {
        ConcurrentBitmap::from_words(&self.words)
    }

    /// Borrows the word array.
    #[must_use]
    #[inline(always)]
    pub const fn words(&self) -> &[AtomicU32; WORDS] {
        &self.words
    }
}

impl<const WORDS: usize> Default for InlineBitmap<WORDS> {
    fn default() -> Self {
        Self::new()
    }
}
