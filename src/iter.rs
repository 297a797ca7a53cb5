//! Iterator over the set bits of a word slice.

use core::{borrow::Borrow, iter::FusedIterator, marker::PhantomData};

use crate::{
    macros::bitpos,
    scan::{ZeroBehavior, count_trailing_zeros, mask_trailing_ones, mask_trailing_zeros},
    word::Word,
};

/// An iterator over the indices of set bits in a window of packed words.
///
/// This iterator is double-ended, allowing iteration from both the beginning
/// and end of the window. It skips over words that contain no set bits.
///
/// The storage parameter `S` lets the iterator borrow the words of a
/// [`FixedBitSet`](crate::FixedBitSet) or a [`BitVector`](crate::BitVector).
///
/// # Examples
///
/// ```
/// use packed_bits::BitVector;
///
/// let mut bv = BitVector::<u64>::with_len(200, false);
/// bv.set(5);
/// bv.set(70);
/// bv.set(199);
///
/// let indices: Vec<_> = bv.iter_ones().collect();
/// assert_eq!(indices, vec![5, 70, 199]);
///
/// let rev: Vec<_> = bv.iter_ones().rev().collect();
/// assert_eq!(rev, vec![199, 70, 5]);
/// ```
#[derive(Clone)]
pub struct BitIter<S: Borrow<[W]>, W: Word> {
    words: S,
    pos: usize,  // next bit position (forward)
    rpos: usize, // one past the last bit position (reverse)
    _word: PhantomData<W>,
}

impl<S: Borrow<[W]>, W: Word> BitIter<S, W> {
    /// Iterates the set bits of `words` in `[pos, rpos)`.
    pub(crate) fn new(words: S, pos: usize, rpos: usize) -> Self {
        Self {
            words,
            pos,
            rpos,
            _word: PhantomData,
        }
    }
}

impl<S: Borrow<[W]>, W: Word> Iterator for BitIter<S, W> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let slice = self.words.borrow();
        let bits = W::BITS as usize;

        while self.pos < self.rpos {
            let (mut wi, bi) = bitpos!(self.pos, W);
            if wi >= slice.len() {
                return None;
            }

            let word = slice[wi] >> bi;
            if word == W::ZERO {
                wi += 1;
                while wi < slice.len() && slice[wi] == W::ZERO {
                    wi += 1;
                }
                self.pos = wi * bits;
                continue;
            }

            let result = self.pos + count_trailing_zeros(word, ZeroBehavior::Undefined) as usize;
            if result >= self.rpos {
                self.pos = self.rpos;
                return None;
            }
            self.pos = result + 1;
            return Some(result);
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len();
        (n, Some(n))
    }
}

impl<S: Borrow<[W]>, W: Word> ExactSizeIterator for BitIter<S, W> {
    fn len(&self) -> usize {
        if self.pos >= self.rpos {
            return 0;
        }

        let slice = self.words.borrow();
        let (wmin, bmin) = bitpos!(self.pos, W);
        let (wmax, bmax) = bitpos!(self.rpos, W);

        let word = |wi: usize| slice.get(wi).copied().unwrap_or(W::ZERO);

        if wmin == wmax {
            let mask = mask_trailing_zeros::<W>(bmin) & mask_trailing_ones::<W>(bmax);
            return (word(wmin) & mask).count_ones() as usize;
        }

        let mut count = (word(wmin) & mask_trailing_zeros::<W>(bmin)).count_ones() as usize;
        count += slice
            .iter()
            .take(wmax)
            .skip(wmin + 1)
            .map(|&w| w.count_ones() as usize)
            .sum::<usize>();
        count += (word(wmax) & mask_trailing_ones::<W>(bmax)).count_ones() as usize;
        count
    }
}

impl<S: Borrow<[W]>, W: Word> FusedIterator for BitIter<S, W> {}

impl<S: Borrow<[W]>, W: Word> DoubleEndedIterator for BitIter<S, W> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let slice = self.words.borrow();
        let bits = W::BITS as usize;

        while self.rpos > self.pos {
            let (wi, bi) = bitpos!(self.rpos - 1, W);

            if wi >= slice.len() {
                self.rpos = slice.len() * bits;
                continue;
            }

            // Only bits up to and including `bi`.
            let masked = slice[wi] & mask_trailing_ones::<W>(bi + 1);
            if masked == W::ZERO {
                self.rpos = wi * bits;
                continue;
            }

            let highest = (W::BITS - 1 - masked.leading_zeros()) as usize;
            let result = wi * bits + highest;
            if result < self.pos {
                self.rpos = self.pos;
                return None;
            }
            self.rpos = result;
            return Some(result);
        }

        None
    }
}
