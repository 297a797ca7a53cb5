//! Word-packed bit containers and the bit-scanning primitives they share.
//!
//! The crate provides four containers over a common set of word-level helpers:
//!
//! - [`FixedBitSet`]: a compile-time-sized set stored inline in a word array.
//! - [`BitVector`]: a heap-backed vector of bits that can grow and shrink,
//!   keeping its buffer when it shrinks.
//! - [`ConcurrentBitmap`]: a view over caller-owned 32-bit words supporting a
//!   lock-free "claim this bit" operation, used for marking objects or slots
//!   from several threads at once.
//! - [`WordBitSet`]: a set of flags held in a single word.
//!
//! All multi-word containers pack bit `i` at position `i % W::BITS` of word
//! `i / W::BITS`, and keep every bit past their logical size clear.
//!
//! # Examples
//!
//! ```
//! use packed_bits::{BitVector, FixedBitSet, words_for};
//!
//! let mut fixed = FixedBitSet::<100, { words_for::<u64>(100) }, u64>::new();
//! fixed.set(42);
//! assert_eq!(fixed.find_bit(0, true), 42);
//!
//! let mut bv = BitVector::<u64>::with_len(10, false);
//! bv.set(3).set(7);
//! assert_eq!(bv.find_first_in(4, 10), Some(7));
//!
//! bv.resize(200, true);
//! assert_eq!(bv.count_ones(), 2 + 190);
//! ```
//!
//! # Features
//!
//! - `std` (default): enables `std` support in the error and logging
//!   dependencies. Without it the crate is `no_std` and needs `alloc`.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod error;
mod fixed;
mod iter;
mod macros;
mod traits;
mod vector;
mod word;
mod word_set;

pub mod concurrent;
pub mod scan;

pub use concurrent::{Access, Atomic, ConcurrentBitmap, InlineBitmap, NonAtomic};
pub use error::Error;
pub use fixed::FixedBitSet;
pub use iter::BitIter;
pub use scan::ZeroBehavior;
pub use vector::{BitMut, BitVector};
pub use word::{Word, words_for};
pub use word_set::WordBitSet;
