//! Error types for fallible container operations.

use thiserror::Error;

/// Errors returned by [`BitVector`](crate::BitVector) when its storage cannot
/// be created or grown.
///
/// Out-of-range indices are contract violations and are never reported
/// through this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested bit count does not fit in the address space.
    #[error("capacity overflow: {bits} bits cannot be addressed")]
    CapacityOverflow {
        /// Number of bits requested.
        bits: usize,
    },
    /// The allocator refused to provide the backing words.
    #[error("allocation of {words} words failed")]
    AllocFailed {
        /// Total number of words requested.
        words: usize,
    },
    /// A word buffer handed to the container has the wrong length.
    #[error("word count mismatch: expected {expected}, found {found}")]
    WordCountMismatch {
        /// Words needed for the requested bit count.
        expected: usize,
        /// Words actually supplied.
        found: usize,
    },
}
