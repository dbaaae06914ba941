//! Error types for codephrase.
//!
//! All operations return structured errors rather than panicking. Nothing is
//! retried or logged internally; retry policy belongs to the caller.

use crate::category::Category;
use thiserror::Error;

/// Top-level error type for all operations in the crate.
///
/// Each variant corresponds to a specific failure domain:
/// - Bit I/O: packing/unpacking fields from/to byte buffers
/// - Pattern: pattern string compilation
/// - Codec: phrase <-> code conversion
/// - Vocabulary: word list construction and capacity checks
/// - Random source: entropy failure (fatal)
/// - I/O and config: loading word lists from disk
#[derive(Debug, Error)]
pub enum Error {
    /// Bit I/O operation failed (e.g., buffer shorter than the pattern)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Pattern string could not be compiled
    #[error("pattern error: {0}")]
    Pattern(#[from] PatternError),

    /// Phrase could not be encoded or code could not be decoded
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Word list is invalid or too small for a pattern
    #[error("vocabulary error: {0}")]
    Vocabulary(#[from] VocabularyError),

    /// The secure random source failed. Never retried.
    #[error("random source failure: {0}")]
    RandomSource(#[from] rand::Error),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Bit-level I/O errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitIoError {
    /// Attempted to read more bits than the buffer holds
    #[error("insufficient bits: requested {requested}, available {available}")]
    InsufficientBits { requested: usize, available: usize },

    /// Field width does not fit a 64-bit value
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),
}

/// Pattern compilation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    /// Token is not of the form `name` or `name(bits)`
    #[error("malformed token {token:?}: expected \"type1(bits) type2(bits) ...\"")]
    Malformed { token: String },

    /// Token names a category the vocabulary does not provide
    #[error("unknown category {name:?}")]
    UnknownCategory { name: String },
}

/// Phrase codec errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Word is not in its slot's category table
    #[error("word {word:?} at position {position} not found in table")]
    UnknownWord { word: String, position: usize },

    /// Phrase length differs from the pattern's slot count
    #[error("phrase has {actual} words, pattern expects {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Decoded or sampled index lies past the end of the word list
    #[error("{category} index {index} out of range for {len} words")]
    IndexOutOfRange {
        category: Category,
        index: u64,
        len: usize,
    },

    /// Word exists but its index needs more bits than the slot declares
    #[error("word {word:?} at position {position} has index {index}, which does not fit in {bits} bits")]
    WordTooWide {
        word: String,
        position: usize,
        index: u64,
        bits: usize,
    },
}

/// Vocabulary errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VocabularyError {
    /// A word list must contain at least one word
    #[error("{category} word list is empty")]
    EmptyWordList { category: Category },

    /// Every word must map to exactly one index
    #[error("{category} word list repeats {word:?} at index {index}")]
    DuplicateWord {
        category: Category,
        word: String,
        index: usize,
    },

    /// Indices are carried in 64-bit values
    #[error("{category} max bits {max_bits} exceeds 64")]
    MaxBitsTooLarge { category: Category, max_bits: usize },

    /// The vocabulary has no word list for the category
    #[error("no word list for {category}")]
    MissingCategory { category: Category },

    /// A slot declares more bits than its word list can index
    #[error("{category} slot {position} uses {bits} bits but only {capacity_bits} are indexable ({len} words, max {max_bits})")]
    CapacityExceeded {
        category: Category,
        position: usize,
        bits: usize,
        capacity_bits: usize,
        max_bits: usize,
        len: usize,
    },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
