//! Pattern compilation.
//!
//! A pattern string describes a phrase layout, one whitespace-separated token
//! per word:
//!
//! ```text
//! pattern := token (whitespace token)*
//! token   := category-name ["(" bits ")"]
//! ```
//!
//! `category-name` starts with an ASCII letter followed by letters, digits,
//! or `_`, and must name a category the vocabulary provides. The
//! parenthesized suffix is optional; when it is missing, not all digits, or
//! `0`, the slot takes the category's maximum width.
//!
//! # Example
//! ```
//! use std::sync::Arc;
//! use codephrase_core::{Category, Pattern, Vocabulary, WordList};
//!
//! let vocab = Arc::new(
//!     Vocabulary::new()
//!         .with(Category::Color, WordList::new(Category::Color, 2, ["red", "blue", "green", "black"]).unwrap())
//!         .with(Category::Animal, WordList::new(Category::Animal, 2, ["cat", "dog", "fox", "owl"]).unwrap()),
//! );
//!
//! let pattern = Pattern::compile("color(2) animal", vocab).unwrap();
//! assert_eq!(pattern.total_bits(), 4);
//! assert_eq!(pattern.encode(&["blue", "fox"]).unwrap(), vec![0x60]);
//! ```

use crate::bitpack::MAX_FIELD_BITS;
use crate::category::Category;
use crate::error::{BitIoError, PatternError, Result, VocabularyError};
use crate::vocabulary::Vocabulary;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// One word position: which category it draws from and how many bits it
/// occupies in the packed code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatternSlot {
    pub category: Category,
    pub bits: usize,
}

/// A compiled pattern bound to the vocabulary it was compiled against.
///
/// Immutable once compiled. Cloning is cheap (the vocabulary is shared), and
/// a pattern may be used from any number of threads at once.
#[derive(Debug, Clone)]
pub struct Pattern {
    slots: Vec<PatternSlot>,
    total_bits: usize,
    vocabulary: Arc<Vocabulary>,
}

impl Pattern {
    /// Compile `pattern` against `vocabulary`.
    ///
    /// Widths are not checked against 64 or against the word list sizes here;
    /// oversized widths surface when encoding, decoding, or generating. Call
    /// [`validate`](Self::validate) to check them up front.
    ///
    /// # Errors
    /// - `PatternError::Malformed` if a token is not `name` or `name(...)`
    /// - `PatternError::UnknownCategory` if a name is not a category, or the
    ///   vocabulary has no word list for it
    pub fn compile(pattern: &str, vocabulary: Arc<Vocabulary>) -> Result<Self> {
        let mut slots = Vec::new();
        let mut total_bits = 0usize;

        for token in pattern.split_whitespace() {
            let (name, suffix) = split_token(token)?;

            let category: Category = name.parse()?;
            let list = vocabulary.get(category).ok_or_else(|| PatternError::UnknownCategory {
                name: name.to_string(),
            })?;

            let bits = match suffix.and_then(parse_width) {
                Some(0) | None => list.max_bits(),
                Some(bits) => bits,
            };

            total_bits = total_bits.saturating_add(bits);
            slots.push(PatternSlot { category, bits });
        }

        debug!(slots = slots.len(), total_bits, "compiled pattern");

        Ok(Self {
            slots,
            total_bits,
            vocabulary,
        })
    }

    /// Compile a pattern that is known to be valid, such as a built-in one.
    ///
    /// # Panics
    /// Panics if the pattern does not compile.
    pub fn must_compile(pattern: &str, vocabulary: Arc<Vocabulary>) -> Self {
        match Self::compile(pattern, vocabulary) {
            Ok(compiled) => compiled,
            Err(e) => panic!("invalid pattern {:?}: {}", pattern, e),
        }
    }

    /// Sum of all slot widths.
    pub fn total_bits(&self) -> usize {
        self.total_bits
    }

    /// Bytes needed to hold a packed code.
    pub fn byte_len(&self) -> usize {
        self.total_bits.div_ceil(8)
    }

    pub fn slots(&self) -> &[PatternSlot] {
        &self.slots
    }

    /// Declared width of every slot, in order.
    pub fn widths(&self) -> Vec<usize> {
        self.slots.iter().map(|slot| slot.bits).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        &self.vocabulary
    }

    /// Check every slot against its word list.
    ///
    /// A slot passes when its width is at most 64, at most the category's
    /// maximum, and small enough that every value it can hold indexes a word.
    ///
    /// # Errors
    /// - `BitIoError::InvalidBitCount` for a width over 64
    /// - `VocabularyError::CapacityExceeded` for a width the list cannot back
    pub fn validate(&self) -> Result<()> {
        for (position, slot) in self.slots.iter().enumerate() {
            if slot.bits > MAX_FIELD_BITS {
                return Err(BitIoError::InvalidBitCount(slot.bits).into());
            }

            let list = self.vocabulary.require(slot.category)?;
            if slot.bits > list.max_bits() || slot.bits > list.capacity_bits() {
                return Err(VocabularyError::CapacityExceeded {
                    category: slot.category,
                    position,
                    bits: slot.bits,
                    capacity_bits: list.capacity_bits(),
                    max_bits: list.max_bits(),
                    len: list.len(),
                }
                .into());
            }
        }
        Ok(())
    }
}

impl fmt::Display for Pattern {
    /// Canonical form: every slot with an explicit width.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}({})", slot.category, slot.bits)?;
        }
        Ok(())
    }
}

/// Split `name(suffix)` into its parts.
fn split_token(token: &str) -> std::result::Result<(&str, Option<&str>), PatternError> {
    let malformed = || PatternError::Malformed {
        token: token.to_string(),
    };

    let (name, suffix) = match token.split_once('(') {
        Some((name, rest)) => {
            let inner = rest.strip_suffix(')').ok_or_else(malformed)?;
            if inner.contains(|c: char| c == '(' || c == ')') {
                return Err(malformed());
            }
            (name, Some(inner))
        }
        None => (token, None),
    };

    if !is_identifier(name) {
        return Err(malformed());
    }
    Ok((name, suffix))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Digits-only width; anything else (including overflow) means "default".
fn parse_width(suffix: &str) -> Option<usize> {
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}
