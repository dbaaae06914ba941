//! Conversion between phrases, codes, and packed bytes.
//!
//! A phrase maps to a code (one word-list index per slot), and the code packs
//! into bytes using the slot widths of the pattern:
//!
//! ```text
//! ["blue", "fox"]  <->  [1, 2]  <->  01 10 0000  (0x60)
//!                       color(2) animal(2)
//! ```
//!
//! Both directions are all-or-nothing: the first bad word or index fails the
//! whole call.

use crate::bitpack::{self, low_mask, MAX_FIELD_BITS};
use crate::error::{CodecError, Result};
use crate::pattern::Pattern;

/// Look up the index of every word in its slot's word list.
///
/// # Errors
/// - `CodecError::LengthMismatch` if the phrase and pattern differ in length
/// - `CodecError::UnknownWord` if a word is not in its category
/// - `CodecError::WordTooWide` if a word's index does not fit its slot
pub fn phrase_to_code<S: AsRef<str>>(pattern: &Pattern, phrase: &[S]) -> Result<Vec<u64>> {
    check_len(pattern, phrase.len())?;

    let vocabulary = pattern.vocabulary();
    let mut code = Vec::with_capacity(phrase.len());

    for (position, (slot, word)) in pattern.slots().iter().zip(phrase).enumerate() {
        let word = word.as_ref();
        let list = vocabulary.require(slot.category)?;

        let index = list.index_of(word).ok_or_else(|| CodecError::UnknownWord {
            word: word.to_string(),
            position,
        })?;

        // Widths over 64 are left for the packer to reject
        if slot.bits <= MAX_FIELD_BITS && index > low_mask(slot.bits) {
            return Err(CodecError::WordTooWide {
                word: word.to_string(),
                position,
                index,
                bits: slot.bits,
            }
            .into());
        }

        code.push(index);
    }

    Ok(code)
}

/// Look up the word at every index of `code`.
///
/// # Errors
/// - `CodecError::LengthMismatch` if the code and pattern differ in length
/// - `CodecError::IndexOutOfRange` if an index is past the end of its list
pub fn code_to_phrase(pattern: &Pattern, code: &[u64]) -> Result<Vec<String>> {
    check_len(pattern, code.len())?;

    let vocabulary = pattern.vocabulary();
    pattern
        .slots()
        .iter()
        .zip(code)
        .map(|(slot, &index)| -> Result<String> {
            let list = vocabulary.require(slot.category)?;
            list.word(index).map(str::to_string).ok_or_else(|| {
                CodecError::IndexOutOfRange {
                    category: slot.category,
                    index,
                    len: list.len(),
                }
                .into()
            })
        })
        .collect()
}

/// Encode a phrase into packed bytes.
pub fn encode<S: AsRef<str>>(pattern: &Pattern, phrase: &[S]) -> Result<Vec<u8>> {
    let code = phrase_to_code(pattern, phrase)?;
    bitpack::pack(code.into_iter().zip(pattern.widths()))
}

/// Decode packed bytes into a phrase.
///
/// Bytes past `pattern.byte_len()` are ignored.
///
/// # Errors
/// - `BitIoError::InsufficientBits` if `bytes` is shorter than the pattern
/// - `CodecError::IndexOutOfRange` if a field names no word
pub fn decode(pattern: &Pattern, bytes: &[u8]) -> Result<Vec<String>> {
    let code = bitpack::unpack(bytes, &pattern.widths())?;
    code_to_phrase(pattern, &code)
}

fn check_len(pattern: &Pattern, actual: usize) -> Result<()> {
    if actual != pattern.len() {
        return Err(CodecError::LengthMismatch {
            expected: pattern.len(),
            actual,
        }
        .into());
    }
    Ok(())
}

impl Pattern {
    /// Encode a phrase into packed bytes. See [`encode`].
    pub fn encode<S: AsRef<str>>(&self, phrase: &[S]) -> Result<Vec<u8>> {
        encode(self, phrase)
    }

    /// Decode packed bytes into a phrase. See [`decode`].
    pub fn decode(&self, bytes: &[u8]) -> Result<Vec<String>> {
        decode(self, bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::error::{BitIoError, Error};
    use crate::vocabulary::{Vocabulary, WordList};
    use std::sync::Arc;

    fn small_vocab() -> Arc<Vocabulary> {
        Arc::new(
            Vocabulary::new()
                .with(
                    Category::Color,
                    WordList::new(Category::Color, 2, ["red", "blue", "green", "black"]).unwrap(),
                )
                .with(
                    Category::Animal,
                    WordList::new(Category::Animal, 2, ["cat", "dog", "fox", "owl"]).unwrap(),
                ),
        )
    }

    fn color_animal() -> Pattern {
        Pattern::compile("color(2) animal(2)", small_vocab()).unwrap()
    }

    #[test]
    fn test_blue_fox() {
        let pattern = color_animal();
        assert_eq!(phrase_to_code(&pattern, &["blue", "fox"]).unwrap(), vec![1, 2]);

        let bytes = pattern.encode(&["blue", "fox"]).unwrap();
        assert_eq!(bytes, vec![0x60]);
        assert_eq!(pattern.decode(&[0x60]).unwrap(), vec!["blue", "fox"]);
    }

    #[test]
    fn test_every_phrase_round_trips() {
        let pattern = color_animal();
        let vocab = pattern.vocabulary().clone();
        for color in vocab.get(Category::Color).unwrap().words() {
            for animal in vocab.get(Category::Animal).unwrap().words() {
                let phrase = vec![color.clone(), animal.clone()];
                let bytes = pattern.encode(&phrase).unwrap();
                assert_eq!(bytes.len(), 1);
                assert_eq!(pattern.decode(&bytes).unwrap(), phrase);
            }
        }
    }

    #[test]
    fn test_unknown_word() {
        let pattern = Pattern::compile("animal", small_vocab()).unwrap();
        let result = pattern.encode(&["not-a-real-animal"]);
        match result {
            Err(Error::Codec(CodecError::UnknownWord { word, position })) => {
                assert_eq!(word, "not-a-real-animal");
                assert_eq!(position, 0);
            }
            other => panic!("expected unknown word, got {:?}", other),
        }
    }

    #[test]
    fn test_word_from_wrong_category() {
        let result = color_animal().encode(&["fox", "blue"]);
        assert!(matches!(
            result,
            Err(Error::Codec(CodecError::UnknownWord { position: 0, .. }))
        ));
    }

    #[test]
    fn test_length_mismatch() {
        let pattern = color_animal();
        assert!(matches!(
            pattern.encode(&["blue"]),
            Err(Error::Codec(CodecError::LengthMismatch {
                expected: 2,
                actual: 1
            }))
        ));
        assert!(matches!(
            code_to_phrase(&pattern, &[0, 1, 2]),
            Err(Error::Codec(CodecError::LengthMismatch {
                expected: 2,
                actual: 3
            }))
        ));
    }

    #[test]
    fn test_word_too_wide_for_slot() {
        let pattern = Pattern::compile("color(1) animal(2)", small_vocab()).unwrap();
        assert_eq!(pattern.encode(&["blue", "owl"]).unwrap(), vec![0b1110_0000]);

        let result = pattern.encode(&["green", "owl"]);
        assert!(matches!(
            result,
            Err(Error::Codec(CodecError::WordTooWide {
                position: 0,
                index: 2,
                bits: 1,
                ..
            }))
        ));
    }

    #[test]
    fn test_insufficient_bits() {
        let pattern = Pattern::compile("color(2) animal(2) color(2) animal(2) color(2)", small_vocab()).unwrap();
        assert_eq!(pattern.byte_len(), 2);
        assert!(matches!(
            pattern.decode(&[0xFF]),
            Err(Error::BitIo(BitIoError::InsufficientBits {
                requested: 10,
                available: 8
            }))
        ));
    }

    #[test]
    fn test_decoded_index_out_of_range() {
        let vocab = Arc::new(Vocabulary::new().with(
            Category::Animal,
            WordList::new(Category::Animal, 3, ["cat", "dog", "fox", "owl", "emu"]).unwrap(),
        ));
        let pattern = Pattern::compile("animal", vocab).unwrap();

        assert_eq!(pattern.decode(&[0b1000_0000]).unwrap(), vec!["emu"]);
        match pattern.decode(&[0b1110_0000]) {
            Err(Error::Codec(CodecError::IndexOutOfRange { category, index, len })) => {
                assert_eq!(category, Category::Animal);
                assert_eq!(index, 7);
                assert_eq!(len, 5);
            }
            other => panic!("expected index out of range, got {:?}", other),
        }
    }

    #[test]
    fn test_width_over_64_fails_at_encode() {
        let pattern = Pattern::compile("animal(65)", small_vocab()).unwrap();
        assert!(matches!(
            pattern.encode(&["cat"]),
            Err(Error::BitIo(BitIoError::InvalidBitCount(65)))
        ));
        assert!(matches!(
            pattern.decode(&[0; 16]),
            Err(Error::BitIo(BitIoError::InvalidBitCount(65)))
        ));
    }

    #[test]
    fn test_empty_pattern() {
        let pattern = Pattern::compile("", small_vocab()).unwrap();
        let bytes = pattern.encode::<&str>(&[]).unwrap();
        assert!(bytes.is_empty());
        assert!(pattern.decode(&bytes).unwrap().is_empty());
    }
}
