//! Word lists that map category indices to words and back.
//!
//! A [`Vocabulary`] is the capability every pattern operation reads from. It
//! is built once (from literal lists, or from files via
//! [`VocabularyConfig`](crate::config::VocabularyConfig)), wrapped in an
//! `Arc`, and then shared read-only by any number of patterns and threads.
//!
//! # Invariants
//! - `index` is the exact inverse of `words`: every word maps to exactly one
//!   index and vice versa
//! - `max_bits <= 64`
//!
//! Nothing here requires `2^max_bits <= words.len()`. Stock lists satisfy it,
//! and [`Pattern::validate`](crate::pattern::Pattern::validate) checks it for
//! callers that want the failure up front instead of at decode time.

use crate::bitpack::MAX_FIELD_BITS;
use crate::category::Category;
use crate::error::{Result, VocabularyError};
use std::collections::HashMap;
use std::fmt;

/// The words of one category, in index order.
#[derive(Clone)]
pub struct WordList {
    max_bits: usize,
    words: Vec<String>,
    index: HashMap<String, u64>,
}

impl WordList {
    /// Build a list with an explicit maximum slot width.
    ///
    /// # Errors
    /// - `VocabularyError::EmptyWordList` if `words` is empty
    /// - `VocabularyError::DuplicateWord` if a word appears twice
    /// - `VocabularyError::MaxBitsTooLarge` if `max_bits > 64`
    pub fn new<I, S>(category: Category, max_bits: usize, words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if max_bits > MAX_FIELD_BITS {
            return Err(VocabularyError::MaxBitsTooLarge { category, max_bits }.into());
        }

        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.is_empty() {
            return Err(VocabularyError::EmptyWordList { category }.into());
        }

        let mut index = HashMap::with_capacity(words.len());
        for (i, word) in words.iter().enumerate() {
            if index.insert(word.clone(), i as u64).is_some() {
                return Err(VocabularyError::DuplicateWord {
                    category,
                    word: word.clone(),
                    index: i,
                }
                .into());
            }
        }

        Ok(Self {
            max_bits,
            words,
            index,
        })
    }

    /// Build a list whose maximum width is the widest it can fully index.
    pub fn from_words<I, S>(category: Category, words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        let max_bits = capacity_bits(words.len());
        Self::new(category, max_bits, words)
    }

    /// Widest slot this category allows.
    pub fn max_bits(&self) -> usize {
        self.max_bits
    }

    /// Widest slot every index of which names a word: `floor(log2(len))`.
    pub fn capacity_bits(&self) -> usize {
        capacity_bits(self.words.len())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Word at `index`, if the list is long enough.
    pub fn word(&self, index: u64) -> Option<&str> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.words.get(i))
            .map(String::as_str)
    }

    /// Index of `word`, if it belongs to the list.
    pub fn index_of(&self, word: &str) -> Option<u64> {
        self.index.get(word).copied()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl fmt::Debug for WordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordList")
            .field("max_bits", &self.max_bits)
            .field("len", &self.words.len())
            .finish()
    }
}

fn capacity_bits(len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (len.ilog2() as usize).min(MAX_FIELD_BITS)
    }
}

/// Word lists keyed by category.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    lists: HashMap<Category, WordList>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the list for `category`.
    pub fn insert(&mut self, category: Category, list: WordList) -> Option<WordList> {
        self.lists.insert(category, list)
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, category: Category, list: WordList) -> Self {
        self.insert(category, list);
        self
    }

    pub fn get(&self, category: Category) -> Option<&WordList> {
        self.lists.get(&category)
    }

    /// Like [`get`](Self::get), but a missing list is an error.
    pub fn require(&self, category: Category) -> Result<&WordList> {
        self.get(category)
            .ok_or_else(|| VocabularyError::MissingCategory { category }.into())
    }

    pub fn contains(&self, category: Category) -> bool {
        self.lists.contains_key(&category)
    }

    /// Categories with a word list, in declaration order.
    pub fn categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = self.lists.keys().copied().collect();
        categories.sort();
        categories
    }
}
