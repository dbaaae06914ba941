//! Configuration for loading word lists from disk.
//!
//! Word lists are plain text files with one word per line, named after the
//! plural of their category: `animals.txt`, `verbs.txt`, `colors.txt`,
//! `adverbs.txt`, `adjectives.txt`. Blank lines and surrounding whitespace
//! are ignored; line order is index order.
//!
//! # Environment
//!
//! | Variable                         | Default   |
//! |----------------------------------|-----------|
//! | `CODEPHRASE_WORDS_DIR`           | `./words` |
//! | `CODEPHRASE_WORDS_EXT`           | `txt`     |
//! | `CODEPHRASE_MAX_BITS_<CATEGORY>` | per-category stock width |
//!
//! `<CATEGORY>` is the uppercase category name, e.g.
//! `CODEPHRASE_MAX_BITS_ANIMAL=7`.

use crate::category::Category;
use crate::error::{Error, Result};
use crate::vocabulary::{Vocabulary, WordList};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

const ENV_DIR: &str = "CODEPHRASE_WORDS_DIR";
const ENV_EXT: &str = "CODEPHRASE_WORDS_EXT";
const ENV_MAX_BITS_PREFIX: &str = "CODEPHRASE_MAX_BITS_";

/// Where word lists live and how wide each category may be.
#[derive(Debug, Clone)]
pub struct VocabularyConfig {
    /// Directory holding one file per category
    pub word_list_dir: PathBuf,

    /// File extension of the word lists (without the dot)
    pub extension: String,

    /// Per-category width overrides; missing entries use the stock width
    pub max_bits: HashMap<Category, usize>,

    /// Categories to load
    pub categories: Vec<Category>,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            word_list_dir: PathBuf::from("./words"),
            extension: "txt".to_string(),
            max_bits: HashMap::new(),
            categories: Category::ALL.to_vec(),
        }
    }
}

impl VocabularyConfig {
    /// Default configuration rooted at `dir`.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            word_list_dir: dir.into(),
            ..Self::default()
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(std::env::vars())
    }

    /// Read configuration from `(name, value)` pairs.
    ///
    /// Unrelated names are ignored.
    ///
    /// # Errors
    /// `Error::Config` for an unknown category suffix, an unparsable width,
    /// or an empty directory/extension value.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();

        for (key, value) in vars {
            let (key, value) = (key.as_ref(), value.as_ref().trim());
            match key {
                ENV_DIR => {
                    if value.is_empty() {
                        return Err(Error::Config(format!("{} is empty", ENV_DIR)));
                    }
                    config.word_list_dir = PathBuf::from(value);
                }
                ENV_EXT => {
                    let ext = value.trim_start_matches('.');
                    if ext.is_empty() {
                        return Err(Error::Config(format!("{} is empty", ENV_EXT)));
                    }
                    config.extension = ext.to_string();
                }
                _ => {
                    if let Some(suffix) = key.strip_prefix(ENV_MAX_BITS_PREFIX) {
                        let category: Category = suffix
                            .to_ascii_lowercase()
                            .parse()
                            .map_err(|_| Error::Config(format!("unknown category in {}", key)))?;
                        let bits: usize = value
                            .parse()
                            .map_err(|_| Error::Config(format!("invalid bit width for {}: {:?}", key, value)))?;
                        config.max_bits.insert(category, bits);
                    }
                }
            }
        }

        Ok(config)
    }

    /// Width configured for `category`.
    pub fn max_bits_for(&self, category: Category) -> usize {
        self.max_bits
            .get(&category)
            .copied()
            .unwrap_or_else(|| category.default_max_bits())
    }

    /// Path of the word list for `category`.
    pub fn path_for(&self, category: Category) -> PathBuf {
        self.word_list_dir
            .join(category.file_stem())
            .with_extension(&self.extension)
    }

    /// Load every configured category into a [`Vocabulary`].
    ///
    /// # Errors
    /// - `Error::Io` if a file cannot be read
    /// - `Error::Vocabulary` if a list is empty, repeats a word, or is
    ///   configured wider than 64 bits
    pub fn load(&self) -> Result<Vocabulary> {
        let mut vocabulary = Vocabulary::new();
        for &category in &self.categories {
            let list = load_word_list(&self.path_for(category), category, self.max_bits_for(category))?;
            debug!(
                category = %category,
                words = list.len(),
                max_bits = list.max_bits(),
                "loaded word list"
            );
            vocabulary.insert(category, list);
        }
        Ok(vocabulary)
    }
}

/// Parse one newline-separated word list file.
pub fn load_word_list(path: &Path, category: Category, max_bits: usize) -> Result<WordList> {
    let contents = std::fs::read_to_string(path)?;
    let words = contents.lines().map(str::trim).filter(|line| !line.is_empty());
    WordList::new(category, max_bits, words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VocabularyError;
    use std::fs;

    #[test]
    fn test_defaults() {
        let config = VocabularyConfig::default();
        assert_eq!(config.word_list_dir, PathBuf::from("./words"));
        assert_eq!(config.max_bits_for(Category::Animal), 8);
        assert_eq!(config.categories.len(), 5);
        assert_eq!(config.path_for(Category::Color), PathBuf::from("./words/colors.txt"));
    }

    #[test]
    fn test_from_vars() {
        let config = VocabularyConfig::from_vars([
            ("CODEPHRASE_WORDS_DIR", "/srv/words"),
            ("CODEPHRASE_WORDS_EXT", ".list"),
            ("CODEPHRASE_MAX_BITS_ANIMAL", "7"),
            ("HOME", "/root"),
        ])
        .unwrap();

        assert_eq!(config.word_list_dir, PathBuf::from("/srv/words"));
        assert_eq!(config.max_bits_for(Category::Animal), 7);
        assert_eq!(config.max_bits_for(Category::Verb), 10);
        assert_eq!(config.path_for(Category::Verb), PathBuf::from("/srv/words/verbs.list"));
    }

    #[test]
    fn test_from_vars_rejects_bad_values() {
        assert!(matches!(
            VocabularyConfig::from_vars([("CODEPHRASE_MAX_BITS_NOUN", "3")]),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            VocabularyConfig::from_vars([("CODEPHRASE_MAX_BITS_COLOR", "six")]),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            VocabularyConfig::from_vars([("CODEPHRASE_WORDS_DIR", "  ")]),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("colors.txt"), "red\nblue\n\n  green \nblack\n").unwrap();
        fs::write(dir.path().join("animals.txt"), "cat\ndog\nfox\nowl").unwrap();

        let mut config = VocabularyConfig::with_dir(dir.path());
        config.categories = vec![Category::Color, Category::Animal];
        config.max_bits.insert(Category::Color, 2);
        config.max_bits.insert(Category::Animal, 2);

        let vocab = config.load().unwrap();
        let colors = vocab.get(Category::Color).unwrap();
        assert_eq!(colors.len(), 4);
        assert_eq!(colors.index_of("green"), Some(2));
        assert_eq!(vocab.get(Category::Animal).unwrap().word(3), Some("owl"));
        assert!(!vocab.contains(Category::Verb));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = VocabularyConfig::with_dir(dir.path());
        assert!(matches!(config.load(), Err(Error::Io(_))));
    }

    #[test]
    fn test_load_duplicate_word() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verbs.txt");
        fs::write(&path, "run\njump\nrun\n").unwrap();

        let result = load_word_list(&path, Category::Verb, 1);
        assert!(matches!(
            result,
            Err(Error::Vocabulary(VocabularyError::DuplicateWord { index: 2, .. }))
        ));
    }
}
