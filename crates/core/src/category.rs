//! Semantic word classes a pattern slot can draw from.

use crate::error::PatternError;
use std::fmt;
use std::str::FromStr;

/// A semantic word class.
///
/// The set is closed: adding a category means adding a variant here and a
/// word list for it in the [`Vocabulary`](crate::vocabulary::Vocabulary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Animal,
    Verb,
    Color,
    Adverb,
    Adjective,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 5] = [
        Category::Animal,
        Category::Verb,
        Category::Color,
        Category::Adverb,
        Category::Adjective,
    ];

    /// Name used in pattern strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Animal => "animal",
            Category::Verb => "verb",
            Category::Color => "color",
            Category::Adverb => "adverb",
            Category::Adjective => "adjective",
        }
    }

    /// File stem of the category's word list (`animals.txt`, ...).
    pub fn file_stem(self) -> &'static str {
        match self {
            Category::Animal => "animals",
            Category::Verb => "verbs",
            Category::Color => "colors",
            Category::Adverb => "adverbs",
            Category::Adjective => "adjectives",
        }
    }

    /// Width of the stock word list for this category.
    pub fn default_max_bits(self) -> usize {
        match self {
            Category::Animal => 8,
            Category::Verb => 10,
            Category::Color => 6,
            Category::Adverb => 11,
            Category::Adjective => 10,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| PatternError::UnknownCategory {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!("Animal".parse::<Category>().is_err());
        assert_eq!(
            "noun".parse::<Category>(),
            Err(PatternError::UnknownCategory {
                name: "noun".to_string()
            })
        );
    }

    #[test]
    fn test_default_widths() {
        assert_eq!(Category::Color.default_max_bits(), 6);
        assert_eq!(Category::Adverb.default_max_bits(), 11);
    }
}
