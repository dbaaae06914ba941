//! codephrase-core: memorable word phrases packed into compact bit codes
//!
//! A phrase such as "red fox runs quickly" is described by a pattern
//! ("color animal verb adverb") that gives every word position a category and
//! a bit width. Each word is replaced by its index in the category's word
//! list, and the indices are packed back to back into a byte buffer.
//!
//! # Architecture
//!
//! The crate is organized leaf-first:
//! - `bitpack`: MSB-first packing of fixed-width fields
//! - `category` / `vocabulary`: word lists, injected by the caller
//! - `config`: loading word lists from disk
//! - `pattern`: pattern string compilation
//! - `codec`: phrase <-> code <-> bytes
//! - `generator`: uniform random phrases from a secure source
//!
//! # Design Principles
//!
//! - **No panics**: all errors are structured and returned, except from the
//!   explicit `Pattern::must_compile`
//! - **No global tables**: a `Vocabulary` is passed in and shared via `Arc`
//! - **Read-only after construction**: patterns and vocabularies are safe to
//!   use from many threads without locking
//! - **All or nothing**: encode, decode, and generate never return partial
//!   output

pub mod bitpack;
pub mod category;
pub mod codec;
pub mod config;
pub mod error;
pub mod generator;
pub mod pattern;
pub mod vocabulary;

// Re-export commonly used types
pub use category::Category;
pub use config::VocabularyConfig;
pub use error::{Error, Result};
pub use pattern::{Pattern, PatternSlot};
pub use vocabulary::{Vocabulary, WordList};
