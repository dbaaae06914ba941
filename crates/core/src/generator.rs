//! Random phrase generation.
//!
//! Each slot draws 8 bytes from a cryptographically secure source, reads them
//! as a little-endian `u64`, and keeps the low `effective` bits. Masking the
//! low bits of a uniform 64-bit value is itself uniform over
//! `[0, 2^effective)`, so no rejection loop or modulo is needed.
//!
//! The effective width of a slot is its declared width, clamped to the
//! category's maximum (a declared width of 0 also takes the maximum). The
//! sampled value is used directly as the word index, which requires
//! `2^effective <= words.len()`; a shorter list fails with
//! `CodecError::IndexOutOfRange`.
//!
//! Draws are one-shot. A failing random source is reported immediately as
//! `Error::RandomSource` and never retried.

use crate::bitpack::{self, low_mask};
use crate::error::{CodecError, Result};
use crate::pattern::{Pattern, PatternSlot};
use crate::vocabulary::WordList;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::trace;

/// Width a slot actually samples.
pub fn effective_bits(slot: &PatternSlot, list: &WordList) -> usize {
    if slot.bits == 0 || slot.bits > list.max_bits() {
        list.max_bits()
    } else {
        slot.bits
    }
}

/// Generate a random phrase from the operating system's CSPRNG.
///
/// Returns the phrase together with its packed code.
pub fn random_phrase(pattern: &Pattern) -> Result<(Vec<String>, Vec<u8>)> {
    random_phrase_with(pattern, &mut OsRng)
}

/// Generate a random phrase from `rng`.
///
/// # Errors
/// - `Error::RandomSource` if `rng` fails to produce bytes
/// - `CodecError::IndexOutOfRange` if a sampled index has no word
pub fn random_phrase_with<R>(pattern: &Pattern, rng: &mut R) -> Result<(Vec<String>, Vec<u8>)>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let vocabulary = pattern.vocabulary();
    let mut phrase = Vec::with_capacity(pattern.len());
    let mut fields = Vec::with_capacity(pattern.len());

    for slot in pattern.slots() {
        let list = vocabulary.require(slot.category)?;
        let bits = effective_bits(slot, list);
        let index = random_bits(rng, bits)?;

        let word = list.word(index).ok_or(CodecError::IndexOutOfRange {
            category: slot.category,
            index,
            len: list.len(),
        })?;

        phrase.push(word.to_string());
        fields.push((index, bits));
    }

    let bits: usize = fields.iter().map(|&(_, bits)| bits).sum();
    trace!(slots = phrase.len(), bits, "generated random phrase");

    let bytes = bitpack::pack(fields)?;
    Ok((phrase, bytes))
}

/// Uniform value in `[0, 2^bits)` from one 8-byte draw.
fn random_bits<R>(rng: &mut R, bits: usize) -> Result<u64>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut buf = [0u8; 8];
    rng.try_fill_bytes(&mut buf)?;
    Ok(u64::from_le_bytes(buf) & low_mask(bits))
}

impl Pattern {
    /// Generate a random phrase and its packed code. See [`random_phrase`].
    pub fn random_phrase(&self) -> Result<(Vec<String>, Vec<u8>)> {
        random_phrase(self)
    }

    /// Like [`random_phrase`](Self::random_phrase), drawing from `rng`.
    pub fn random_phrase_with<R>(&self, rng: &mut R) -> Result<(Vec<String>, Vec<u8>)>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        random_phrase_with(self, rng)
    }
}
