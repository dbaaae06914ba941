//! Bit packing of fixed-width integer fields.
//!
//! A code is a sequence of unsigned fields, each with its own width in
//! `0..=64`. Fields are written MSB-first and back to back: field N+1 starts
//! on the bit right after field N ends, with no alignment between them.
//!
//! # Padding Rules
//! - [`BitWriter`]: pads the final partial byte with trailing zeros
//! - [`BitReader`]: trailing bits past the requested widths are ignored
//!
//! # Example
//! ```
//! use codephrase_core::bitpack::{pack, unpack};
//!
//! // 01 | 10 -> 0110_0000
//! let bytes = pack([(0b01, 2), (0b10, 2)]).unwrap();
//! assert_eq!(bytes, vec![0x60]);
//! assert_eq!(unpack(&bytes, &[2, 2]).unwrap(), vec![0b01, 0b10]);
//! ```

use crate::error::{BitIoError, Result};

/// Largest field width a `u64` can carry.
pub const MAX_FIELD_BITS: usize = 64;

/// Mask keeping the low `bits` bits of a `u64`.
pub(crate) fn low_mask(bits: usize) -> u64 {
    if bits >= MAX_FIELD_BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Pack `(value, width)` fields into bytes, MSB-first, zero-padded at the end.
///
/// Only the low `width` bits of each value are written; callers make sure
/// values already fit.
///
/// # Errors
/// `BitIoError::InvalidBitCount` if any width exceeds 64. Nothing is
/// returned in that case, not even the fields packed before it.
pub fn pack<I>(fields: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = (u64, usize)>,
{
    let mut writer = BitWriter::new();
    for (value, width) in fields {
        writer.write_bits(value, width)?;
    }
    Ok(writer.finish())
}

/// Unpack one value per entry of `widths`, reading MSB-first.
///
/// # Errors
/// - `BitIoError::InvalidBitCount` if any width exceeds 64
/// - `BitIoError::InsufficientBits` if `bytes` runs out before every width
///   is satisfied
pub fn unpack(bytes: &[u8], widths: &[usize]) -> Result<Vec<u64>> {
    if let Some(&width) = widths.iter().find(|&&w| w > MAX_FIELD_BITS) {
        return Err(BitIoError::InvalidBitCount(width).into());
    }

    let requested: usize = widths.iter().sum();
    let available = bytes.len() * 8;
    if requested > available {
        return Err(BitIoError::InsufficientBits {
            requested,
            available,
        }
        .into());
    }

    let mut reader = BitReader::new(bytes);
    widths.iter().map(|&w| reader.read_bits(w)).collect()
}

/// Writes bit fields MSB-first into a growing byte buffer.
///
/// # Invariants
/// - `pending` holds the bits of the current partial byte, MSB-aligned
/// - `pending_bits` is always < 8
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    pending: u8,
    pending_bits: usize,
}

impl BitWriter {
    /// Create a writer with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the low `count` bits of `value`, most significant first.
    ///
    /// # Errors
    /// Returns `BitIoError::InvalidBitCount` if count > 64.
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > MAX_FIELD_BITS {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        let mut remaining = count;
        let value = value & low_mask(count);

        while remaining > 0 {
            let room = 8 - self.pending_bits;
            let take = remaining.min(room);
            let shift = remaining - take;
            let chunk = ((value >> shift) & low_mask(take)) as u8;

            self.pending |= chunk << (room - take);
            self.pending_bits += take;
            remaining -= take;

            if self.pending_bits == 8 {
                self.bytes.push(self.pending);
                self.pending = 0;
                self.pending_bits = 0;
            }
        }

        Ok(())
    }

    /// Total number of bits written, including the partial byte.
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.pending_bits
    }

    /// Flush the partial byte (zero-padded) and return the output.
    pub fn finish(mut self) -> Vec<u8> {
        if self.pending_bits > 0 {
            self.bytes.push(self.pending);
        }
        self.bytes
    }
}

/// Reads bit fields MSB-first from a byte slice.
///
/// # Invariants
/// - `position` never exceeds `data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader positioned at the MSB of the first byte.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Read `count` bits as the low bits of a `u64`.
    ///
    /// # Errors
    /// - `BitIoError::InvalidBitCount` if count > 64
    /// - `BitIoError::InsufficientBits` if fewer than `count` bits remain
    pub fn read_bits(&mut self, count: usize) -> Result<u64> {
        if count > MAX_FIELD_BITS {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        let available = self.bits_remaining();
        if count > available {
            return Err(BitIoError::InsufficientBits {
                requested: count,
                available,
            }
            .into());
        }

        let mut value = 0u64;
        let mut remaining = count;

        while remaining > 0 {
            let byte = self.data[self.position / 8];
            let left_in_byte = 8 - self.position % 8;
            let take = remaining.min(left_in_byte);
            let chunk = (byte >> (left_in_byte - take)) as u64 & low_mask(take);

            value = (value << take) | chunk;
            self.position += take;
            remaining -= take;
        }

        Ok(value)
    }

    /// Bits left between the current position and the end of the buffer.
    pub fn bits_remaining(&self) -> usize {
        self.data.len() * 8 - self.position
    }

    /// Current bit position (0 = MSB of the first byte).
    pub fn position(&self) -> usize {
        self.position
    }
}
