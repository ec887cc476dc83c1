//! BER definite-length field
//!
//! Both sizing (`BerBuilder::length`) and emission (`BerBuilder::write_to`)
//! go through [`BerLength::encoded_len`], so the size reserved for a length
//! field always matches the bytes written for it.

use ber_core::{BerBuffer, BerResult};

use crate::tag::minimal_be_len;

/// Largest value that fits the short form.
const SHORT_FORM_MAX: usize = 0x7F;

/// BER Length encoding
///
/// BER length can be encoded in two forms:
/// - **Short form**: For lengths 0-127 (1 byte)
/// - **Long form**: For lengths > 127 (1 + k bytes)
///
/// # Encoding Format
///
/// Short form:
/// ```text
/// Byte: 0 L L L L L L L
/// ```
/// Where L = length value (0-127)
///
/// Long form:
/// ```text
/// First byte:  1 K K K K K K K  (K = number of length bytes)
/// Following bytes: L L L L L L L L  (big-endian length value, no leading zero bytes)
/// ```
///
/// For example a length of 435 (`0x01B3`) encodes as `82 01 B3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BerLength {
    /// Short form: length 0-127
    Short(u8),
    /// Long form: length > 127, encoded with length-of-length
    Long(usize),
}

impl BerLength {
    /// Create a new BER length
    ///
    /// Automatically chooses short or long form based on the length value.
    pub fn new(length: usize) -> Self {
        if length <= SHORT_FORM_MAX {
            BerLength::Short(length as u8)
        } else {
            BerLength::Long(length)
        }
    }

    /// Get the length value
    pub fn value(&self) -> usize {
        match self {
            BerLength::Short(l) => *l as usize,
            BerLength::Long(l) => *l,
        }
    }

    /// Number of bytes the length field occupies
    pub fn encoded_len(&self) -> usize {
        match self {
            BerLength::Short(_) => 1,
            BerLength::Long(length) => 1 + minimal_be_len(*length),
        }
    }

    /// Write the length field at `offset` and return the offset after it
    ///
    /// # Errors
    /// A capacity error if the field does not fit; nothing is written then.
    pub fn write_to<B: BerBuffer>(&self, buffer: &mut B, offset: usize) -> BerResult<usize> {
        let end = buffer.check_region(offset, self.encoded_len())?;
        match *self {
            BerLength::Short(length) => buffer.put_byte(offset, length)?,
            BerLength::Long(length) => {
                let count = end - offset - 1;
                buffer.put_byte(offset, 0x80 | count as u8)?;
                let be = length.to_be_bytes();
                buffer.put_bytes(offset + 1, &be[be.len() - count..]);
            }
        }
        Ok(end)
    }

    /// Encode length to bytes
    pub fn encode(&self) -> Vec<u8> {
        match *self {
            BerLength::Short(length) => vec![length],
            BerLength::Long(length) => {
                let count = self.encoded_len() - 1;
                let be = length.to_be_bytes();
                let mut out = Vec::with_capacity(1 + count);
                out.push(0x80 | count as u8);
                out.extend_from_slice(&be[be.len() - count..]);
                out
            }
        }
    }
}

impl From<usize> for BerLength {
    fn from(length: usize) -> Self {
        Self::new(length)
    }
}
