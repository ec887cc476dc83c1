//! BER encoder for TLV trees
//!
//! # Usage Example
//!
//! ```
//! use ber_tlv::{BerBuilder, BerEncoder};
//!
//! let mut builder = BerBuilder::new();
//! builder.add(0x9F26, vec![0xC2, 0xC1, 0x2B, 0x09, 0x8F, 0x3D, 0xA6, 0xE3]);
//!
//! let mut dst = [0u8; 16];
//! let end = BerEncoder::new().encode_to_slice(&builder, &mut dst)?;
//! assert_eq!(end, 11);
//! assert_eq!(&dst[..3], &[0x9F, 0x26, 0x08]);
//! # Ok::<(), ber_core::BerError>(())
//! ```

use bytes::Bytes;

use ber_core::{BerBuffer, BerResult, OwnedBuffer, SliceBuffer};

use crate::builder::BerBuilder;

/// BER encoder for TLV trees
///
/// Every entry point runs the same sequence: compute `builder.length()`,
/// check the destination with `check_limit(offset + length)`, then write.
/// On a capacity error nothing has been written.
///
/// The encoder holds no state, so one instance can be shared freely,
/// including across threads, as long as each call gets its own builder and
/// buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct BerEncoder;

impl BerEncoder {
    /// Create a new BER encoder
    pub fn new() -> Self {
        Self
    }

    /// Encode the tree at the start of `dst`
    ///
    /// Returns the number of bytes written.
    pub fn encode<B: BerBuffer>(&self, builder: &BerBuilder, dst: &mut B) -> BerResult<usize> {
        self.encode_at(builder, dst, 0)
    }

    /// Encode the tree into `dst` starting at `offset`
    ///
    /// Exactly `builder.length()` bytes are written to
    /// `[offset, offset + length)`; bytes outside that window are not touched.
    /// Returns the offset just past the last byte written.
    ///
    /// # Errors
    /// A capacity error if the destination cannot hold the whole tree from
    /// `offset`.
    pub fn encode_at<B: BerBuffer>(
        &self,
        builder: &BerBuilder,
        dst: &mut B,
        offset: usize,
    ) -> BerResult<usize> {
        let length = builder.length();
        log::trace!(
            "Encoding BER tree: {} bytes at offset {} (capacity {})",
            length,
            offset,
            dst.capacity()
        );

        if let Err(e) = dst.check_region(offset, length) {
            log::debug!("Rejected BER encode: {}", e);
            return Err(e);
        }
        builder.write_to(dst, offset)
    }

    /// Encode the tree at the start of a caller-owned byte slice
    pub fn encode_to_slice(&self, builder: &BerBuilder, dst: &mut [u8]) -> BerResult<usize> {
        self.encode(builder, &mut SliceBuffer::wrap(dst))
    }

    /// Encode the tree into a freshly allocated region of exactly
    /// `builder.length()` bytes
    pub fn encode_to_bytes(&self, builder: &BerBuilder) -> BerResult<Bytes> {
        let mut buffer = OwnedBuffer::allocate(builder.length());
        self.encode(builder, &mut buffer)?;
        Ok(buffer.into_bytes())
    }
}
