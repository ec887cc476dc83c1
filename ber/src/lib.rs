//! BER-TLV encoding for ASN.1-based protocols
//!
//! # Architecture
//!
//! This library is organized as a workspace with multiple crates:
//!
//! - `ber-core`: error handling and bounds-checked byte buffers
//! - `ber-tlv`: tags, length fields, the TLV tree builder and the encoder
//!
//! # Usage
//!
//! ```
//! use ber::{BerBuilder, BerEncoder};
//!
//! let mut builder = BerBuilder::new();
//! builder.add(0x9F36, vec![0x00, 0x60]);
//!
//! let bytes = BerEncoder::new().encode_to_bytes(&builder)?;
//! assert_eq!(&bytes[..], &[0x9F, 0x36, 0x02, 0x00, 0x60]);
//! # Ok::<(), ber::BerError>(())
//! ```

// Re-export core types
pub use ber_core::{BerBuffer, BerError, BerResult, ByteView, OwnedBuffer, SliceBuffer};

// Re-export encoding API
pub use ber_tlv::{
    ascii_to_bytes, bytes_to_hex, hex_to_bytes, BerBuilder, BerElement, BerEncoder, BerLength,
    BerTag, BerTagClass, BerValue,
};
