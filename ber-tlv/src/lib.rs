//! BER-TLV tree builder and encoder
//!
//! Callers build a tree of tagged values with [`BerBuilder`] and serialize
//! it with [`BerEncoder`] into any [`ber_core::BerBuffer`] at a chosen
//! offset. This is the format EMV card data and other ASN.1-based
//! protocols use on the wire.
//!
//! # Wire Format
//!
//! Each element is `tag || length || value`:
//!
//! ```text
//! [Tag] [Length] [Value]
//! ```
//!
//! - **Tag**: one or more identifier octets, written as given
//! - **Length**: definite form only, short for 0-127, long above
//! - **Value**: raw content, or the concatenated TLVs of nested elements
//!
//! Decoding is not provided.

#![forbid(unsafe_code)]

pub mod tag;
pub mod length;
pub mod builder;
pub mod encoder;
pub mod util;

#[cfg(feature = "serde")]
mod serde_support;

pub use tag::{BerTag, BerTagClass};
pub use length::BerLength;
pub use builder::{BerBuilder, BerElement, BerValue};
pub use encoder::BerEncoder;
pub use util::{ascii_to_bytes, bytes_to_hex, hex_to_bytes};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn test_builder_template_round_trip() {
        let mut builder = BerBuilder::new();
        builder
            .add_constructed(0x6F)
            .add(0x84, "1PAY.SYS.DDF01")
            .add_constructed(0xA5)
            .add(0x88, vec![0x02]);
        builder.add(0x9F36, vec![0x00, 0x60]);

        let json = serde_json::to_string(&builder).unwrap();
        let restored: BerBuilder = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, builder);
        assert_eq!(restored.encode_to_vec().unwrap(), builder.encode_to_vec().unwrap());
    }
}
