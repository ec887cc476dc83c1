//! TLV tree builder
//!
//! A [`BerBuilder`] is an ordered list of TLV elements. Each element carries
//! either raw content (primitive) or a nested builder (constructed), never
//! both. The builder itself has no tag: its encoding is the concatenation of
//! its elements, which is what lets several top-level TLVs sit side by side.
//!
//! # Two Passes
//!
//! Encoding is length first, bytes second. [`BerBuilder::length`] is a pure
//! function of the current tree and is recomputed on every call, so a nested
//! builder can still be changed after it is attached, as long as the change
//! happens before the outer `length()`/`write_to()` call.
//!
//! Reading a tree while another thread mutates it is the caller's problem;
//! `&`/`&mut` already rule it out for safe code.

use bytes::Bytes;

use ber_core::{BerBuffer, BerResult};

use crate::length::BerLength;
use crate::tag::BerTag;
use crate::util;

/// Content of one TLV element
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BerValue {
    /// Raw content bytes, written verbatim
    Primitive(#[cfg_attr(feature = "serde", serde(with = "crate::serde_support::bytes"))] Bytes),
    /// Nested elements, written in insertion order
    Constructed(BerBuilder),
}

/// One tag plus its value
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BerElement {
    tag: BerTag,
    value: BerValue,
}

impl BerElement {
    pub fn tag(&self) -> &BerTag {
        &self.tag
    }

    pub fn value(&self) -> &BerValue {
        &self.value
    }

    /// Number of value bytes (what the length field carries)
    pub fn value_length(&self) -> usize {
        match &self.value {
            BerValue::Primitive(content) => content.len(),
            BerValue::Constructed(child) => child.length(),
        }
    }

    /// Total encoded size: tag + length field + value
    pub fn length(&self) -> usize {
        let value_length = self.value_length();
        self.tag.len() + BerLength::new(value_length).encoded_len() + value_length
    }

    /// Emit tag, length and value at `offset`; the region must already be
    /// validated by the caller.
    fn write(&self, buffer: &mut impl BerBuffer, offset: usize) -> BerResult<usize> {
        let mut index = offset + buffer.put_bytes(offset, self.tag.as_bytes());
        index = BerLength::new(self.value_length()).write_to(buffer, index)?;

        match &self.value {
            BerValue::Primitive(content) => Ok(index + buffer.put_bytes(index, content)),
            BerValue::Constructed(child) => child.write_elements(buffer, index),
        }
    }
}

/// BER TLV tree builder
///
/// # Usage Example
///
/// ```
/// use ber_tlv::{BerBuilder, BerEncoder};
///
/// let mut a5 = BerBuilder::new();
/// a5.add(0x88, vec![0x02]);
///
/// // A builder has no tag of its own; the tag comes from the element that
/// // holds it.
/// let mut fci = BerBuilder::new();
/// fci.add_builder(0xA5, a5);
///
/// let mut root = BerBuilder::new();
/// root.add_builder(0x6F, fci).add(0x9F36, vec![0x00, 0x60]);
///
/// let bytes = BerEncoder::new().encode_to_bytes(&root)?;
/// assert_eq!(&bytes[..], &[0x6F, 0x05, 0xA5, 0x03, 0x88, 0x01, 0x02, 0x9F, 0x36, 0x02, 0x00, 0x60]);
/// # Ok::<(), ber_core::BerError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BerBuilder {
    elements: Vec<BerElement>,
}

impl BerBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Append a primitive element
    ///
    /// The content is taken over by the tree and written verbatim.
    pub fn add(&mut self, tag: impl Into<BerTag>, content: impl Into<Bytes>) -> &mut Self {
        self.elements.push(BerElement {
            tag: tag.into(),
            value: BerValue::Primitive(content.into()),
        });
        self
    }

    /// Append a constructed element whose value is the encoding of `child`
    pub fn add_builder(&mut self, tag: impl Into<BerTag>, child: BerBuilder) -> &mut Self {
        self.elements.push(BerElement {
            tag: tag.into(),
            value: BerValue::Constructed(child),
        });
        self
    }

    /// Append an empty constructed element and return its builder
    ///
    /// Elements added through the returned builder end up inside the new
    /// element.
    pub fn add_constructed(&mut self, tag: impl Into<BerTag>) -> &mut BerBuilder {
        self.add_builder(tag, BerBuilder::new());
        match self.elements.last_mut().map(|element| &mut element.value) {
            Some(BerValue::Constructed(child)) => child,
            _ => unreachable!("last element was pushed as constructed"),
        }
    }

    /// Append a primitive element given as hex digits
    ///
    /// # Errors
    /// `BerError::InvalidData` if `hex` is not an even number of hex digits;
    /// the builder is left unchanged.
    pub fn add_hex_string(&mut self, tag: impl Into<BerTag>, hex: &str) -> BerResult<&mut Self> {
        let content = util::hex_to_bytes(hex)?;
        Ok(self.add(tag, content))
    }

    /// Append a primitive element holding the bytes of an ASCII string
    ///
    /// # Errors
    /// `BerError::InvalidData` if `text` contains non-ASCII characters.
    pub fn add_ascii_string(&mut self, tag: impl Into<BerTag>, text: &str) -> BerResult<&mut Self> {
        let content = util::ascii_to_bytes(text)?;
        Ok(self.add(tag, content))
    }

    pub fn elements(&self) -> &[BerElement] {
        &self.elements
    }

    /// Number of direct elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Total number of bytes the tree encodes to
    pub fn length(&self) -> usize {
        self.elements.iter().map(BerElement::length).sum()
    }

    /// Serialize the tree into `buffer` at `offset`
    ///
    /// Returns the offset just past the last byte written.
    ///
    /// # Errors
    /// A capacity error if `[offset, offset + length())` does not fit. The
    /// check happens before anything is written.
    pub fn write_to<B: BerBuffer>(&self, buffer: &mut B, offset: usize) -> BerResult<usize> {
        buffer.check_region(offset, self.length())?;
        self.write_elements(buffer, offset)
    }

    /// Encode into a freshly allocated vector of exactly `length()` bytes
    pub fn encode_to_vec(&self) -> BerResult<Vec<u8>> {
        let mut out = vec![0u8; self.length()];
        self.write_to(&mut out, 0)?;
        Ok(out)
    }

    fn write_elements(&self, buffer: &mut impl BerBuffer, offset: usize) -> BerResult<usize> {
        let mut index = offset;
        for element in &self.elements {
            index = element.write(buffer, index)?;
        }
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ber_core::{BerError, OwnedBuffer};

    #[test]
    fn test_primitive_length() {
        let mut builder = BerBuilder::new();
        builder.add(0x9F26, vec![0xC2, 0xC1, 0x2B, 0x09, 0x8F, 0x3D, 0xA6, 0xE3]);
        assert_eq!(builder.length(), 2 + 1 + 8);
        assert_eq!(builder.length(), builder.length());
    }

    #[test]
    fn test_empty_builder() {
        let builder = BerBuilder::new();
        assert!(builder.is_empty());
        assert_eq!(builder.length(), 0);
        assert_eq!(builder.encode_to_vec().unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_empty_constructed_element() {
        let mut builder = BerBuilder::new();
        builder.add_builder(0x70, BerBuilder::new());
        assert_eq!(builder.encode_to_vec().unwrap(), vec![0x70, 0x00]);
    }

    #[test]
    fn test_nested_length_is_sum_of_children() {
        let mut inner = BerBuilder::new();
        inner.add(0x88, vec![0x02]).add(0x5F2D, "en");
        let inner_length = inner.length();
        assert_eq!(inner_length, 3 + 5);

        let mut outer = BerBuilder::new();
        outer.add_builder(0xA5, inner);
        assert_eq!(outer.length(), 1 + 1 + inner_length);

        let element = &outer.elements()[0];
        assert_eq!(element.value_length(), inner_length);
        assert!(matches!(element.value(), BerValue::Constructed(_)));
    }

    #[test]
    fn test_child_length_crosses_long_form() {
        let mut outer = BerBuilder::new();
        let inner = outer.add_constructed(0x70);
        inner.add(0x04, vec![0xAA; 125]);
        // Inner TLV is 1 + 1 + 125 = 127 bytes: outer still short form.
        assert_eq!(outer.length(), 1 + 1 + 127);

        let inner = match &mut outer.elements[0].value {
            BerValue::Constructed(child) => child,
            BerValue::Primitive(_) => panic!("expected constructed"),
        };
        inner.add(0x05, Bytes::new());
        // Inner grows to 129 bytes: outer length field becomes 81 81.
        assert_eq!(outer.length(), 1 + 2 + 129);

        let encoded = outer.encode_to_vec().unwrap();
        assert_eq!(&encoded[..3], &[0x70, 0x81, 0x81]);
        assert_eq!(encoded.len(), outer.length());
    }

    #[test]
    fn test_add_constructed_in_place() {
        let mut root = BerBuilder::new();
        root.add_constructed(0x6F)
            .add(0x84, "1PAY")
            .add_constructed(0xA5)
            .add(0x88, vec![0x02]);
        root.add(0x9F36, vec![0x00, 0x60]);

        assert_eq!(root.len(), 2);
        assert_eq!(
            root.encode_to_vec().unwrap(),
            vec![
                0x6F, 0x0B, 0x84, 0x04, b'1', b'P', b'A', b'Y', 0xA5, 0x03, 0x88, 0x01, 0x02,
                0x9F, 0x36, 0x02, 0x00, 0x60,
            ]
        );
    }

    #[test]
    fn test_attached_builder_adds_no_tag_of_its_own() {
        let mut a5 = BerBuilder::new();
        a5.add(0x88, vec![0x02]);

        let mut direct = BerBuilder::new();
        direct.add_builder(0x6F, a5.clone());
        assert_eq!(direct.encode_to_vec().unwrap(), vec![0x6F, 0x03, 0x88, 0x01, 0x02]);

        let mut fci = BerBuilder::new();
        fci.add_builder(0xA5, a5);
        let mut root = BerBuilder::new();
        root.add_builder(0x6F, fci).add(0x9F36, vec![0x00, 0x60]);
        assert_eq!(
            root.encode_to_vec().unwrap(),
            vec![0x6F, 0x05, 0xA5, 0x03, 0x88, 0x01, 0x02, 0x9F, 0x36, 0x02, 0x00, 0x60]
        );
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut builder = BerBuilder::new();
        builder.add(0x02, vec![0x01]).add(0x01, vec![0x02]);
        assert_eq!(
            builder.encode_to_vec().unwrap(),
            vec![0x02, 0x01, 0x01, 0x01, 0x01, 0x02]
        );
    }

    #[test]
    fn test_write_to_returns_end_offset() {
        let mut builder = BerBuilder::new();
        builder.add(0x88, vec![0x02]);

        let mut buffer = OwnedBuffer::allocate(8);
        let end = builder.write_to(&mut buffer, 5).unwrap();
        assert_eq!(end, 8);
        assert_eq!(buffer.as_bytes(), &[0, 0, 0, 0, 0, 0x88, 0x01, 0x02]);
    }

    #[test]
    fn test_write_to_checks_region_first() {
        let mut builder = BerBuilder::new();
        builder.add(0x84, vec![0x11; 4]);

        let mut buffer = OwnedBuffer::allocate(8);
        let err = builder.write_to(&mut buffer, 3).unwrap_err();
        assert_eq!(err, BerError::LimitExceeded { limit: 9, capacity: 8 });
        assert_eq!(buffer.as_bytes(), &[0; 8]);
    }

    #[test]
    fn test_hex_and_ascii_helpers() {
        let mut builder = BerBuilder::new();
        builder
            .add_hex_string(0x84, "315041592E5359532E4444463031")
            .unwrap()
            .add_ascii_string(0x5F2D, "en")
            .unwrap();

        match builder.elements()[0].value() {
            BerValue::Primitive(content) => assert_eq!(&content[..], b"1PAY.SYS.DDF01"),
            BerValue::Constructed(_) => panic!("expected primitive"),
        }
        assert_eq!(builder.elements()[1].tag().as_bytes(), &[0x5F, 0x2D]);
    }

    #[test]
    fn test_bad_hex_leaves_builder_unchanged() {
        let mut builder = BerBuilder::new();
        assert!(builder.add_hex_string(0x84, "ABC").is_err());
        assert!(builder.add_hex_string(0x84, "ZZ").is_err());
        assert!(builder.add_ascii_string(0x84, "café").is_err());
        assert!(builder.is_empty());
    }
}
