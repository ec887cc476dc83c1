//! BER identifier octets

use bytes::Bytes;

/// BER Tag Class
///
/// ASN.1 defines four tag classes, carried in bits 8-7 of the first
/// identifier octet. EMV tags such as `0x9F26` are context-specific,
/// `0x6F` and `0x5F2D` are application class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BerTagClass {
    /// Universal class (00)
    Universal = 0,
    /// Application class (01)
    Application = 1,
    /// Context-specific class (10)
    ContextSpecific = 2,
    /// Private class (11)
    Private = 3,
}

impl BerTagClass {
    /// Get tag class from bits 8-7 of an identifier octet
    pub fn from_bits(bits: u8) -> Self {
        match (bits >> 6) & 0x03 {
            0 => BerTagClass::Universal,
            1 => BerTagClass::Application,
            2 => BerTagClass::ContextSpecific,
            _ => BerTagClass::Private,
        }
    }

    /// Convert tag class to bits (for encoding)
    pub fn to_bits(self) -> u8 {
        (self as u8) << 6
    }
}

/// Number of bytes in the minimal big-endian form of `value` (at least one).
pub(crate) fn minimal_be_len(value: usize) -> usize {
    let significant = usize::BITS - value.leading_zeros();
    (significant as usize).div_ceil(8).max(1)
}

/// BER Tag
///
/// The identifier octets of one TLV element, written verbatim. A tag may
/// span several octets; nothing here checks that the octets form a
/// well-formed X.690 identifier.
///
/// Integer conversions produce the minimal big-endian form, so `0x88`
/// becomes `88` and `0x9F36` becomes `9F 36`:
///
/// ```
/// use ber_tlv::BerTag;
///
/// assert_eq!(BerTag::from(0x9F36).as_bytes(), &[0x9F, 0x36]);
/// assert_eq!(BerTag::from(0x88).as_bytes(), &[0x88]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BerTag {
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_support::bytes"))]
    bytes: Bytes,
}

impl BerTag {
    /// Create a tag from class, primitive/constructed flag and tag number
    ///
    /// # Encoding Strategy
    /// - Tag number <= 30: single octet `C C P T T T T T`
    /// - Tag number > 30: first octet has all tag bits set, followed by the
    ///   number in base-128, bit 8 set on every octet but the last
    pub fn new(class: BerTagClass, constructed: bool, number: u32) -> Self {
        let class_bits = class.to_bits();
        let constructed_bit = if constructed { 0x20 } else { 0x00 };

        if number <= 30 {
            return Self {
                bytes: Bytes::copy_from_slice(&[class_bits | constructed_bit | number as u8]),
            };
        }

        let mut result = vec![class_bits | constructed_bit | 0x1F];
        let groups = (u32::BITS - number.leading_zeros()).div_ceil(7);
        for i in (0..groups).rev() {
            let group = ((number >> (i * 7)) & 0x7F) as u8;
            result.push(if i > 0 { group | 0x80 } else { group });
        }

        Self {
            bytes: Bytes::from(result),
        }
    }

    /// Create a Universal class tag
    pub fn universal(constructed: bool, number: u32) -> Self {
        Self::new(BerTagClass::Universal, constructed, number)
    }

    /// Create an Application class tag
    pub fn application(constructed: bool, number: u32) -> Self {
        Self::new(BerTagClass::Application, constructed, number)
    }

    /// Create a Context-specific class tag
    pub fn context_specific(constructed: bool, number: u32) -> Self {
        Self::new(BerTagClass::ContextSpecific, constructed, number)
    }

    /// Create a Private class tag
    pub fn private(constructed: bool, number: u32) -> Self {
        Self::new(BerTagClass::Private, constructed, number)
    }

    /// Tag class, read from the first octet
    ///
    /// Returns `None` for an empty tag.
    pub fn class(&self) -> Option<BerTagClass> {
        self.bytes.first().map(|&b| BerTagClass::from_bits(b))
    }

    /// Whether the constructed bit (bit 6 of the first octet) is set
    pub fn is_constructed(&self) -> bool {
        self.bytes.first().is_some_and(|&b| b & 0x20 != 0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of identifier octets
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn from_uint(value: u32) -> Self {
        let width = minimal_be_len(value as usize).min(4);
        let be = value.to_be_bytes();
        Self {
            bytes: Bytes::copy_from_slice(&be[be.len() - width..]),
        }
    }
}

impl From<u8> for BerTag {
    fn from(value: u8) -> Self {
        Self::from_uint(value as u32)
    }
}

impl From<u16> for BerTag {
    fn from(value: u16) -> Self {
        Self::from_uint(value as u32)
    }
}

impl From<u32> for BerTag {
    fn from(value: u32) -> Self {
        Self::from_uint(value)
    }
}

/// Reinterprets the value as its unsigned bit pattern, so untyped integer
/// literals such as `0x9F26` convert without a suffix.
impl From<i32> for BerTag {
    fn from(value: i32) -> Self {
        Self::from_uint(value as u32)
    }
}

impl From<&[u8]> for BerTag {
    fn from(bytes: &[u8]) -> Self {
        Self {
            bytes: Bytes::copy_from_slice(bytes),
        }
    }
}

impl<const N: usize> From<[u8; N]> for BerTag {
    fn from(bytes: [u8; N]) -> Self {
        Self {
            bytes: Bytes::copy_from_slice(&bytes),
        }
    }
}

impl<const N: usize> From<&[u8; N]> for BerTag {
    fn from(bytes: &[u8; N]) -> Self {
        Self {
            bytes: Bytes::copy_from_slice(bytes),
        }
    }
}

impl From<Vec<u8>> for BerTag {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Bytes::from(bytes),
        }
    }
}

impl From<Bytes> for BerTag {
    fn from(bytes: Bytes) -> Self {
        Self { bytes }
    }
}
