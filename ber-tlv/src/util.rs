//! Conversions from text to content bytes
//!
//! These feed `BerBuilder::add_hex_string` / `add_ascii_string` and are
//! handy for writing fixtures.

use ber_core::{BerError, BerResult};

/// Decode a string of hex digits (either case) into bytes
///
/// # Errors
/// `BerError::InvalidData` on an odd digit count or a non-hex character.
pub fn hex_to_bytes(digits: &str) -> BerResult<Vec<u8>> {
    hex::decode(digits)
        .map_err(|e| BerError::InvalidData(format!("Invalid hex string {:?}: {}", digits, e)))
}

/// Upper-case hex rendering, the form EMV traces are usually written in
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Bytes of an ASCII string
///
/// # Errors
/// `BerError::InvalidData` if `text` contains a non-ASCII character.
pub fn ascii_to_bytes(text: &str) -> BerResult<Vec<u8>> {
    if let Some(c) = text.chars().find(|c| !c.is_ascii()) {
        return Err(BerError::InvalidData(format!(
            "Non-ASCII character {:?} in {:?}",
            c, text
        )));
    }
    Ok(text.as_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_bytes() {
        assert_eq!(hex_to_bytes("9F2608").unwrap(), vec![0x9F, 0x26, 0x08]);
        assert_eq!(hex_to_bytes("9f36").unwrap(), vec![0x9F, 0x36]);
        assert_eq!(hex_to_bytes("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_hex_to_bytes_rejects_bad_input() {
        assert!(matches!(hex_to_bytes("9F2"), Err(BerError::InvalidData(_))));
        assert!(matches!(hex_to_bytes("GG"), Err(BerError::InvalidData(_))));
    }

    #[test]
    fn test_bytes_to_hex() {
        assert_eq!(bytes_to_hex(&[0x6F, 0x1a, 0x00]), "6F1A00");
    }

    #[test]
    fn test_ascii_to_bytes() {
        assert_eq!(ascii_to_bytes("en").unwrap(), b"en".to_vec());
        assert!(ascii_to_bytes("\u{00e9}").is_err());
    }
}
