//! Byte Order Mark (BOM) handling for markup parts.
//!
//! Package parts are normally UTF-8, but producers occasionally prepend a
//! UTF-8 BOM or store a part as BOM-marked UTF-16. Everything is normalized to
//! a Rust `String` before it reaches the XML reader.

use crate::common::{Error, Result};
use encoding_rs::{UTF_16BE, UTF_16LE};

/// Supported BOM encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BomKind {
    Utf8,
    Utf16Le,
    Utf16Be,
}

impl BomKind {
    /// Returns the byte representation of the BOM.
    #[inline]
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            BomKind::Utf8 => &UTF8_BOM,
            BomKind::Utf16Le => &UTF16_LE_BOM,
            BomKind::Utf16Be => &UTF16_BE_BOM,
        }
    }

    /// Returns the length in bytes of the BOM.
    #[inline]
    #[allow(clippy::len_without_is_empty)] // No need to check for empty BOMs
    pub const fn len(&self) -> usize {
        self.as_bytes().len()
    }
}

/// UTF-8 BOM bytes.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
/// UTF-16 little-endian BOM bytes.
pub const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
/// UTF-16 big-endian BOM bytes.
pub const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// Detects a BOM at the start of `data`.
pub fn detect_bom(data: &[u8]) -> Option<BomKind> {
    if data.starts_with(&UTF8_BOM) {
        Some(BomKind::Utf8)
    } else if data.starts_with(&UTF16_LE_BOM) {
        Some(BomKind::Utf16Le)
    } else if data.starts_with(&UTF16_BE_BOM) {
        Some(BomKind::Utf16Be)
    } else {
        None
    }
}

/// Text decoded from a markup part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    /// Set when the bytes were UTF-16 and had to be transcoded to UTF-8.
    pub transcoded: bool,
}

/// Decode markup bytes into text, honoring a leading BOM.
///
/// Without a BOM the bytes must be valid UTF-8.
pub fn decode_text(data: &[u8]) -> Result<DecodedText> {
    match detect_bom(data) {
        Some(BomKind::Utf8) => {
            let text = std::str::from_utf8(&data[UTF8_BOM.len()..])?;
            Ok(DecodedText {
                text: text.to_string(),
                transcoded: false,
            })
        },
        Some(kind @ (BomKind::Utf16Le | BomKind::Utf16Be)) => {
            let encoding = if kind == BomKind::Utf16Le {
                UTF_16LE
            } else {
                UTF_16BE
            };
            let (text, had_errors) =
                encoding.decode_without_bom_handling(&data[kind.len()..]);
            if had_errors {
                return Err(Error::Xml(format!(
                    "Malformed {} content",
                    encoding.name()
                )));
            }
            Ok(DecodedText {
                text: text.into_owned(),
                transcoded: true,
            })
        },
        None => Ok(DecodedText {
            text: String::from_utf8(data.to_vec())?,
            transcoded: false,
        }),
    }
}
