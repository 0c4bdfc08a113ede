//! Character encoding utilities for StarOffice binary streams.
//!
//! StarOffice stores 8-bit strings in the document's "text encoding", an
//! identifier from the office suite's own table rather than a Windows codepage.
//! This module maps those identifiers onto `encoding_rs` encodings and decodes
//! both 8-bit and UTF-16 strings.

use encoding_rs::Encoding;

/// Text encoding identifier meaning "16-bit Unicode".
pub const STAR_ENCODING_UNICODE: u16 = 0xFFFF;

/// Map a StarOffice text encoding identifier to an `encoding_rs` encoding.
///
/// Returns `None` for unknown identifiers and for the Unicode marker, which is
/// not an 8-bit encoding.
///
/// # Examples
/// ```
/// use stoff::common::encoding::star_encoding;
///
/// assert_eq!(star_encoding(1).unwrap().name(), "windows-1252");
/// assert!(star_encoding(0xFFFF).is_none());
/// ```
#[inline]
pub fn star_encoding(id: u16) -> Option<&'static Encoding> {
    match id {
        1 => Some(encoding_rs::WINDOWS_1252),
        2 => Some(encoding_rs::MACINTOSH),
        // DOS codepages (approximation, as encoding_rs only knows IBM866)
        3 | 4 | 30 => Some(encoding_rs::IBM866),
        11 | 12 => Some(encoding_rs::WINDOWS_1252),
        13 => Some(encoding_rs::ISO_8859_2),
        14 => Some(encoding_rs::ISO_8859_3),
        15 => Some(encoding_rs::ISO_8859_4),
        16 => Some(encoding_rs::ISO_8859_5),
        17 => Some(encoding_rs::ISO_8859_6),
        18 => Some(encoding_rs::ISO_8859_7),
        19 => Some(encoding_rs::ISO_8859_8),
        20 => Some(encoding_rs::WINDOWS_1254),
        21 => Some(encoding_rs::ISO_8859_14),
        22 => Some(encoding_rs::ISO_8859_15),
        32 => Some(encoding_rs::WINDOWS_874),
        33 => Some(encoding_rs::WINDOWS_1250),
        34 => Some(encoding_rs::WINDOWS_1251),
        35 => Some(encoding_rs::WINDOWS_1253),
        36 => Some(encoding_rs::WINDOWS_1254),
        37 => Some(encoding_rs::WINDOWS_1255),
        38 => Some(encoding_rs::WINDOWS_1256),
        39 => Some(encoding_rs::WINDOWS_1257),
        40 => Some(encoding_rs::WINDOWS_1258),

        // East Asian
        60 | 64 => Some(encoding_rs::SHIFT_JIS),
        61 | 65 | 67 | 70 => Some(encoding_rs::GBK),
        62 | 79 => Some(encoding_rs::EUC_KR),
        63 | 68 => Some(encoding_rs::BIG5),
        69 => Some(encoding_rs::EUC_JP),
        72 => Some(encoding_rs::ISO_2022_JP),

        74 => Some(encoding_rs::KOI8_R),
        76 => Some(encoding_rs::UTF_8),
        77 => Some(encoding_rs::ISO_8859_10),
        78 => Some(encoding_rs::ISO_8859_13),
        _ => None,
    }
}

/// Strip everything from the first NUL byte on.
///
/// This is a zero-copy operation that returns a slice view.
#[inline]
pub fn strip_null_terminators(bytes: &[u8]) -> &[u8] {
    match memchr::memchr(0, bytes) {
        Some(end) => &bytes[..end],
        None => bytes,
    }
}

/// Decode 8-bit text with the given encoding.
///
/// `encoding_rs` guarantees valid UTF-8 output; malformed sequences become
/// U+FFFD.
#[inline]
pub fn decode_8bit(bytes: &[u8], encoding: &'static Encoding) -> String {
    if bytes.is_empty() {
        return String::new();
    }
    encoding.decode_without_bom_handling(bytes).0.into_owned()
}

/// Decode UTF-16 code units, replacing unpaired surrogates.
///
/// # Examples
/// ```
/// use stoff::common::encoding::decode_utf16_units;
///
/// assert_eq!(decode_utf16_units(&[0x48, 0x69]), "Hi");
/// ```
#[inline]
pub fn decode_utf16_units(units: &[u16]) -> String {
    String::from_utf16_lossy(units)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_encoding_known_ids() {
        assert_eq!(star_encoding(1), Some(encoding_rs::WINDOWS_1252));
        assert_eq!(star_encoding(34), Some(encoding_rs::WINDOWS_1251));
        assert_eq!(star_encoding(76), Some(encoding_rs::UTF_8));
        assert_eq!(star_encoding(0), None);
        assert_eq!(star_encoding(STAR_ENCODING_UNICODE), None);
    }

    #[test]
    fn test_decode_8bit_windows_1252() {
        let text = decode_8bit(b"caf\xe9 \x80", encoding_rs::WINDOWS_1252);
        assert_eq!(text, "café €");
    }

    #[test]
    fn test_strip_null_terminators() {
        assert_eq!(strip_null_terminators(b"Arial\0\0\0"), b"Arial");
        assert_eq!(strip_null_terminators(b"Arial"), b"Arial");
        assert_eq!(strip_null_terminators(b"\0abc"), b"");
    }

    #[test]
    fn test_decode_utf16_lossy_surrogate() {
        assert_eq!(decode_utf16_units(&[0x41, 0xD800]), "A\u{FFFD}");
    }
}
