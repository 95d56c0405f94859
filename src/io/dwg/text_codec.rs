//! Text decoding for DWG string fields.
//!
//! Before R2007 strings are stored as bytes in the drawing's code page.
//! From R2007 on they are UTF-16LE. The codec is bound to both facts once,
//! at session start, and handed to every record's bit buffer.

use encoding_rs::Encoding;

use crate::types::DwgVersion;

/// Decodes stored string bytes for one drawing.
#[derive(Debug, Clone, Copy)]
pub struct TextCodec {
    encoding: &'static Encoding,
    unicode: bool,
}

impl TextCodec {
    /// Codec for `version` using the drawing's stored code page index.
    pub fn new(version: DwgVersion, code_page: u8) -> Self {
        Self::with_encoding(version, encoding_from_code_page(code_page))
    }

    /// Codec for `version` with an explicit code-page encoding.
    pub fn with_encoding(version: DwgVersion, encoding: &'static Encoding) -> Self {
        Self {
            encoding,
            unicode: version >= DwgVersion::AC1021,
        }
    }

    /// Whether string fields are UTF-16LE in this drawing.
    pub fn is_unicode(&self) -> bool {
        self.unicode
    }

    /// Encoding used for code-page strings.
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Decode code-page bytes. Embedded NULs are dropped.
    pub fn decode(&self, bytes: &[u8]) -> String {
        let (decoded, _) = self.encoding.decode_without_bom_handling(bytes);
        strip_nul(decoded.into_owned())
    }

    /// Decode UTF-16LE bytes. Embedded NULs are dropped.
    pub fn decode_utf16(&self, bytes: &[u8]) -> String {
        let (decoded, _) = encoding_rs::UTF_16LE.decode_without_bom_handling(bytes);
        strip_nul(decoded.into_owned())
    }
}

impl Default for TextCodec {
    fn default() -> Self {
        Self::with_encoding(DwgVersion::AC1015, encoding_rs::WINDOWS_1252)
    }
}

fn strip_nul(s: String) -> String {
    if s.contains('\0') {
        s.replace('\0', "")
    } else {
        s
    }
}

/// Map a DWG code page byte to an encoding_rs encoding.
pub fn encoding_from_code_page(key: u8) -> &'static Encoding {
    match key {
        0x00 | 0x01 | 0x1E => encoding_rs::WINDOWS_1252,
        0x02 => encoding_rs::WINDOWS_1250,    // Central European
        0x03 => encoding_rs::WINDOWS_1251,    // Cyrillic
        0x04 => encoding_rs::WINDOWS_1253,    // Greek
        0x05 => encoding_rs::WINDOWS_1254,    // Turkish
        0x06 => encoding_rs::WINDOWS_1255,    // Hebrew
        0x07 => encoding_rs::WINDOWS_1256,    // Arabic
        0x08 => encoding_rs::WINDOWS_1257,    // Baltic
        0x0A => encoding_rs::WINDOWS_874,     // Thai
        0x0B => encoding_rs::SHIFT_JIS,       // Japanese
        0x0C => encoding_rs::GBK,             // Simplified Chinese
        0x0D => encoding_rs::EUC_KR,          // Korean
        0x0E => encoding_rs::BIG5,            // Traditional Chinese
        _ => encoding_rs::WINDOWS_1252,
    }
}
