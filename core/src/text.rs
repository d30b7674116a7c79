//! text.rs
//! Text adapter: encode text with a caller-chosen encoding before compressing,
//! and decode it again after decompressing.
use encoding_rs::Encoding;

use crate::compression::{CompressionError, CompressionResult, Compressor};

/// Encodings the text adapter can target.
///
/// `Legacy` covers anything `encoding_rs` can *encode* into (Shift_JIS,
/// windows-125x, GBK, ...). UTF-16 and true ISO-8859-1 are handled here since
/// `encoding_rs` only decodes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
    Ascii,
    Latin1,
    Legacy(&'static Encoding),
}

impl TextEncoding {
    /// Resolve a WHATWG label (`"utf-8"`, `"shift_jis"`, ...).
    ///
    /// `ascii` and `latin1`/`iso-8859-1` map to the strict encodings instead of
    /// windows-1252. Labels that resolve to the replacement encoding yield
    /// `None`.
    pub fn for_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "ascii" | "us-ascii" => return Some(Self::Ascii),
            "latin1" | "l1" | "iso-8859-1" | "iso8859-1" | "iso_8859-1" => return Some(Self::Latin1),
            _ => {}
        }

        let encoding = Encoding::for_label(normalized.as_bytes())?;
        if encoding == encoding_rs::UTF_8 {
            Some(Self::Utf8)
        } else if encoding == encoding_rs::UTF_16LE {
            Some(Self::Utf16Le)
        } else if encoding == encoding_rs::UTF_16BE {
            Some(Self::Utf16Be)
        } else if encoding == encoding_rs::REPLACEMENT {
            None
        } else {
            Some(Self::Legacy(encoding))
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Utf16Le => "UTF-16LE",
            Self::Utf16Be => "UTF-16BE",
            Self::Ascii => "US-ASCII",
            Self::Latin1 => "ISO-8859-1",
            Self::Legacy(encoding) => encoding.name(),
        }
    }

    fn conversion_failed(&self) -> CompressionError {
        CompressionError::EncodingConversionFailed { encoding: self.name() }
    }

    /// Fails if any character has no representation in this encoding.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>, CompressionError> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            Self::Utf16Be => Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect()),
            Self::Ascii if text.is_ascii() => Ok(text.as_bytes().to_vec()),
            Self::Ascii => Err(self.conversion_failed()),
            Self::Latin1 => text
                .chars()
                .map(|c| u8::try_from(c).map_err(|_| self.conversion_failed()))
                .collect(),
            Self::Legacy(encoding) => {
                // encoding_rs silently switches to UTF-8 for decode-only encodings.
                if encoding.output_encoding() != *encoding {
                    return Err(self.conversion_failed());
                }
                let (bytes, _, had_unmappable) = encoding.encode(text);
                if had_unmappable {
                    return Err(self.conversion_failed());
                }
                Ok(bytes.into_owned())
            }
        }
    }

    /// Fails on byte sequences that are not valid in this encoding.
    pub fn decode(&self, bytes: &[u8]) -> Result<String, CompressionError> {
        let strict = |encoding: &'static Encoding| {
            encoding
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.into_owned())
                .ok_or_else(|| self.conversion_failed())
        };

        match self {
            Self::Utf8 => std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|_| self.conversion_failed()),
            Self::Utf16Le => strict(encoding_rs::UTF_16LE),
            Self::Utf16Be => strict(encoding_rs::UTF_16BE),
            Self::Ascii if bytes.is_ascii() => Ok(bytes.iter().map(|&b| b as char).collect()),
            Self::Ascii => Err(self.conversion_failed()),
            Self::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
            Self::Legacy(encoding) => strict(*encoding),
        }
    }
}

/// Encode `text` and compress the resulting bytes.
pub fn compress_text<T, C>(
    text: T,
    technique: &mut C,
    encoding: TextEncoding,
) -> Result<CompressionResult, CompressionError>
where
    T: AsRef<str>,
    C: Compressor + ?Sized,
{
    let bytes = encoding.encode(text.as_ref())?;
    technique.compress(&bytes)
}

/// Decompress `data` and decode the bytes as text.
pub fn decompress_text<S, C>(data: S, technique: &mut C, encoding: TextEncoding) -> Result<String, CompressionError>
where
    S: AsRef<[u8]>,
    C: Compressor + ?Sized,
{
    let bytes = technique.decompress(data.as_ref())?;
    encoding.decode(&bytes)
}
