//! codecs/zstd.rs
//!
//! Zstd compressor/decompressor with optional dictionary.
//!
//! - Encoding writes a single zstd frame straight behind the length prefix.
//! - Decoding reads through the streaming decoder, so the incremental path
//!   emits output per zstd block instead of after the whole frame.
use std::io::Write;

use crate::compression::codecs::{collect, drain_frame, open_frame, seal_frame};
use crate::compression::constants::DEFAULT_LEVEL_ZSTD;
use crate::compression::result::CompressionResult;
use crate::compression::types::{CompressionError, Compressor, StreamSink};

const CODEC: &str = "zstd";

#[derive(Debug, Clone)]
pub struct ZstdCompressor {
    level: i32,
    dict: Option<Vec<u8>>,
}

impl ZstdCompressor {
    /// Levels outside the range the linked zstd supports fall back to the default.
    pub fn new(level: i32) -> Self {
        let level = if zstd::compression_level_range().contains(&level) {
            level
        } else {
            DEFAULT_LEVEL_ZSTD
        };
        Self { level, dict: None }
    }

    /// Both sides must use the same dictionary; a mismatch fails to decode.
    pub fn with_dictionary(level: i32, dict: impl Into<Vec<u8>>) -> Self {
        Self { dict: Some(dict.into()), ..Self::new(level) }
    }

    pub fn level(&self) -> i32 {
        self.level
    }
}

impl Default for ZstdCompressor {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL_ZSTD)
    }
}

impl Compressor for ZstdCompressor {
    fn name(&self) -> &'static str {
        CODEC
    }

    fn compress(&mut self, data: &[u8]) -> Result<CompressionResult, CompressionError> {
        let level = self.level;
        let dict = self.dict.as_deref();
        seal_frame(CODEC, data, |input, out| {
            let mut enc = match dict {
                Some(d) => zstd::stream::Encoder::with_dictionary(out, level, d)?,
                None => zstd::stream::Encoder::new(out, level)?,
            };
            enc.write_all(input)?;
            enc.finish()
        })
    }

    fn decompress(&mut self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        collect(|sink| self.decompress_into(data, sink))
    }

    fn decompress_into(&mut self, data: &[u8], sink: &mut dyn StreamSink) -> Result<(), CompressionError> {
        let frame = open_frame(CODEC, data)?;
        let init_failed = |e: std::io::Error| CompressionError::malformed(CODEC, e.to_string());

        match self.dict.as_deref() {
            Some(d) => {
                let decoder = zstd::stream::read::Decoder::with_dictionary(frame.payload, d)
                    .map_err(init_failed)?;
                drain_frame(CODEC, decoder, &frame, sink)
            }
            None => {
                let decoder = zstd::stream::read::Decoder::new(frame.payload).map_err(init_failed)?;
                drain_frame(CODEC, decoder, &frame, sink)
            }
        }
    }
}
