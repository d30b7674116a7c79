//! codecs/deflate.rs
//! Deflate (zlib wrapper) via flate2 with streaming decode.

use std::io::Write;

use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};

use crate::compression::codecs::{collect, drain_frame, open_frame, seal_frame};
use crate::compression::constants::DEFAULT_LEVEL_DEFLATE;
use crate::compression::result::CompressionResult;
use crate::compression::types::{CompressionError, Compressor, StreamSink};

const CODEC: &str = "deflate";

#[derive(Debug, Clone, Copy)]
pub struct DeflateCompressor {
    level: Compression,
}

impl DeflateCompressor {
    /// Levels outside `0..=9` fall back to the default.
    pub fn new(level: i32) -> Self {
        let level = match level {
            0..=9 => Compression::new(level as u32),
            _ => Compression::default(),
        };
        Self { level }
    }

    pub fn level(&self) -> u32 {
        self.level.level()
    }
}

impl Default for DeflateCompressor {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL_DEFLATE)
    }
}

impl Compressor for DeflateCompressor {
    fn name(&self) -> &'static str {
        CODEC
    }

    fn compress(&mut self, data: &[u8]) -> Result<CompressionResult, CompressionError> {
        let level = self.level;
        seal_frame(CODEC, data, |input, out| {
            let mut enc = ZlibEncoder::new(out, level);
            enc.write_all(input)?;
            enc.finish()
        })
    }

    fn decompress(&mut self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        collect(|sink| self.decompress_into(data, sink))
    }

    fn decompress_into(&mut self, data: &[u8], sink: &mut dyn StreamSink) -> Result<(), CompressionError> {
        let frame = open_frame(CODEC, data)?;
        drain_frame(CODEC, ZlibDecoder::new(frame.payload), &frame, sink)
    }
}
