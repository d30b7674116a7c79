//! codecs/lz4.rs
//! LZ4 via the lz4_flex frame format (deterministic, no levels).
use std::io::{self, Write};

use lz4_flex::frame::{FrameDecoder, FrameEncoder};

use crate::compression::codecs::{collect, drain_frame, open_frame, seal_frame};
use crate::compression::result::CompressionResult;
use crate::compression::types::{CompressionError, Compressor, StreamSink};

const CODEC: &str = "lz4";

#[derive(Debug, Default, Clone, Copy)]
pub struct Lz4Compressor;

impl Lz4Compressor {
    pub fn new() -> Self {
        Self
    }
}

impl Compressor for Lz4Compressor {
    fn name(&self) -> &'static str {
        CODEC
    }

    fn compress(&mut self, data: &[u8]) -> Result<CompressionResult, CompressionError> {
        seal_frame(CODEC, data, |input, out| {
            let mut enc = FrameEncoder::new(out);
            enc.write_all(input)?;
            enc.finish().map_err(io::Error::other)
        })
    }

    fn decompress(&mut self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        collect(|sink| self.decompress_into(data, sink))
    }

    fn decompress_into(&mut self, data: &[u8], sink: &mut dyn StreamSink) -> Result<(), CompressionError> {
        let frame = open_frame(CODEC, data)?;
        drain_frame(CODEC, FrameDecoder::new(frame.payload), &frame, sink)
    }
}
