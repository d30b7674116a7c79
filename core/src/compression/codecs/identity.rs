//! codecs/identity.rs
//! Pass-through technique: output is the input, no framing.

use crate::compression::result::CompressionResult;
use crate::compression::types::{CompressionError, Compressor, StreamSink};

#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityCompressor;

impl IdentityCompressor {
    pub fn new() -> Self {
        Self
    }
}

impl Compressor for IdentityCompressor {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn compress(&mut self, data: &[u8]) -> Result<CompressionResult, CompressionError> {
        Ok(CompressionResult::new(data.to_vec()))
    }

    fn decompress(&mut self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        Ok(data.to_vec())
    }

    fn decompress_into(&mut self, data: &[u8], sink: &mut dyn StreamSink) -> Result<(), CompressionError> {
        let _ = sink.push_slice(data);
        Ok(())
    }
}
