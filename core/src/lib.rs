//! compress-core
//!
//! Technique-agnostic compression capability with a streaming decompression
//! engine. Concrete algorithms plug in through [`compression::Compressor`].

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod utils;

pub mod adapters;
pub mod compression;
pub mod telemetry;
pub mod text;

// Stream layer
pub mod stream;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::adapters::{
        compress, compress_in_place, compress_iter, decompress, decompress_in_place, decompress_iter, ByteBuffer,
    };
    pub use crate::compression::codecs::{DeflateCompressor, IdentityCompressor, Lz4Compressor, ZstdCompressor};
    pub use crate::compression::{CompressionError, CompressionResult, Compressor, StreamSink};
    pub use crate::stream::{
        decompress_to_stream, decompress_to_stream_with, BufferingPolicy, DecompressStream, StreamConfig, StreamState,
    };
    pub use crate::text::{compress_text, decompress_text, TextEncoding};
}
