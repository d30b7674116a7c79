//! compression/registry.rs
//! Codec registry and factory functions for the bundled techniques.

use crate::compression::codecs::{DeflateCompressor, IdentityCompressor, Lz4Compressor, ZstdCompressor};
use crate::compression::constants::{DEFAULT_LEVEL_DEFLATE, DEFAULT_LEVEL_LZ4, DEFAULT_LEVEL_ZSTD};
use crate::compression::types::{CodecError, CompressionCodec, Compressor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecInfo {
    pub codec: CompressionCodec,
    pub name: &'static str,
    pub supports_dict: bool,
    pub default_level: i32,
}

/// Per-instance tuning. `None` level means the codec default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodecOptions {
    pub level: Option<i32>,
    pub dict: Option<Vec<u8>>,
}

impl CodecOptions {
    pub fn level(level: i32) -> Self {
        Self { level: Some(level), dict: None }
    }
}

pub fn resolve(codec_id: u16) -> Result<CodecInfo, CodecError> {
    let codec = CompressionCodec::try_from(codec_id)
        .map_err(|_| CodecError::UnknownCompression { raw: codec_id })?;

    Ok(match codec {
        CompressionCodec::Identity =>
            CodecInfo { codec, name: "identity", supports_dict: false, default_level: 0 },
        CompressionCodec::Zstd =>
            CodecInfo { codec, name: "zstd", supports_dict: true, default_level: DEFAULT_LEVEL_ZSTD },
        CompressionCodec::Lz4 =>
            CodecInfo { codec, name: "lz4", supports_dict: false, default_level: DEFAULT_LEVEL_LZ4 },
        CompressionCodec::Deflate =>
            CodecInfo { codec, name: "deflate", supports_dict: false, default_level: DEFAULT_LEVEL_DEFLATE },
    })
}

pub fn create_compressor(codec_id: u16, options: CodecOptions) -> Result<Box<dyn Compressor>, CodecError> {
    let info = resolve(codec_id)?;
    let level = options.level.unwrap_or(info.default_level);

    if options.dict.is_some() && !info.supports_dict {
        log::warn!("{} does not support dictionaries, ignoring the one supplied", info.name);
    }

    let compressor: Box<dyn Compressor> = match info.codec {
        CompressionCodec::Identity => Box::new(IdentityCompressor::new()),
        CompressionCodec::Zstd => match options.dict {
            Some(dict) => Box::new(ZstdCompressor::with_dictionary(level, dict)),
            None => Box::new(ZstdCompressor::new(level)),
        },
        CompressionCodec::Lz4 => Box::new(Lz4Compressor::new()),
        CompressionCodec::Deflate => Box::new(DeflateCompressor::new(level)),
    };
    Ok(compressor)
}
