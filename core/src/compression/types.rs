//! compression/types.rs
//! Capability contract shared by every technique: errors, codec ids, the
//! `Compressor` trait and the `StreamSink` it pushes incremental output into.
use std::ops::ControlFlow;

use num_enum::TryFromPrimitive;

use crate::compression::constants::codec_ids;
use crate::compression::result::CompressionResult;
use crate::utils::enum_name_or_hex;

/// Codec identifiers understood by the bundled registry.
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum CompressionCodec {
    Identity = codec_ids::IDENTITY,
    Zstd     = codec_ids::ZSTD,
    Lz4      = codec_ids::LZ4,
    Deflate  = codec_ids::DEFLATE,
}

impl CompressionCodec {
    pub fn verify(raw: u16) -> Result<(), CodecError> {
        Self::try_from_primitive(raw)
            .map(|_| ())
            .map_err(|_| CodecError::UnknownCompression { raw })
    }
}

/// Registry lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("unknown compression codec: {}", enum_name_or_hex::<CompressionCodec>(*raw))]
    UnknownCompression { raw: u16 },
}

/// Failures of compress/decompress and the adapters built on them.
///
/// The set is closed. Algorithm-defined failures the core does not interpret
/// go through `TechniqueSpecific` with a code from
/// [`error_codes`](crate::compression::constants::error_codes).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompressionError {
    /// Compressed bytes cannot be parsed by the chosen technique.
    #[error("malformed {codec} input: {reason}")]
    MalformedInput { codec: &'static str, reason: String },

    /// Text could not be represented in (or decoded from) the requested encoding.
    #[error("text cannot be converted using {encoding}")]
    EncodingConversionFailed { encoding: &'static str },

    /// Algorithm-defined failure, e.g. a checksum mismatch.
    #[error("{codec} failed with code 0x{code:04x}: {msg}")]
    TechniqueSpecific { codec: &'static str, code: u16, msg: String },
}

impl CompressionError {
    pub fn malformed(codec: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedInput { codec, reason: reason.into() }
    }

    pub fn technique(codec: &'static str, code: u16, msg: impl Into<String>) -> Self {
        Self::TechniqueSpecific { codec, code, msg: msg.into() }
    }

    /// Technique code, if this is a `TechniqueSpecific` failure.
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::TechniqueSpecific { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Write-only destination for incrementally decompressed bytes.
///
/// A sink is handed out by `&mut` borrow for the duration of one
/// [`Compressor::decompress_into`] call and cannot be retained past it.
/// `ControlFlow::Break` means nobody is listening anymore: the technique must
/// stop producing and return.
pub trait StreamSink {
    fn push(&mut self, byte: u8) -> ControlFlow<()>;

    /// Push a chunk. Stops at the first byte the sink refuses.
    fn push_slice(&mut self, bytes: &[u8]) -> ControlFlow<()> {
        for &byte in bytes {
            self.push(byte)?;
        }
        ControlFlow::Continue(())
    }
}

impl StreamSink for Vec<u8> {
    fn push(&mut self, byte: u8) -> ControlFlow<()> {
        Vec::push(self, byte);
        ControlFlow::Continue(())
    }

    fn push_slice(&mut self, bytes: &[u8]) -> ControlFlow<()> {
        self.extend_from_slice(bytes);
        ControlFlow::Continue(())
    }
}

/// The capability every compression technique implements.
///
/// `Send` so a technique can be moved onto the stream producer thread.
/// Chunked output is expressed through the sink: each `push_slice` call in
/// [`decompress_into`](Self::decompress_into) is one chunk.
/// Techniques are driven by one call at a time (`&mut self`); sharing one
/// instance across threads is only safe if the technique says so.
pub trait Compressor: Send {
    /// Short technique name used in errors and logs.
    fn name(&self) -> &'static str;

    /// Compress `data`. Empty input is valid.
    fn compress(&mut self, data: &[u8]) -> Result<CompressionResult, CompressionError>;

    /// Decompress bytes previously produced by a compatible `compress`.
    ///
    /// Must fail cleanly on truncated or corrupted input.
    fn decompress(&mut self, data: &[u8]) -> Result<Vec<u8>, CompressionError>;

    /// Incremental variant of [`decompress`](Self::decompress).
    ///
    /// Bytes go to `sink` as they become available. The default decompresses
    /// fully and replays the result, which is enough for techniques without a
    /// natural block structure.
    fn decompress_into(
        &mut self,
        data: &[u8],
        sink: &mut dyn StreamSink,
    ) -> Result<(), CompressionError> {
        let out = self.decompress(data)?;
        let _ = sink.push_slice(&out);
        Ok(())
    }
}

impl<C: Compressor + ?Sized> Compressor for Box<C> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn compress(&mut self, data: &[u8]) -> Result<CompressionResult, CompressionError> {
        (**self).compress(data)
    }

    fn decompress(&mut self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        (**self).decompress(data)
    }

    fn decompress_into(
        &mut self,
        data: &[u8],
        sink: &mut dyn StreamSink,
    ) -> Result<(), CompressionError> {
        (**self).decompress_into(data, sink)
    }
}
