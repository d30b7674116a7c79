//! compression/codecs/mod.rs
//! Bundled techniques.
//!
//! Everything except `Identity` shares one frame layout:
//! `[u32 LE original length][codec payload][u32 LE CRC32 of the original]`.
//! Decoding goes through a `Read` decoder in fixed-size chunks so the
//! incremental path never materializes the whole output.

pub mod deflate;
pub mod identity;
pub mod lz4;
pub mod zstd;

pub use deflate::*;
pub use identity::*;
pub use lz4::*;
pub use zstd::*;

use std::io::{self, Read};

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

use crate::compression::constants::{error_codes, FRAME_OVERHEAD, FRAME_PREFIX_LEN, FRAME_TRAILER_LEN};
use crate::compression::result::CompressionResult;
use crate::compression::types::{CompressionError, StreamSink};
use crate::constants::STREAM_READ_CHUNK;
use crate::utils::compute_checksum;

/// Borrowed view over a framed input.
pub(crate) struct Frame<'a> {
    pub orig_len: usize,
    pub payload: &'a [u8],
    pub expected_crc: u32,
}

pub(crate) fn open_frame<'a>(codec: &'static str, input: &'a [u8]) -> Result<Frame<'a>, CompressionError> {
    if input.len() < FRAME_OVERHEAD {
        return Err(CompressionError::malformed(
            codec,
            format!("input too short for length+checksum: {} < {}", input.len(), FRAME_OVERHEAD),
        ));
    }

    let orig_len = LittleEndian::read_u32(&input[..FRAME_PREFIX_LEN]) as usize;
    let payload = &input[FRAME_PREFIX_LEN..input.len() - FRAME_TRAILER_LEN];
    let expected_crc = LittleEndian::read_u32(&input[input.len() - FRAME_TRAILER_LEN..]);

    Ok(Frame { orig_len, payload, expected_crc })
}

/// Write prefix, let `encode` append the payload, then append the CRC32.
pub(crate) fn seal_frame<F>(
    codec: &'static str,
    input: &[u8],
    encode: F,
) -> Result<CompressionResult, CompressionError>
where
    F: FnOnce(&[u8], Vec<u8>) -> io::Result<Vec<u8>>,
{
    let orig_len = u32::try_from(input.len()).map_err(|_| {
        CompressionError::technique(
            codec,
            error_codes::INPUT_TOO_LARGE,
            format!("{} bytes do not fit a u32 length prefix", input.len()),
        )
    })?;
    let encoder_failed =
        |e: io::Error| CompressionError::technique(codec, error_codes::ENCODER_FAILED, e.to_string());

    let mut out = Vec::with_capacity(FRAME_OVERHEAD + input.len() / 2);
    out.write_u32::<LittleEndian>(orig_len).map_err(encoder_failed)?;

    let mut out = encode(input, out).map_err(encoder_failed)?;

    let checksum = compute_checksum(input);
    out.write_u32::<LittleEndian>(checksum).map_err(encoder_failed)?;

    Ok(CompressionResult::new(out).with_checksum(checksum))
}

/// Pump a decoder into `sink`, never producing more than the frame announces.
///
/// Returns early with `Ok(())` once the sink breaks. Length and checksum are
/// only known after the last chunk, so bytes pushed before a mismatch stay
/// pushed.
pub(crate) fn drain_frame<R: Read>(
    codec: &'static str,
    decoder: R,
    frame: &Frame<'_>,
    sink: &mut dyn StreamSink,
) -> Result<(), CompressionError> {
    let mut limited = decoder.take(frame.orig_len as u64 + 1);
    let mut hasher = crc32fast::Hasher::new();
    let mut buf = vec![0u8; STREAM_READ_CHUNK.min(frame.orig_len.max(1))];
    let mut produced = 0usize;

    loop {
        let n = match limited.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CompressionError::malformed(codec, e.to_string())),
        };

        produced += n;
        if produced > frame.orig_len {
            return Err(CompressionError::malformed(
                codec,
                format!("decoded size exceeds prefix {}", frame.orig_len),
            ));
        }

        hasher.update(&buf[..n]);
        if sink.push_slice(&buf[..n]).is_break() {
            log::trace!("{codec}: sink closed after {produced} bytes");
            return Ok(());
        }
    }

    if produced != frame.orig_len {
        return Err(CompressionError::malformed(
            codec,
            format!("decoded size {} != prefix {}", produced, frame.orig_len),
        ));
    }

    verify_checksum(codec, frame.expected_crc, hasher.finalize())
}

pub(crate) fn verify_checksum(codec: &'static str, expected: u32, actual: u32) -> Result<(), CompressionError> {
    if expected != actual {
        return Err(CompressionError::technique(
            codec,
            error_codes::CHECKSUM_MISMATCH,
            format!("checksum mismatch: expected {:08x}, got {:08x}", expected, actual),
        ));
    }
    Ok(())
}

/// Whole-buffer decompress on top of an incremental one.
pub(crate) fn collect<F>(decode: F) -> Result<Vec<u8>, CompressionError>
where
    F: FnOnce(&mut dyn StreamSink) -> Result<(), CompressionError>,
{
    let mut out = Vec::new();
    decode(&mut out)?;
    Ok(out)
}
