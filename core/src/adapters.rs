//! adapters.rs
//! Byte sequence adapters: normalize whatever holds the bytes and route it to
//! a `Compressor`.
//!
//! Pure functions take any read-only view. The in-place pair works on an owned
//! [`ByteBuffer`] and is all-or-nothing: the buffer is only replaced once the
//! technique has succeeded.
use bytes::BytesMut;

use crate::compression::{CompressionError, CompressionResult, Compressor};

/// Owned, growable byte storage the in-place adapters can rewrite.
pub trait ByteBuffer {
    fn as_bytes(&self) -> &[u8];

    /// Replace the whole content.
    fn replace_with(&mut self, bytes: Vec<u8>);
}

impl ByteBuffer for Vec<u8> {
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn replace_with(&mut self, bytes: Vec<u8>) {
        *self = bytes;
    }
}

impl ByteBuffer for BytesMut {
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn replace_with(&mut self, bytes: Vec<u8>) {
        *self = BytesMut::from(&bytes[..]);
    }
}

pub fn compress<S, C>(source: S, technique: &mut C) -> Result<CompressionResult, CompressionError>
where
    S: AsRef<[u8]>,
    C: Compressor + ?Sized,
{
    technique.compress(source.as_ref())
}

pub fn decompress<S, C>(source: S, technique: &mut C) -> Result<Vec<u8>, CompressionError>
where
    S: AsRef<[u8]>,
    C: Compressor + ?Sized,
{
    technique.decompress(source.as_ref())
}

/// Compress any iterable byte sequence.
pub fn compress_iter<I, C>(source: I, technique: &mut C) -> Result<CompressionResult, CompressionError>
where
    I: IntoIterator<Item = u8>,
    C: Compressor + ?Sized,
{
    let bytes: Vec<u8> = source.into_iter().collect();
    technique.compress(&bytes)
}

pub fn decompress_iter<I, C>(source: I, technique: &mut C) -> Result<Vec<u8>, CompressionError>
where
    I: IntoIterator<Item = u8>,
    C: Compressor + ?Sized,
{
    let bytes: Vec<u8> = source.into_iter().collect();
    technique.decompress(&bytes)
}

/// Replace `buffer` with its compressed form and hand the same storage back.
pub fn compress_in_place<'b, B, C>(buffer: &'b mut B, technique: &mut C) -> Result<&'b mut B, CompressionError>
where
    B: ByteBuffer + ?Sized,
    C: Compressor + ?Sized,
{
    let result = technique.compress(buffer.as_bytes())?;
    buffer.replace_with(result.into_vec());
    Ok(buffer)
}

/// Replace `buffer` with its decompressed form. Untouched on failure.
pub fn decompress_in_place<'b, B, C>(buffer: &'b mut B, technique: &mut C) -> Result<&'b mut B, CompressionError>
where
    B: ByteBuffer + ?Sized,
    C: Compressor + ?Sized,
{
    let out = technique.decompress(buffer.as_bytes())?;
    buffer.replace_with(out);
    Ok(buffer)
}
