//! compression/result.rs
//! Immutable holder for compressed output.
use bytes::Bytes;

/// Output of one successful `compress` call.
///
/// Holds the compressed bytes and, for techniques that compute one, the CRC32
/// of the original input. Nothing refers back to the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionResult {
    bytes: Bytes,
    checksum: Option<u32>,
}

impl CompressionResult {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self { bytes: bytes.into(), checksum: None }
    }

    pub fn with_checksum(mut self, checksum: u32) -> Self {
        self.checksum = Some(checksum);
        self
    }

    /// The compressed payload. Cheap: shares the underlying buffer.
    pub fn bytes(&self) -> Bytes {
        self.bytes.clone()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// CRC32 of the uncompressed input, if the technique records one.
    pub fn checksum(&self) -> Option<u32> {
        self.checksum
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes.to_vec()
    }
}

impl AsRef<[u8]> for CompressionResult {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<CompressionResult> for Bytes {
    fn from(result: CompressionResult) -> Self {
        result.bytes
    }
}

impl From<CompressionResult> for Vec<u8> {
    fn from(result: CompressionResult) -> Self {
        result.into_vec()
    }
}
