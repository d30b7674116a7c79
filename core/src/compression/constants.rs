/// Stable codec IDs (u16) for registries and callers that persist a codec choice.
pub mod codec_ids {
    pub const IDENTITY: u16 = 0x0000;
    pub const ZSTD: u16     = 0x0001;
    pub const LZ4: u16      = 0x0002;
    pub const DEFLATE: u16  = 0x0003;
}

/// Default compression levels (balanced).
pub const DEFAULT_LEVEL_ZSTD: i32 = 6;
pub const DEFAULT_LEVEL_LZ4: i32 = 0; // lz4_flex has no levels
pub const DEFAULT_LEVEL_DEFLATE: i32 = 6;

/// Framed codecs: u32 LE original length in front, u32 LE CRC32 behind.
pub const FRAME_PREFIX_LEN: usize = 4;
pub const FRAME_TRAILER_LEN: usize = 4;
pub const FRAME_OVERHEAD: usize = FRAME_PREFIX_LEN + FRAME_TRAILER_LEN;

/// Codes carried by `CompressionError::TechniqueSpecific`.
pub mod error_codes {
    /// CRC32 of the decoded bytes does not match the frame trailer.
    pub const CHECKSUM_MISMATCH: u16    = 0x0001;
    /// Input does not fit the frame length prefix.
    pub const INPUT_TOO_LARGE: u16      = 0x0002;
    /// The backend encoder reported a failure.
    pub const ENCODER_FAILED: u16       = 0x0003;
    /// The stream producer thread could not be started.
    pub const PRODUCER_UNAVAILABLE: u16 = 0x0100;
    /// The technique panicked inside the stream producer.
    pub const PRODUCER_PANICKED: u16    = 0x0101;
}
