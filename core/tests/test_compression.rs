#[cfg(test)]
mod tests {
    use std::ops::ControlFlow;

    use compress_core::compression::codecs::{DeflateCompressor, IdentityCompressor, Lz4Compressor, ZstdCompressor};
    use compress_core::compression::{error_codes, CompressionError, CompressionResult, Compressor, StreamSink};
    use compress_core::utils::compute_checksum;
    use test_log::test;

    const PHRASE: &[u8] = b"lorem ipsum dolor sit amet, consectetur adipiscing elit; ";

    /// Compressible input with a counter byte every 64 bytes.
    fn sample(len: usize) -> Vec<u8> {
        (0..len)
            .map(|i| if i % 64 == 0 { (i / 64) as u8 } else { PHRASE[i % PHRASE.len()] })
            .collect()
    }

    fn framed_codecs() -> Vec<Box<dyn Compressor>> {
        vec![
            Box::new(DeflateCompressor::default()),
            Box::new(ZstdCompressor::default()),
            Box::new(Lz4Compressor::new()),
        ]
    }

    /// Sink that stops accepting after `limit` bytes.
    struct LimitedSink {
        received: Vec<u8>,
        limit: usize,
    }

    impl StreamSink for LimitedSink {
        fn push(&mut self, byte: u8) -> ControlFlow<()> {
            if self.received.len() == self.limit {
                return ControlFlow::Break(());
            }
            self.received.push(byte);
            ControlFlow::Continue(())
        }
    }

    /// Technique relying on the trait's default `decompress_into`.
    struct XorTechnique(u8);

    impl Compressor for XorTechnique {
        fn name(&self) -> &'static str {
            "xor"
        }

        fn compress(&mut self, data: &[u8]) -> Result<CompressionResult, CompressionError> {
            Ok(CompressionResult::new(data.iter().map(|b| b ^ self.0).collect::<Vec<u8>>()))
        }

        fn decompress(&mut self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
            Ok(data.iter().map(|b| b ^ self.0).collect())
        }
    }

    #[test]
    fn identity_scenario_abc() {
        let mut identity = IdentityCompressor::new();
        let result = identity.compress(&[0x61, 0x62, 0x63]).expect("compress");
        assert_eq!(result, CompressionResult::new(vec![0x61, 0x62, 0x63]));

        let restored = identity.decompress(result.as_slice()).expect("decompress");
        assert_eq!(restored, vec![0x61, 0x62, 0x63]);
    }

    #[test]
    fn framed_codecs_roundtrip() {
        let input = sample(200_000);
        for mut codec in framed_codecs() {
            let compressed = codec.compress(&input).expect("compress");
            assert!(compressed.len() < input.len(), "{} should shrink repetitive input", codec.name());
            let restored = codec.decompress(compressed.as_slice()).expect("decompress");
            assert_eq!(restored, input, "{} roundtrip", codec.name());
        }
    }

    #[test]
    fn empty_input_roundtrips() {
        let mut codecs = framed_codecs();
        codecs.push(Box::new(IdentityCompressor::new()));
        for mut codec in codecs {
            let compressed = codec.compress(&[]).expect("empty compress");
            let restored = codec.decompress(compressed.as_slice()).expect("empty decompress");
            assert!(restored.is_empty(), "{} empty roundtrip", codec.name());
        }
    }

    #[test]
    fn result_bytes_are_stable_across_calls() {
        let mut codec = DeflateCompressor::new(9);
        let result = codec.compress(b"stable output please").expect("compress");
        let first = result.bytes();
        let second = result.bytes();
        assert_eq!(first, second);
        assert_eq!(first.as_ref(), result.as_slice());
    }

    #[test]
    fn result_carries_input_checksum() {
        let input = b"checksum me";
        let result = ZstdCompressor::default().compress(input).expect("compress");
        assert_eq!(result.checksum(), Some(compute_checksum(input)));

        let identity = IdentityCompressor::new().compress(input).expect("compress");
        assert_eq!(identity.checksum(), None);
    }

    #[test]
    fn short_input_is_malformed() {
        for mut codec in framed_codecs() {
            let err = codec.decompress(&[0x00, 0x01, 0x02]).unwrap_err();
            assert!(matches!(err, CompressionError::MalformedInput { .. }), "{}: {err:?}", codec.name());
        }
    }

    #[test]
    fn garbage_input_fails_cleanly() {
        let garbage: Vec<u8> = (0..64u8).map(|b| b.wrapping_mul(37)).collect();
        for mut codec in framed_codecs() {
            assert!(codec.decompress(&garbage).is_err(), "{} accepted garbage", codec.name());
        }
    }

    #[test]
    fn truncated_input_fails_cleanly() {
        let input = sample(10_000);
        for mut codec in framed_codecs() {
            let compressed = codec.compress(&input).expect("compress").into_vec();
            for cut in [1, 5, compressed.len() / 2, compressed.len() - 1] {
                let result = codec.decompress(&compressed[..compressed.len() - cut]);
                assert!(result.is_err(), "{} accepted input truncated by {cut}", codec.name());
            }
        }
    }

    #[test]
    fn huge_length_prefix_does_not_allocate_or_succeed() {
        let mut compressed = DeflateCompressor::default().compress(b"tiny").expect("compress").into_vec();
        compressed[..4].copy_from_slice(&u32::MAX.to_le_bytes());
        let err = DeflateCompressor::default().decompress(&compressed).unwrap_err();
        assert!(matches!(err, CompressionError::MalformedInput { .. }), "{err:?}");
    }

    #[test]
    fn corrupted_trailer_is_checksum_mismatch() {
        let input = sample(4096);
        for mut codec in framed_codecs() {
            let mut compressed = codec.compress(&input).expect("compress").into_vec();
            let last = compressed.len() - 1;
            compressed[last] ^= 0xFF;

            let err = codec.decompress(&compressed).unwrap_err();
            assert_eq!(err.code(), Some(error_codes::CHECKSUM_MISMATCH), "{}: {err}", codec.name());
        }
    }

    #[test]
    fn zstd_dictionary_mismatch_fails() {
        let dict = b"the quick brown fox jumps over the lazy dog".repeat(8);
        let input = b"the lazy dog sleeps while the quick brown fox jumps".repeat(20);

        let mut with_dict = ZstdCompressor::with_dictionary(3, dict.clone());
        let compressed = with_dict.compress(&input).expect("compress");
        assert_eq!(with_dict.decompress(compressed.as_slice()).expect("same dict"), input);

        let mut other = ZstdCompressor::with_dictionary(3, b"completely different dictionary".repeat(4));
        assert!(other.decompress(compressed.as_slice()).is_err());
    }

    #[test]
    fn out_of_range_levels_fall_back_to_defaults() {
        assert_eq!(DeflateCompressor::new(42).level(), DeflateCompressor::default().level());
        assert_eq!(ZstdCompressor::new(i32::MAX).level(), ZstdCompressor::default().level());
    }

    #[test]
    fn decompress_into_stops_when_sink_breaks() {
        let input = sample(50_000);
        for mut codec in framed_codecs() {
            let compressed = codec.compress(&input).expect("compress");
            let mut sink = LimitedSink { received: Vec::new(), limit: 1000 };
            codec.decompress_into(compressed.as_slice(), &mut sink).expect("early stop is not an error");
            assert_eq!(sink.received, input[..1000], "{}", codec.name());
        }
    }

    #[test]
    fn default_decompress_into_replays_whole_output() {
        let mut xor = XorTechnique(0x5A);
        let compressed = xor.compress(b"replayed").expect("compress");
        let mut out = Vec::new();
        xor.decompress_into(compressed.as_slice(), &mut out).expect("decompress_into");
        assert_eq!(out, b"replayed");
    }

    #[test]
    fn boxed_technique_delegates() {
        let mut boxed: Box<dyn Compressor> = Box::new(Lz4Compressor::new());
        assert_eq!(boxed.name(), "lz4");
        let compressed = boxed.compress(b"boxed").expect("compress");
        assert_eq!(boxed.decompress(compressed.as_slice()).expect("decompress"), b"boxed");
    }

    #[test]
    fn error_messages_name_the_codec() {
        let err = DeflateCompressor::default().decompress(&[1, 2]).unwrap_err();
        assert!(err.to_string().contains("deflate"), "{err}");
    }
}

#[cfg(test)]
mod properties {
    use compress_core::compression::codecs::{DeflateCompressor, IdentityCompressor, Lz4Compressor, ZstdCompressor};
    use compress_core::compression::Compressor;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn roundtrip_any_bytes(input in proptest::collection::vec(any::<u8>(), 0..4096)) {
            let codecs: Vec<Box<dyn Compressor>> = vec![
                Box::new(IdentityCompressor::new()),
                Box::new(DeflateCompressor::default()),
                Box::new(ZstdCompressor::default()),
                Box::new(Lz4Compressor::new()),
            ];
            for mut codec in codecs {
                let compressed = codec.compress(&input).unwrap();
                prop_assert_eq!(codec.decompress(compressed.as_slice()).unwrap(), input.clone());
            }
        }

        #[test]
        fn random_bytes_never_panic(input in proptest::collection::vec(any::<u8>(), 0..512)) {
            let mut deflate = DeflateCompressor::default();
            let mut zstd = ZstdCompressor::default();
            let mut lz4 = Lz4Compressor::new();
            let _ = deflate.decompress(&input);
            let _ = zstd.decompress(&input);
            let _ = lz4.decompress(&input);
        }
    }
}
