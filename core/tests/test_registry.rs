#[cfg(test)]
mod tests {
    use compress_core::compression::{
        codec_ids, create_compressor, resolve, CodecError, CodecOptions, CompressionCodec, DEFAULT_LEVEL_ZSTD,
    };
    use test_log::test;

    #[test]
    fn resolves_every_bundled_codec() {
        let expected = [
            (codec_ids::IDENTITY, "identity", false),
            (codec_ids::ZSTD, "zstd", true),
            (codec_ids::LZ4, "lz4", false),
            (codec_ids::DEFLATE, "deflate", false),
        ];
        for (id, name, supports_dict) in expected {
            let info = resolve(id).expect("known codec");
            assert_eq!(info.name, name);
            assert_eq!(info.supports_dict, supports_dict);
            assert_eq!(info.codec as u16, id);
        }
        assert_eq!(resolve(codec_ids::ZSTD).unwrap().default_level, DEFAULT_LEVEL_ZSTD);
    }

    #[test]
    fn unknown_codec_is_rejected() {
        assert_eq!(resolve(0x00FF).unwrap_err(), CodecError::UnknownCompression { raw: 0x00FF });
        assert!(create_compressor(0x7777, CodecOptions::default()).is_err());
        assert!(CompressionCodec::verify(0x0004).is_err());
        assert!(CompressionCodec::verify(codec_ids::LZ4).is_ok());
    }

    #[test]
    fn unknown_codec_message_is_hex() {
        let err = resolve(0x00ab).unwrap_err();
        assert_eq!(err.to_string(), "unknown compression codec: 0xab");
    }

    #[test]
    fn created_compressors_roundtrip() {
        let input = b"registry built technique, registry built technique".repeat(16);
        for id in [codec_ids::IDENTITY, codec_ids::ZSTD, codec_ids::LZ4, codec_ids::DEFLATE] {
            let mut codec = create_compressor(id, CodecOptions::level(3)).expect("create");
            assert_eq!(codec.name(), resolve(id).unwrap().name);
            let compressed = codec.compress(&input).expect("compress");
            assert_eq!(codec.decompress(compressed.as_slice()).expect("decompress"), input);
        }
    }

    #[test]
    fn dictionary_is_ignored_where_unsupported() {
        let options = CodecOptions { level: None, dict: Some(b"unused dictionary".to_vec()) };
        let mut codec = create_compressor(codec_ids::DEFLATE, options).expect("create");
        let compressed = codec.compress(b"still works").expect("compress");
        assert_eq!(codec.decompress(compressed.as_slice()).expect("decompress"), b"still works");
    }

    #[test]
    fn zstd_dictionary_from_options_roundtrips() {
        let dict = b"shared dictionary content for zstd".repeat(4);
        let options = CodecOptions { level: Some(5), dict: Some(dict) };
        let mut codec = create_compressor(codec_ids::ZSTD, options).expect("create");
        let compressed = codec.compress(b"shared dictionary content").expect("compress");
        assert_eq!(codec.decompress(compressed.as_slice()).expect("decompress"), b"shared dictionary content");
    }
}
