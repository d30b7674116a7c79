use compress_core::compression::codecs::{DeflateCompressor, Lz4Compressor, ZstdCompressor};
use compress_core::compression::Compressor;
use compress_core::stream::{decompress_to_stream, BufferingPolicy};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| b"the quick brown fox "[i % 20] ^ (i >> 12) as u8).collect()
}

fn codec_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec roundtrip");
    let input = payload(256 * 1_024);
    group.throughput(Throughput::Bytes(input.len() as u64));

    let mut codecs: Vec<Box<dyn Compressor>> = vec![
        Box::new(DeflateCompressor::default()),
        Box::new(ZstdCompressor::default()),
        Box::new(Lz4Compressor::new()),
    ];

    for codec in &mut codecs {
        let compressed = codec.compress(&input).expect("compress");

        group.bench_function(format!("{} compress", codec.name()), |b| {
            b.iter(|| codec.compress(&input).expect("compress"));
        });
        group.bench_function(format!("{} decompress", codec.name()), |b| {
            b.iter(|| codec.decompress(compressed.as_slice()).expect("decompress"));
        });
    }
}

fn stream_policies(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress_to_stream");
    let input = payload(64 * 1_024);
    let compressed = Lz4Compressor::new().compress(&input).expect("compress").into_bytes();
    group.throughput(Throughput::Bytes(input.len() as u64));

    for policy in [
        BufferingPolicy::Unbounded,
        BufferingPolicy::Bounded(1_024),
        BufferingPolicy::BufferingOldest(1_024),
        BufferingPolicy::BufferingNewest(1_024),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(format!("{policy:?}")), &policy, |b, &policy| {
            b.iter(|| decompress_to_stream(compressed.clone(), Lz4Compressor::new(), policy).count());
        });
    }
}

criterion_group!(benches, codec_roundtrip, stream_policies);
criterion_main!(benches);
