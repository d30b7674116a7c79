#[cfg(test)]
mod tests {
    use std::time::Duration;

    use compress_core::compression::codecs::IdentityCompressor;
    use compress_core::compression::Compressor;
    use compress_core::stream::{decompress_to_stream, BufferingPolicy, StreamState};
    use compress_core::telemetry::{StreamCounters, StreamSnapshot};
    use test_log::test;

    #[test]
    fn snapshot_reads_counters() {
        let counters = StreamCounters::default();
        counters.add_produced(10);
        counters.add_delivered(6);
        counters.add_dropped(2);

        let snapshot = StreamSnapshot::from(&counters, StreamState::Producing, Duration::from_millis(5));
        assert_eq!(snapshot.bytes_produced, 10);
        assert_eq!(snapshot.bytes_delivered, 6);
        assert_eq!(snapshot.bytes_dropped, 2);
        assert_eq!(snapshot.bytes_in_flight(), 2);
        assert!((snapshot.drop_ratio - 0.2).abs() < f64::EPSILON);
        assert_eq!(snapshot.elapsed, Duration::from_millis(5));
    }

    #[test]
    fn drop_ratio_is_zero_without_production() {
        let snapshot = StreamSnapshot::from(&StreamCounters::default(), StreamState::Idle, Duration::ZERO);
        assert_eq!(snapshot.drop_ratio, 0.0);
        assert_eq!(snapshot.bytes_in_flight(), 0);
    }

    #[test]
    fn snapshot_json_roundtrip() {
        let counters = StreamCounters::default();
        counters.add_produced(3);
        counters.add_delivered(3);
        let snapshot = StreamSnapshot::from(&counters, StreamState::Completed, Duration::from_micros(250));

        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"state\":\"completed\""), "{json}");

        let back: StreamSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn idle_stream_reports_nothing() {
        let stream = decompress_to_stream(vec![1u8, 2, 3], IdentityCompressor::new(), BufferingPolicy::Unbounded);
        let snapshot = stream.snapshot();
        assert_eq!(snapshot.state, StreamState::Idle);
        assert_eq!(snapshot.bytes_produced, 0);
        assert_eq!(snapshot.elapsed, Duration::ZERO);
    }

    #[test]
    fn completed_stream_accounts_for_every_byte() {
        let payload = IdentityCompressor::new().compress(&[7u8; 512]).unwrap();
        let mut stream = decompress_to_stream(payload, IdentityCompressor::new(), BufferingPolicy::Bounded(32));
        assert_eq!(stream.by_ref().count(), 512);

        let snapshot = stream.snapshot();
        assert_eq!(snapshot.state, StreamState::Completed);
        assert_eq!(snapshot.bytes_produced, 512);
        assert_eq!(snapshot.bytes_delivered, 512);
        assert_eq!(snapshot.bytes_dropped, 0);
        assert_eq!(snapshot.bytes_in_flight(), 0);

        // Frozen once terminal.
        assert_eq!(stream.snapshot().elapsed, snapshot.elapsed);
    }
}
