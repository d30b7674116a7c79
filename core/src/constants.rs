use std::time::Duration;

/// Read buffer used when pumping a decoder into a sink (8 KiB).
pub const STREAM_READ_CHUNK: usize = 8 * 1024;

/// Default name of the stream producer thread.
pub const DEFAULT_PRODUCER_THREAD_NAME: &str = "decompress-producer";

/// How often a producer blocked on delivering the terminal error re-checks
/// whether the consumer has cancelled.
pub const TERMINAL_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Most slots a stream preallocates for its channel. Larger policy capacities
/// get an unbounded channel and are enforced by counting in-flight bytes.
pub const MAX_CHANNEL_SLOTS: usize = 8 * 1024;
