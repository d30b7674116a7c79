//! stream/engine.rs
//! Streaming decompression engine.
//!
//! A `DecompressStream` is a lazily started, single-producer/single-consumer
//! pipeline: the first pull spawns a producer thread that runs the technique's
//! `decompress_into` against a `ChannelSink`; the iterator is the consumer.
//! Cancelling (or dropping) the stream flips a shared flag, closes the
//! receiving end and joins the producer.
use std::any::Any;
use std::iter::FusedIterator;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use bytes::Bytes;
use crossbeam::channel::{bounded, unbounded, Receiver};

use crate::compression::constants::error_codes;
use crate::compression::{CompressionError, Compressor, StreamSink};
use crate::constants::MAX_CHANNEL_SLOTS;
use crate::stream::sink::{ChannelSink, StreamItem};
use crate::stream::types::{BufferingPolicy, StreamConfig, StreamState};
use crate::telemetry::{StreamCounters, StreamSnapshot};

type Job = Box<dyn FnOnce(&mut dyn StreamSink) -> Result<(), CompressionError> + Send>;

/// Decompress `data` with `technique`, yielding bytes one at a time.
///
/// Nothing runs until the first call to `next`. Pass
/// `BufferingPolicy::default()` for the lossless unbounded behavior.
pub fn decompress_to_stream<D, C>(data: D, technique: C, policy: BufferingPolicy) -> DecompressStream
where
    D: Into<Bytes>,
    C: Compressor + 'static,
{
    decompress_to_stream_with(data, technique, StreamConfig::new(policy))
}

pub fn decompress_to_stream_with<D, C>(data: D, mut technique: C, config: StreamConfig) -> DecompressStream
where
    D: Into<Bytes>,
    C: Compressor + 'static,
{
    let data: Bytes = data.into();
    let technique_name = technique.name();
    let job: Job = Box::new(move |sink| technique.decompress_into(&data, sink));
    DecompressStream::new(job, technique_name, config)
}

pub struct DecompressStream {
    state: StreamState,
    config: StreamConfig,
    technique_name: &'static str,
    job: Option<Job>,
    rx: Option<Receiver<StreamItem>>,
    producer: Option<JoinHandle<()>>,
    cancelled: Arc<AtomicBool>,
    counters: Arc<StreamCounters>,
    started: Option<Instant>,
    elapsed: Option<Duration>,
}

impl DecompressStream {
    fn new(job: Job, technique_name: &'static str, config: StreamConfig) -> Self {
        Self {
            state: StreamState::Idle,
            config,
            technique_name,
            job: Some(job),
            rx: None,
            producer: None,
            cancelled: Arc::new(AtomicBool::new(false)),
            counters: Arc::new(StreamCounters::default()),
            started: None,
            elapsed: None,
        }
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn policy(&self) -> BufferingPolicy {
        self.config.policy
    }

    pub fn snapshot(&self) -> StreamSnapshot {
        let elapsed = self
            .elapsed
            .or_else(|| self.started.map(|t| t.elapsed()))
            .unwrap_or_default();
        StreamSnapshot::from(&self.counters, self.state, elapsed)
    }

    /// Stop the stream. The producer observes it at its next push; this
    /// returns once the producer thread has exited. Never fails, and is a
    /// no-op on a terminated stream.
    ///
    /// Blocks for as long as the technique works between two pushes. A
    /// technique relying on the default `decompress_into` decompresses
    /// everything before its first push, so cancelling it waits for that.
    pub fn cancel(&mut self) {
        match self.state {
            StreamState::Idle => {
                self.job = None;
                self.state = StreamState::Cancelled;
                log::debug!("{}: stream cancelled before start", self.technique_name);
            }
            StreamState::Producing => {
                self.cancelled.store(true, Ordering::Release);
                // Wakes a producer blocked on a full `Bounded` channel.
                self.rx = None;
                if let Err(e) = self.join_producer() {
                    log::warn!("{}: producer ended abnormally while cancelling: {e}", self.technique_name);
                }
                self.settle(StreamState::Cancelled);
                log::debug!(
                    "{}: stream cancelled after {} bytes delivered",
                    self.technique_name,
                    self.counters.delivered()
                );
            }
            StreamState::Completed | StreamState::Failed | StreamState::Cancelled => {}
        }
    }

    fn start(&mut self) -> Result<(), CompressionError> {
        let Some(job) = self.job.take() else {
            return Ok(());
        };

        let policy = self.config.policy;
        let (tx, rx) = match policy.capacity() {
            Some(n) if n <= MAX_CHANNEL_SLOTS => bounded(n),
            // Lossy policies count in-flight bytes in the sink instead.
            Some(_) if policy.is_lossy() => unbounded(),
            // Lossless: holding fewer than `n` bytes still never drops.
            Some(_) => bounded(MAX_CHANNEL_SLOTS),
            None => unbounded(),
        };
        let evict = match policy {
            BufferingPolicy::BufferingNewest(n) if n > 0 => Some(rx.clone()),
            _ => None,
        };

        let mut sink = ChannelSink::new(tx, evict, policy, self.cancelled.clone(), self.counters.clone());
        let name = self.technique_name;

        let spawned = thread::Builder::new()
            .name(self.config.thread_name.replace('\0', ""))
            .spawn(move || {
                log::debug!("{name}: producer started");
                match job(&mut sink) {
                    Ok(()) => log::debug!("{name}: producer finished"),
                    Err(e) => {
                        log::debug!("{name}: producer failed: {e}");
                        sink.fail(e);
                    }
                }
            });

        match spawned {
            Ok(handle) => {
                self.rx = Some(rx);
                self.producer = Some(handle);
                self.started = Some(Instant::now());
                self.state = StreamState::Producing;
                Ok(())
            }
            Err(e) => Err(CompressionError::technique(
                name,
                error_codes::PRODUCER_UNAVAILABLE,
                format!("cannot spawn producer thread: {e}"),
            )),
        }
    }

    fn join_producer(&mut self) -> Result<(), CompressionError> {
        let Some(handle) = self.producer.take() else {
            return Ok(());
        };
        handle.join().map_err(|payload| {
            CompressionError::technique(
                self.technique_name,
                error_codes::PRODUCER_PANICKED,
                panic_message(payload.as_ref()),
            )
        })
    }

    fn settle(&mut self, state: StreamState) {
        self.rx = None;
        self.elapsed = self.started.map(|t| t.elapsed());
        self.state = state;
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "technique panicked".to_string()
    }
}

impl Iterator for DecompressStream {
    type Item = Result<u8, CompressionError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == StreamState::Idle {
            if let Err(e) = self.start() {
                log::warn!("{}: {e}", self.technique_name);
                self.settle(StreamState::Failed);
                return Some(Err(e));
            }
        }
        if self.state != StreamState::Producing {
            return None;
        }

        let received = self.rx.as_ref()?.recv();
        match received {
            Ok(Ok(byte)) => {
                self.counters.add_delivered(1);
                Some(Ok(byte))
            }
            Ok(Err(e)) => {
                if let Err(panic) = self.join_producer() {
                    log::warn!("{}: {panic}", self.technique_name);
                }
                self.settle(StreamState::Failed);
                Some(Err(e))
            }
            // All senders gone: the producer returned (or panicked).
            Err(_) => match self.join_producer() {
                Ok(()) => {
                    self.settle(StreamState::Completed);
                    None
                }
                Err(e) => {
                    log::warn!("{}: {e}", self.technique_name);
                    self.settle(StreamState::Failed);
                    Some(Err(e))
                }
            },
        }
    }
}

impl FusedIterator for DecompressStream {}

/// Dropping cancels, and blocks the same way [`DecompressStream::cancel`] does.
impl Drop for DecompressStream {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for DecompressStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecompressStream")
            .field("technique", &self.technique_name)
            .field("state", &self.state)
            .field("policy", &self.config.policy)
            .finish()
    }
}
