//! telemetry/counters.rs
//! Byte counters updated while a stream runs.
//!
//! The producer thread bumps `produced`/`dropped`, the consuming iterator bumps
//! `delivered`, so the fields are atomics behind an `Arc`.
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct StreamCounters {
    produced: AtomicU64,
    delivered: AtomicU64,
    dropped: AtomicU64,
}

impl StreamCounters {
    /// Bytes the technique pushed into the sink.
    pub fn add_produced(&self, n: u64) {
        self.produced.fetch_add(n, Ordering::Relaxed);
    }

    /// Bytes handed to the consumer.
    pub fn add_delivered(&self, n: u64) {
        self.delivered.fetch_add(n, Ordering::Relaxed);
    }

    /// Bytes discarded by a lossy buffering policy.
    pub fn add_dropped(&self, n: u64) {
        self.dropped.fetch_add(n, Ordering::Relaxed);
    }

    pub fn produced(&self) -> u64 {
        self.produced.load(Ordering::Relaxed)
    }

    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Bytes produced but neither delivered nor dropped yet.
    pub fn in_flight(&self) -> u64 {
        self.produced()
            .saturating_sub(self.delivered())
            .saturating_sub(self.dropped())
    }
}
