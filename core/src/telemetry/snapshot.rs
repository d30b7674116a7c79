//! telemetry/snapshot.rs
//! Immutable view of a stream's counters at one point in time.
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::stream::StreamState;
use crate::telemetry::counters::StreamCounters;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamSnapshot {
    pub state: StreamState,
    pub bytes_produced: u64,
    pub bytes_delivered: u64,
    pub bytes_dropped: u64,
    /// `bytes_dropped / bytes_produced`, 0 when nothing was produced.
    pub drop_ratio: f64,
    /// Time since the producer started; zero while `Idle`.
    pub elapsed: Duration,
}

impl StreamSnapshot {
    pub fn from(counters: &StreamCounters, state: StreamState, elapsed: Duration) -> Self {
        let produced = counters.produced();
        let dropped = counters.dropped();

        let drop_ratio = if produced > 0 {
            dropped as f64 / produced as f64
        } else {
            0.0
        };

        Self {
            state,
            bytes_produced: produced,
            bytes_delivered: counters.delivered(),
            bytes_dropped: dropped,
            drop_ratio,
            elapsed,
        }
    }

    /// Bytes produced but neither delivered nor dropped yet.
    pub fn bytes_in_flight(&self) -> u64 {
        self.bytes_produced
            .saturating_sub(self.bytes_delivered)
            .saturating_sub(self.bytes_dropped)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
