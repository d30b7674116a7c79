//! stream/types.rs
//! Buffering policy, lifecycle states and configuration of a decompression stream.
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PRODUCER_THREAD_NAME;

/// What happens when the consumer is slower than the producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferingPolicy {
    /// Buffer without limit. Never drops.
    #[default]
    Unbounded,
    /// Keep the `n` oldest buffered bytes; a byte arriving at a full buffer is dropped.
    BufferingOldest(usize),
    /// Keep the `n` newest buffered bytes; the oldest buffered byte makes room.
    BufferingNewest(usize),
    /// Hold at most `n` bytes and block the producer until there is room. Never drops.
    Bounded(usize),
}

impl BufferingPolicy {
    /// Buffer capacity, `None` for unbounded.
    pub fn capacity(&self) -> Option<usize> {
        match *self {
            Self::Unbounded => None,
            Self::BufferingOldest(n) | Self::BufferingNewest(n) | Self::Bounded(n) => Some(n),
        }
    }

    /// Whether bytes may be discarded under backpressure.
    pub fn is_lossy(&self) -> bool {
        matches!(self, Self::BufferingOldest(_) | Self::BufferingNewest(_))
    }
}

/// `Idle -> Producing -> {Completed, Failed, Cancelled}`, plus `Idle -> Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamState {
    Idle,
    Producing,
    Completed,
    Failed,
    Cancelled,
}

impl StreamState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

/// Stream configuration. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub policy: BufferingPolicy,
    /// Name given to the producer thread.
    pub thread_name: String,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            policy: BufferingPolicy::Unbounded,
            thread_name: DEFAULT_PRODUCER_THREAD_NAME.to_string(),
        }
    }
}

impl StreamConfig {
    pub fn new(policy: BufferingPolicy) -> Self {
        Self { policy, ..Self::default() }
    }

    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
