//! stream/sink.rs
//! Producer side of the stream: a `StreamSink` over a crossbeam channel that
//! applies the buffering policy.
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam::channel::{Receiver, SendTimeoutError, Sender, TrySendError};

use crate::compression::{CompressionError, StreamSink};
use crate::constants::{MAX_CHANNEL_SLOTS, TERMINAL_POLL_INTERVAL};
use crate::stream::types::BufferingPolicy;
use crate::telemetry::StreamCounters;

pub(crate) type StreamItem = Result<u8, CompressionError>;

pub(crate) struct ChannelSink {
    tx: Sender<StreamItem>,
    /// Producer-held receiver used to discard the oldest byte under
    /// `BufferingNewest`. Keeps the channel connected, so cancellation is also
    /// signalled through `cancelled`.
    evict: Option<Receiver<StreamItem>>,
    policy: BufferingPolicy,
    /// Capacity enforced by counting in-flight bytes, for lossy policies whose
    /// capacity is too large to preallocate as channel slots.
    queue_limit: Option<u64>,
    cancelled: Arc<AtomicBool>,
    counters: Arc<StreamCounters>,
    closed: bool,
}

impl ChannelSink {
    pub(crate) fn new(
        tx: Sender<StreamItem>,
        evict: Option<Receiver<StreamItem>>,
        policy: BufferingPolicy,
        cancelled: Arc<AtomicBool>,
        counters: Arc<StreamCounters>,
    ) -> Self {
        let queue_limit = match policy {
            BufferingPolicy::BufferingOldest(n) | BufferingPolicy::BufferingNewest(n) if n > MAX_CHANNEL_SLOTS => {
                Some(u64::try_from(n).unwrap_or(u64::MAX))
            }
            _ => None,
        };
        Self { tx, evict, policy, queue_limit, cancelled, counters, closed: false }
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    fn close(&mut self) -> ControlFlow<()> {
        if !self.closed {
            log::trace!("stream consumer gone, producer stops pushing");
            self.closed = true;
        }
        ControlFlow::Break(())
    }

    /// Discard the oldest buffered element. False if the buffer was already drained.
    fn evict_oldest(&self) -> bool {
        match &self.evict {
            Some(evict) if evict.try_recv().is_ok() => {
                self.counters.add_dropped(1);
                true
            }
            _ => false,
        }
    }

    /// Deliver the terminal error. Never subject to the drop rules.
    pub(crate) fn fail(&mut self, err: CompressionError) {
        if self.closed || self.is_cancelled() {
            log::debug!("consumer gone, discarding terminal error: {err}");
            return;
        }

        let mut item = Err(err);
        if self.evict.is_some() {
            loop {
                match self.tx.try_send(item) {
                    Ok(()) => return,
                    Err(TrySendError::Full(back)) => {
                        item = back;
                        self.evict_oldest();
                    }
                    Err(TrySendError::Disconnected(_)) => return,
                }
            }
        }

        loop {
            match self.tx.send_timeout(item, TERMINAL_POLL_INTERVAL) {
                Ok(()) => return,
                Err(SendTimeoutError::Timeout(back)) => {
                    if self.is_cancelled() {
                        return;
                    }
                    item = back;
                }
                Err(SendTimeoutError::Disconnected(_)) => return,
            }
        }
    }
}

impl StreamSink for ChannelSink {
    fn push(&mut self, byte: u8) -> ControlFlow<()> {
        if self.closed || self.is_cancelled() {
            return self.close();
        }
        let full = self.queue_limit.is_some_and(|limit| self.counters.in_flight() >= limit);
        self.counters.add_produced(1);

        match self.policy {
            BufferingPolicy::Unbounded | BufferingPolicy::Bounded(_) => {
                if self.tx.send(Ok(byte)).is_err() {
                    return self.close();
                }
            }
            BufferingPolicy::BufferingOldest(_) if full => self.counters.add_dropped(1),
            BufferingPolicy::BufferingOldest(_) => match self.tx.try_send(Ok(byte)) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => self.counters.add_dropped(1),
                Err(TrySendError::Disconnected(_)) => return self.close(),
            },
            BufferingPolicy::BufferingNewest(_) => {
                if full {
                    self.evict_oldest();
                }
                let mut item = Ok(byte);
                loop {
                    match self.tx.try_send(item) {
                        Ok(()) => break,
                        // Zero capacity: nothing buffered to evict, the new byte goes.
                        Err(TrySendError::Full(_)) if self.evict.is_none() => {
                            self.counters.add_dropped(1);
                            break;
                        }
                        Err(TrySendError::Full(back)) => {
                            item = back;
                            self.evict_oldest();
                        }
                        Err(TrySendError::Disconnected(_)) => return self.close(),
                    }
                }
            }
        }

        ControlFlow::Continue(())
    }
}
