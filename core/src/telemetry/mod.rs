//! telemetry/mod.rs
//! Stream telemetry: live counters shared by producer and consumer, and
//! immutable snapshots taken from them.

pub mod counters;
pub mod snapshot;

pub use counters::*;
pub use snapshot::*;
