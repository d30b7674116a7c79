//! stream/mod.rs
//! Streaming decompression: bytes delivered one at a time through a
//! cancellable, backpressured channel.

pub mod engine;
pub(crate) mod sink;
pub mod types;

pub use engine::*;
pub use types::*;
