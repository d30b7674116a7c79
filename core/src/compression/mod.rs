//! compression/mod.rs
//! The compression capability and the techniques bundled with it.
//!
//! - `types` holds the contract (`Compressor`, `StreamSink`, errors).
//! - `codecs` and `registry` are collaborators built on the contract; nothing
//!   else in the crate depends on a particular technique.

pub mod codecs;
pub mod constants;
pub mod registry;
pub mod result;
pub mod types;

pub use constants::*;
pub use registry::*;
pub use result::*;
pub use types::*;
