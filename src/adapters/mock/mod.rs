//! Mock implementations for testing.
//!
//! - [`MockByteSource`] - scripted chunks and errors with read/release counters

pub mod byte_source;

pub use byte_source::{MockByteSource, MockChunk, MockSourceHandle};
