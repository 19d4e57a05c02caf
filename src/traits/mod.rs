//! Trait abstractions for dependency injection and testability.
//!
//! - [`ByteSource`] - chunked response body feeding the SSE reader

pub mod byte_source;

pub use byte_source::ByteSource;
