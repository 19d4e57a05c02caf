//! Concrete implementations of trait abstractions.
//!
//! - [`StreamSource`] - byte source over any chunk stream (reqwest bodies)
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockByteSource`] - scripted chunks with release tracking

pub mod mock;
pub mod stream_source;

pub use mock::{MockByteSource, MockSourceHandle};
pub use stream_source::StreamSource;
