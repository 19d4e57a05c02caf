//! Prelude module for convenient imports.
//!
//! ```ignore
//! use spoq_stream::prelude::*;
//! ```

pub use crate::adapters::StreamSource;
pub use crate::conductor::{ConductorClient, ConductorError};
pub use crate::config::StreamConfig;
pub use crate::error::{SourceError, StreamError, StreamResult};
pub use crate::models::StreamRequest;
pub use crate::sse::{collect_events, consume_events, read_events, EventStream, Payload, SseEvent};
pub use crate::traits::ByteSource;
