//! SSE (Server-Sent Events) stream decoding
//!
//! Decodes a chunked response body into [`SseEvent`]s. The wire format is a
//! reduced SSE subset:
//! - `event: <kind>` - event type line
//! - `data: <json-or-text>` - payload line, parsed as JSON when possible
//! - `id: <id>` - optional correlation id
//! - Empty line - signals end of event
//!
//! Any other line is ignored. There is no multi-line `data:` concatenation
//! and no `retry:` handling.
//!
//! # Module structure
//! - `events` - Event types (SseEvent, Payload, SseLine)
//! - `parser` - Frame parsing (parse_frames, parse_sse_line)
//! - `decoder` - Incremental UTF-8 decoding across chunk boundaries
//! - `reader` - Pull-based event stream over a byte source
//! - `consumer` - Per-event handler driver

mod consumer;
mod decoder;
mod events;
mod parser;
mod reader;

// Re-export public types
pub use consumer::{collect_events, consume_events};
pub use decoder::Utf8Decoder;
pub use events::{Payload, SseEvent, SseLine};
pub use parser::{parse_frames, parse_sse_line};
pub use reader::{read_events, EventStream, ReadLock};
