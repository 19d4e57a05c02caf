//! Common test utilities for integration tests.
//!
//! Helpers for feeding SSE text through the reader in arbitrary chunkings
//! and collecting the results.

use spoq_stream::adapters::MockByteSource;
use spoq_stream::error::StreamResult;
use spoq_stream::sse::{collect_events, read_events, SseEvent};

/// Read all events from `chunks` delivered in order.
pub async fn events_from_chunks(chunks: Vec<Vec<u8>>) -> StreamResult<Vec<SseEvent>> {
    let source = MockByteSource::from_chunks(chunks);
    collect_events(read_events(Some(source))?).await
}

/// Read all events from `input` delivered as one chunk.
pub async fn events_from_whole(input: &str) -> Vec<SseEvent> {
    events_from_chunks(vec![input.as_bytes().to_vec()])
        .await
        .expect("single-chunk read should not fail")
}

/// Read all events from `input` split into two chunks at byte `at`.
pub async fn events_split_at(input: &str, at: usize) -> Vec<SseEvent> {
    let bytes = input.as_bytes();
    events_from_chunks(vec![bytes[..at].to_vec(), bytes[at..].to_vec()])
        .await
        .expect("two-chunk read should not fail")
}

/// A multi-frame stream covering JSON, raw text, ids, multi-byte text,
/// and frames that must be dropped.
pub const MIXED_STREAM: &str = concat!(
    "event: thread_info\n",
    "data: {\"thread_id\":\"t-1\",\"title\":\"Grüße 🦀\"}\n",
    "id: 1\n",
    "\n",
    ": keepalive\n",
    "\n",
    "event: content\n",
    "data: plain text, not json\n",
    "\n",
    "event: orphan\n",
    "\n",
    "event: content\n",
    "data: {\"text\":\"naïve café\"}\n",
    "id:  2 \n",
    "\n",
    "event: done\n",
    "data: {}\n",
    "\n",
);
