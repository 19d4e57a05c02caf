//! Mock byte source for testing.
//!
//! Replays a scripted sequence of chunks and errors, and records how many
//! times the reader pulled from it and released it.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::error::SourceError;
use crate::traits::ByteSource;

/// One scripted step of a [`MockByteSource`].
#[derive(Debug, Clone)]
pub enum MockChunk {
    /// Deliver these bytes
    Data(Bytes),
    /// Fail the read with this error
    Error(SourceError),
    /// Never complete the read, like a connection that went quiet
    Stall,
}

#[derive(Debug, Default)]
struct MockSourceState {
    reads: usize,
    releases: usize,
}

/// Observer for a [`MockByteSource`] that outlives the source itself.
#[derive(Debug, Clone, Default)]
pub struct MockSourceHandle {
    state: Arc<Mutex<MockSourceState>>,
}

impl MockSourceHandle {
    /// Number of `next_chunk` calls made so far.
    pub fn read_count(&self) -> usize {
        self.state.lock().unwrap().reads
    }

    /// Number of `release` calls made so far.
    pub fn release_count(&self) -> usize {
        self.state.lock().unwrap().releases
    }
}

/// Mock byte source for testing.
///
/// # Example
///
/// ```ignore
/// use spoq_stream::adapters::mock::MockByteSource;
///
/// let source = MockByteSource::from_strs(["event: a\nda", "ta: 1\n\n"]);
/// let handle = source.handle();
/// let events = collect_events(read_events(Some(source))?).await?;
/// assert_eq!(handle.release_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockByteSource {
    script: VecDeque<MockChunk>,
    handle: MockSourceHandle,
}

impl MockByteSource {
    /// Create an empty source that ends immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source that yields the given byte chunks in order.
    pub fn from_chunks<I, B>(chunks: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        Self {
            script: chunks
                .into_iter()
                .map(|chunk| MockChunk::Data(chunk.into()))
                .collect(),
            handle: MockSourceHandle::default(),
        }
    }

    /// Create a source that yields the given text chunks in order.
    pub fn from_strs<'a, I>(chunks: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::from_chunks(
            chunks
                .into_iter()
                .map(|s| Bytes::copy_from_slice(s.as_bytes())),
        )
    }

    /// Append a data chunk to the script.
    pub fn push_chunk(mut self, chunk: impl Into<Bytes>) -> Self {
        self.script.push_back(MockChunk::Data(chunk.into()));
        self
    }

    /// Append a read failure to the script.
    pub fn push_error(mut self, err: SourceError) -> Self {
        self.script.push_back(MockChunk::Error(err));
        self
    }

    /// Append a read that never completes.
    pub fn push_stall(mut self) -> Self {
        self.script.push_back(MockChunk::Stall);
        self
    }

    /// Get an observer for the read and release counters.
    pub fn handle(&self) -> MockSourceHandle {
        self.handle.clone()
    }
}

#[async_trait]
impl ByteSource for MockByteSource {
    async fn next_chunk(&mut self) -> Result<Option<Bytes>, SourceError> {
        self.handle.state.lock().unwrap().reads += 1;

        match self.script.pop_front() {
            Some(MockChunk::Data(bytes)) => Ok(Some(bytes)),
            Some(MockChunk::Error(err)) => Err(err),
            Some(MockChunk::Stall) => futures::future::pending().await,
            None => Ok(None),
        }
    }

    fn release(&mut self) {
        self.handle.state.lock().unwrap().releases += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_script_in_order() {
        let mut source = MockByteSource::from_strs(["a", "b"]).push_error(SourceError::Other {
            message: "boom".to_string(),
        });
        let handle = source.handle();

        assert_eq!(source.next_chunk().await.unwrap(), Some(Bytes::from("a")));
        assert_eq!(source.next_chunk().await.unwrap(), Some(Bytes::from("b")));
        assert!(source.next_chunk().await.is_err());
        assert_eq!(source.next_chunk().await.unwrap(), None);
        assert_eq!(handle.read_count(), 4);
    }

    #[tokio::test]
    async fn test_push_chunk_and_stall() {
        let mut source = MockByteSource::new().push_chunk("data: 1\n").push_stall();

        assert_eq!(source.next_chunk().await.unwrap(), Some(Bytes::from("data: 1\n")));
        let stalled =
            tokio::time::timeout(std::time::Duration::from_millis(10), source.next_chunk()).await;
        assert!(stalled.is_err());
    }

    #[tokio::test]
    async fn test_handle_counts_releases() {
        let mut source = MockByteSource::new();
        let handle = source.handle();

        assert_eq!(handle.release_count(), 0);
        source.release();
        drop(source);
        assert_eq!(handle.release_count(), 1);
    }
}
