//! Byte source over an async chunk stream.
//!
//! This module adapts any `futures::Stream` of byte chunks, such as the body
//! of a `reqwest::Response`, to the [`ByteSource`] trait.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use futures_util::StreamExt;
use std::pin::Pin;
use std::time::Duration;

use crate::error::SourceError;
use crate::traits::ByteSource;

type ChunkStream = Pin<Box<dyn Stream<Item = Result<Bytes, SourceError>> + Send>>;

/// [`ByteSource`] backed by a chunk stream.
///
/// Releasing the source drops the inner stream, which for a reqwest body
/// closes the underlying connection.
///
/// # Example
///
/// ```ignore
/// use spoq_stream::adapters::StreamSource;
///
/// let response = client.post(url).send().await?;
/// let source = StreamSource::new(response.bytes_stream());
/// let events = read_events(Some(source))?;
/// ```
pub struct StreamSource {
    inner: Option<ChunkStream>,
    /// Fail a read that waits longer than this for the next chunk
    read_timeout: Option<Duration>,
}

impl StreamSource {
    /// Wrap a chunk stream whose errors convert into [`SourceError`].
    pub fn new<St, E>(stream: St) -> Self
    where
        St: Stream<Item = Result<Bytes, E>> + Send + 'static,
        E: Into<SourceError>,
    {
        let mapped = stream.map(|chunk| chunk.map_err(Into::into));
        Self {
            inner: Some(Box::pin(mapped)),
            read_timeout: None,
        }
    }

    /// Fail reads that wait longer than `timeout` for a chunk.
    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Returns true once the source has been released.
    pub fn is_released(&self) -> bool {
        self.inner.is_none()
    }
}

impl std::fmt::Debug for StreamSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamSource")
            .field("released", &self.is_released())
            .finish()
    }
}

#[async_trait]
impl ByteSource for StreamSource {
    async fn next_chunk(&mut self) -> Result<Option<Bytes>, SourceError> {
        let Some(stream) = self.inner.as_mut() else {
            return Ok(None);
        };

        match self.read_timeout {
            Some(limit) => match tokio::time::timeout(limit, stream.next()).await {
                Ok(chunk) => chunk.transpose(),
                Err(_) => Err(SourceError::Timeout {
                    message: format!("no data for {:?}", limit),
                }),
            },
            None => stream.next().await.transpose(),
        }
    }

    fn release(&mut self) {
        self.inner = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    #[tokio::test]
    async fn test_yields_chunks_then_end() {
        let chunks = vec![
            Ok::<_, SourceError>(Bytes::from("event: a\n")),
            Ok(Bytes::from("data: 1\n\n")),
        ];
        let mut source = StreamSource::new(stream::iter(chunks));

        assert_eq!(source.next_chunk().await.unwrap(), Some(Bytes::from("event: a\n")));
        assert_eq!(source.next_chunk().await.unwrap(), Some(Bytes::from("data: 1\n\n")));
        assert_eq!(source.next_chunk().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_maps_io_errors() {
        let chunks = vec![Err::<Bytes, _>(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "reset",
        ))];
        let mut source = StreamSource::new(stream::iter(chunks));

        let err = source.next_chunk().await.unwrap_err();
        assert!(matches!(err, SourceError::ConnectionLost { .. }));
    }

    #[tokio::test]
    async fn test_read_timeout_fails_stalled_read() {
        let stalled = stream::pending::<Result<Bytes, SourceError>>();
        let mut source =
            StreamSource::new(stalled).with_read_timeout(Some(Duration::from_millis(10)));

        let err = source.next_chunk().await.unwrap_err();
        match err {
            SourceError::Timeout { message } => assert_eq!(message, "no data for 10ms"),
            other => panic!("Expected Timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_release_ends_source() {
        let chunks = vec![Ok::<_, SourceError>(Bytes::from("data: 1\n"))];
        let mut source = StreamSource::new(stream::iter(chunks));

        assert!(!source.is_released());
        source.release();
        assert!(source.is_released());
        assert_eq!(source.next_chunk().await.unwrap(), None);
    }
}
