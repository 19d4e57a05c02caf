//! Byte-source trait abstraction.
//!
//! Provides the seam between a live response body and the SSE reader,
//! enabling dependency injection and mocking in tests.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::SourceError;

/// A live source of body bytes.
///
/// The SSE reader pulls chunks one at a time and never asks for the next
/// chunk until its consumer wants another event.
///
/// # Example
///
/// ```ignore
/// use spoq_stream::traits::ByteSource;
///
/// async fn drain<S: ByteSource>(source: &mut S) -> Result<usize, SourceError> {
///     let mut total = 0;
///     while let Some(chunk) = source.next_chunk().await? {
///         total += chunk.len();
///     }
///     source.release();
///     Ok(total)
/// }
/// ```
#[async_trait]
pub trait ByteSource: Send {
    /// Read the next chunk of bytes.
    ///
    /// # Returns
    /// - `Ok(Some(chunk))` when more data arrived
    /// - `Ok(None)` at end of source
    /// - `Err(error)` when the transport failed
    async fn next_chunk(&mut self) -> Result<Option<Bytes>, SourceError>;

    /// Give up read access to the source.
    ///
    /// Called exactly once by the reader, on every termination path.
    /// Implementations should cancel the underlying connection if it is
    /// still open.
    fn release(&mut self);
}
