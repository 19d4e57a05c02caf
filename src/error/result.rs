//! Result type alias for stream operations.

use super::stream::StreamError;

/// Type alias for Results using [`StreamError`].
///
/// # Example
///
/// ```ignore
/// use spoq_stream::error::StreamResult;
/// use spoq_stream::sse::{collect_events, EventStream};
///
/// async fn first_kind(stream: EventStream) -> StreamResult<Option<String>> {
///     let events = collect_events(stream).await?;
///     Ok(events.into_iter().next().map(|e| e.kind))
/// }
/// ```
pub type StreamResult<T> = Result<T, StreamError>;
