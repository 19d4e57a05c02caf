//! Incremental SSE stream reader.
//!
//! Pulls chunks from a [`ByteSource`], decodes them, slices complete frames
//! off a text buffer and yields the parsed events one at a time. Nothing is
//! read ahead of the consumer: polling the stream is the only thing that
//! advances it.

use futures::stream::{self, BoxStream, Stream};
use futures_util::StreamExt;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::error::{StreamError, StreamResult};
use crate::sse::decoder::Utf8Decoder;
use crate::sse::events::SseEvent;
use crate::sse::parser::parse_frames;
use crate::traits::ByteSource;

const FRAME_BOUNDARY: &str = "\n\n";

/// Exclusive read access to a [`ByteSource`].
///
/// The source is released exactly once: either explicitly through
/// [`ReadLock::release`] or when the lock is dropped.
pub struct ReadLock<S: ByteSource> {
    source: S,
    released: bool,
}

impl<S: ByteSource> ReadLock<S> {
    /// Take exclusive read access to `source`.
    pub fn acquire(source: S) -> Self {
        tracing::debug!("Acquired SSE source read lock");
        Self {
            source,
            released: false,
        }
    }

    /// Returns true once the source has been released.
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Release the source. Later calls are no-ops.
    pub fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.source.release();
            tracing::debug!("Released SSE source read lock");
        }
    }

    fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<S: ByteSource> Drop for ReadLock<S> {
    fn drop(&mut self) {
        self.release();
    }
}

/// State threaded through the event stream between polls.
struct ReaderState<S: ByteSource> {
    lock: ReadLock<S>,
    decoder: Utf8Decoder,
    /// Decoded text not yet known to hold a complete frame
    buffer: String,
    /// Byte offset in `buffer` before which no boundary can start
    scanned: usize,
    /// Events parsed from the current chunk, not yet handed out
    ready: VecDeque<SseEvent>,
    /// Source is exhausted or failed; no more reads
    finished: bool,
    emitted: usize,
}

impl<S: ByteSource> ReaderState<S> {
    fn new(source: S) -> Self {
        Self {
            lock: ReadLock::acquire(source),
            decoder: Utf8Decoder::new(),
            buffer: String::new(),
            scanned: 0,
            ready: VecDeque::new(),
            finished: false,
            emitted: 0,
        }
    }

    /// Produce the next event, reading more chunks only when needed.
    async fn next_event(mut self) -> Option<(StreamResult<SseEvent>, Self)> {
        loop {
            if let Some(event) = self.ready.pop_front() {
                self.emitted += 1;
                return Some((Ok(event), self));
            }

            if self.finished {
                tracing::debug!(events = self.emitted, "SSE stream finished");
                self.lock.release();
                return None;
            }

            match self.lock.source_mut().next_chunk().await {
                Ok(Some(chunk)) => {
                    self.decoder.decode_into(&chunk, &mut self.buffer);
                    self.drain_frames();
                }
                Ok(None) => {
                    self.finished = true;
                    self.flush_remainder();
                }
                Err(err) => {
                    tracing::warn!(error = %err, code = err.error_code(), "SSE source read failed");
                    self.finished = true;
                    self.lock.release();
                    return Some((Err(StreamError::Source(err)), self));
                }
            }
        }
    }

    /// Slice every complete frame off the front of the buffer.
    ///
    /// Only text appended since the last call is searched, plus enough
    /// overlap to catch a boundary split across chunks.
    fn drain_frames(&mut self) {
        let boundary = FRAME_BOUNDARY.as_bytes();
        loop {
            let Some(pos) = self.buffer.as_bytes()[self.scanned..]
                .windows(boundary.len())
                .position(|window| window == boundary)
            else {
                break;
            };

            // The boundary is ASCII, so the cut lands on a char boundary
            let end = self.scanned + pos + boundary.len();
            let rest = self.buffer.split_off(end);
            let frame = std::mem::replace(&mut self.buffer, rest);
            self.scanned = 0;

            let events = parse_frames(&frame);
            tracing::trace!(bytes = frame.len(), events = events.len(), "Parsed SSE frame");
            self.ready.extend(events);
        }
        self.scanned = self.buffer.len().saturating_sub(boundary.len() - 1);
    }

    /// Parse whatever is left once the source is exhausted.
    ///
    /// This is the only place a frame without a closing blank line is
    /// honored.
    fn flush_remainder(&mut self) {
        if self.decoder.has_pending() {
            tracing::debug!("SSE source ended inside a UTF-8 sequence");
        }
        self.decoder.finish(&mut self.buffer);
        if self.buffer.trim().is_empty() {
            self.buffer.clear();
            return;
        }

        let mut frame = std::mem::take(&mut self.buffer);
        frame.push_str(FRAME_BOUNDARY);
        let events = parse_frames(&frame);
        tracing::trace!(events = events.len(), "Flushed trailing SSE frame");
        self.ready.extend(events);
    }
}

/// Lazy, single-consumer stream of decoded events.
///
/// Dropping the stream before it ends releases the underlying source.
pub struct EventStream {
    inner: BoxStream<'static, StreamResult<SseEvent>>,
}

impl Stream for EventStream {
    type Item = StreamResult<SseEvent>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

impl std::fmt::Debug for EventStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStream").finish_non_exhaustive()
    }
}

/// Start reading events from a byte source.
///
/// # Errors
/// Returns [`StreamError::NoStream`] when `source` is `None`. Read failures
/// surface later as `Err` items of the stream, after which it ends.
///
/// # Example
///
/// ```ignore
/// use futures::StreamExt;
/// use spoq_stream::sse::read_events;
///
/// let mut events = read_events(Some(source))?;
/// while let Some(event) = events.next().await {
///     println!("{}", event?.kind);
/// }
/// ```
pub fn read_events<S>(source: Option<S>) -> StreamResult<EventStream>
where
    S: ByteSource + 'static,
{
    let source = source.ok_or(StreamError::NoStream)?;
    let state = ReaderState::new(source);
    let inner = stream::unfold(state, |state| state.next_event())
        .fuse()
        .boxed();
    Ok(EventStream { inner })
}
