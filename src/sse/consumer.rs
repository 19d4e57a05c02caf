//! Drives an event stream into a per-event handler.

use futures::Stream;
use futures_util::StreamExt;
use std::future::Future;

use crate::error::{BoxError, StreamError, StreamResult};
use crate::sse::events::SseEvent;

/// Deliver every event from `events` to `handler`, in order.
///
/// Each handler call, including any async work it does, completes before
/// the next event is requested. Stops at the first error from either the
/// stream or the handler.
///
/// # Returns
/// The number of events delivered.
///
/// # Example
///
/// ```ignore
/// let count = consume_events(events, |event| async move {
///     println!("{}: {}", event.kind, event.payload);
///     Ok::<_, std::io::Error>(())
/// })
/// .await?;
/// ```
pub async fn consume_events<St, F, Fut, E>(events: St, mut handler: F) -> StreamResult<usize>
where
    St: Stream<Item = StreamResult<SseEvent>>,
    F: FnMut(SseEvent) -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: Into<BoxError>,
{
    futures_util::pin_mut!(events);
    let mut delivered = 0;

    while let Some(event) = events.next().await {
        let event = event?;
        let kind = event.kind.clone();
        handler(event).await.map_err(|err| {
            let err = StreamError::handler(err);
            tracing::warn!(kind = %kind, error = %err, "SSE event handler failed");
            err
        })?;
        delivered += 1;
    }

    Ok(delivered)
}

/// Collect every event from `events` into a vector.
///
/// Fails with the first stream error; events read before it are discarded.
pub async fn collect_events<St>(events: St) -> StreamResult<Vec<SseEvent>>
where
    St: Stream<Item = StreamResult<SseEvent>>,
{
    let mut collected = Vec::new();
    consume_events(events, |event| {
        collected.push(event);
        futures::future::ready(Ok::<_, BoxError>(()))
    })
    .await?;
    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockByteSource;
    use crate::error::SourceError;
    use crate::sse::read_events;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn test_handler_called_in_order() {
        let source = MockByteSource::from_strs(["event: a\ndata: 1\n\nevent: b\nda", "ta: 2\n\n"]);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        let count = consume_events(read_events(Some(source)).unwrap(), move |event| {
            let sink = sink.clone();
            async move {
                tokio::task::yield_now().await;
                sink.lock().unwrap().push(event.kind);
                Ok::<_, BoxError>(())
            }
        })
        .await
        .unwrap();

        assert_eq!(count, 2);
        assert_eq!(*seen.lock().unwrap(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_handler_error_stops_delivery() {
        let source = MockByteSource::from_strs([
            "event: a\ndata: 1\n\n",
            "event: b\ndata: 2\n\n",
            "event: c\ndata: 3\n\n",
        ]);
        let handle = source.handle();
        let mut calls = 0;

        let result = consume_events(read_events(Some(source)).unwrap(), |event| {
            calls += 1;
            let fail = event.kind == "b";
            async move {
                if fail {
                    Err("rejected b")
                } else {
                    Ok(())
                }
            }
        })
        .await;

        assert!(matches!(result, Err(StreamError::Handler(_))));
        assert_eq!(calls, 2);
        // The stream was dropped by the adapter, releasing the source
        assert_eq!(handle.release_count(), 1);
        assert_eq!(handle.read_count(), 2);
    }

    #[tokio::test]
    async fn test_stream_error_propagates() {
        let source = MockByteSource::from_strs(["event: a\ndata: 1\n\n"]).push_error(
            SourceError::Timeout {
                message: "idle".to_string(),
            },
        );
        let handle = source.handle();

        let result = collect_events(read_events(Some(source)).unwrap()).await;

        assert!(matches!(
            result,
            Err(StreamError::Source(SourceError::Timeout { .. }))
        ));
        assert_eq!(handle.release_count(), 1);
    }

    #[tokio::test]
    async fn test_collect_events() {
        let source = MockByteSource::from_strs(["event: done\ndata: {\"ok\":true}"]);
        let events = collect_events(read_events(Some(source)).unwrap())
            .await
            .unwrap();
        assert_eq!(events, vec![SseEvent::new("done", json!({"ok": true}))]);
    }
}
