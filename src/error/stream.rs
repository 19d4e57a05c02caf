//! Streaming-related error types.
//!
//! This module defines errors that surface from the SSE event stream and
//! from the consumer adapter that drives it.

use thiserror::Error;

use super::source::SourceError;

/// Boxed error returned by an event handler.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by the SSE reader and consumer adapter.
///
/// Malformed frames are never reported here. Only a missing body, a
/// transport failure, or a failing handler ends a stream with an error.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The response carried no body to read from.
    #[error("No stream: the response has no body")]
    NoStream,

    /// Reading from the byte source failed mid-stream.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The per-event handler failed; no further events were delivered.
    #[error("Event handler failed: {0}")]
    Handler(#[source] BoxError),
}

impl StreamError {
    /// Wrap a handler failure.
    pub fn handler<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        StreamError::Handler(err.into())
    }

    /// Check if this error is likely transient.
    pub fn is_retryable(&self) -> bool {
        match self {
            StreamError::Source(err) => err.is_retryable(),
            StreamError::NoStream | StreamError::Handler(_) => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::NoStream => "The server returned no event stream.".to_string(),
            StreamError::Source(err) => err.user_message(),
            StreamError::Handler(err) => format!("Failed to handle event: {}", err),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::NoStream => "E_STREAM_NONE",
            StreamError::Source(err) => err.error_code(),
            StreamError::Handler(_) => "E_STREAM_HANDLER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_stream_display() {
        let err = StreamError::NoStream;
        assert_eq!(err.to_string(), "No stream: the response has no body");
        assert_eq!(err.error_code(), "E_STREAM_NONE");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_source_error_is_transparent() {
        let err: StreamError = SourceError::Timeout {
            message: "30s".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Timed out reading stream: 30s");
        assert!(err.is_retryable());
        assert_eq!(err.error_code(), "E_SRC_TIMEOUT");
    }

    #[test]
    fn test_handler_error_keeps_source() {
        let err = StreamError::handler("disk full");
        assert!(err.to_string().contains("disk full"));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.error_code(), "E_STREAM_HANDLER");
    }
}
