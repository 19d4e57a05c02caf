//! Byte-source error types.
//!
//! This module defines errors raised while reading chunks from the live
//! response body that feeds the SSE reader.

use thiserror::Error;

/// Errors reported by a [`ByteSource`](crate::traits::ByteSource).
///
/// These represent transport failures. They are always propagated to the
/// consumer of an event stream, never swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The connection dropped while the body was being read.
    #[error("Connection lost while reading stream: {message}")]
    ConnectionLost { message: String },

    /// No data arrived within the configured read timeout.
    #[error("Timed out reading stream: {message}")]
    Timeout { message: String },

    /// The HTTP layer failed to deliver the body.
    #[error("HTTP error while reading stream: {message}")]
    Http { message: String },

    /// Local I/O failure.
    #[error("IO error while reading stream: {message}")]
    Io { message: String },

    /// Any other read failure.
    #[error("Stream read error: {message}")]
    Other { message: String },
}

impl SourceError {
    /// Check if this error is likely transient.
    ///
    /// The reader itself never retries; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SourceError::ConnectionLost { .. } | SourceError::Timeout { .. }
        )
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            SourceError::ConnectionLost { .. } => {
                "Connection to the server was lost while streaming.".to_string()
            }
            SourceError::Timeout { .. } => {
                "The server stopped sending data. The connection may have been lost.".to_string()
            }
            SourceError::Http { .. } => {
                "The server response could not be read. Please try again.".to_string()
            }
            SourceError::Io { message } => format!("Local I/O error: {}", message),
            SourceError::Other { message } => format!("Stream error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            SourceError::ConnectionLost { .. } => "E_SRC_CONN",
            SourceError::Timeout { .. } => "E_SRC_TIMEOUT",
            SourceError::Http { .. } => "E_SRC_HTTP",
            SourceError::Io { .. } => "E_SRC_IO",
            SourceError::Other { .. } => "E_SRC_OTHER",
        }
    }
}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::TimedOut => SourceError::Timeout {
                message: err.to_string(),
            },
            std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::BrokenPipe
            | std::io::ErrorKind::UnexpectedEof => SourceError::ConnectionLost {
                message: err.to_string(),
            },
            _ => SourceError::Io {
                message: err.to_string(),
            },
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        classify_reqwest_error(&err)
    }
}

/// Classify a reqwest body error into a [`SourceError`].
pub fn classify_reqwest_error(err: &reqwest::Error) -> SourceError {
    if err.is_timeout() {
        SourceError::Timeout {
            message: err.to_string(),
        }
    } else if err.is_connect() || err.is_body() {
        SourceError::ConnectionLost {
            message: err.to_string(),
        }
    } else if err.is_decode() || err.is_status() || err.is_request() {
        SourceError::Http {
            message: err.to_string(),
        }
    } else {
        SourceError::Other {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_lost_is_retryable() {
        let err = SourceError::ConnectionLost {
            message: "reset by peer".to_string(),
        };
        assert!(err.is_retryable());
        assert_eq!(err.error_code(), "E_SRC_CONN");
        assert!(err.to_string().contains("reset by peer"));
    }

    #[test]
    fn test_http_error_not_retryable() {
        let err = SourceError::Http {
            message: "bad chunk".to_string(),
        };
        assert!(!err.is_retryable());
        assert_eq!(err.error_code(), "E_SRC_HTTP");
    }

    #[test]
    fn test_from_io_error() {
        let err: SourceError =
            std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset").into();
        assert!(matches!(err, SourceError::ConnectionLost { .. }));

        let err: SourceError = std::io::Error::new(std::io::ErrorKind::TimedOut, "slow").into();
        assert!(matches!(err, SourceError::Timeout { .. }));

        let err: SourceError = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[test]
    fn test_user_messages_are_nonempty() {
        let errors = vec![
            SourceError::ConnectionLost { message: "x".into() },
            SourceError::Timeout { message: "x".into() },
            SourceError::Http { message: "x".into() },
            SourceError::Io { message: "x".into() },
            SourceError::Other { message: "x".into() },
        ];
        for err in errors {
            assert!(!err.user_message().is_empty());
        }
    }
}
