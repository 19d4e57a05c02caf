//! Error handling for the SSE stream core.
//!
//! - **Source errors**: transport failures while reading the response body
//! - **Stream errors**: what an event stream or consumer can end with
//! - **Result alias**: `StreamResult<T>` for consistent return types
//!
//! | Condition | Error | Retryable |
//! |-----------|-------|-----------|
//! | Response has no body | `StreamError::NoStream` | No |
//! | Connection dropped / timed out | `StreamError::Source` | Yes |
//! | Other read failure | `StreamError::Source` | No |
//! | Handler failed | `StreamError::Handler` | No |
//!
//! Malformed SSE frames are not errors; they are dropped by the parser.

mod result;
mod source;
mod stream;

pub use result::StreamResult;
pub use source::{classify_reqwest_error, SourceError};
pub use stream::{BoxError, StreamError};
