//! SSE event types and definitions
//!
//! Contains the decoded [`SseEvent`] handed to consumers, its [`Payload`],
//! and the [`SseLine`] classification used while scanning a frame.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Decoded `data:` content of a frame.
///
/// The frame's data is parsed as JSON first. When that fails the raw,
/// untrimmed text is kept instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// `data:` content that parsed as JSON
    Json(Value),
    /// `data:` content that was not valid JSON
    Text(String),
}

impl Payload {
    /// Decode the content of a `data:` line.
    pub fn from_data(data: &str) -> Self {
        match serde_json::from_str::<Value>(data) {
            Ok(value) => Payload::Json(value),
            Err(_) => Payload::Text(data.to_string()),
        }
    }

    /// Returns the parsed JSON value, if the data was JSON.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Text(_) => None,
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Json(value)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Json(value) => write!(f, "{}", value),
            Payload::Text(text) => write!(f, "{}", text),
        }
    }
}

/// A single event decoded from the stream.
///
/// Only built from frames that carried both an `event:` and a `data:` line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SseEvent {
    /// Event type from the `event:` line, never empty
    #[serde(rename = "event")]
    pub kind: String,
    /// Decoded `data:` content
    #[serde(rename = "data")]
    pub payload: Payload,
    /// Correlation id from the `id:` line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl SseEvent {
    /// Create an event without a correlation id.
    pub fn new(kind: impl Into<String>, payload: impl Into<Payload>) -> Self {
        Self {
            kind: kind.into(),
            payload: payload.into(),
            id: None,
        }
    }

    /// Attach a correlation id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Represents a classified SSE line
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine<'a> {
    /// `event: <kind>`, remainder trimmed
    Event(&'a str),
    /// `data: <content>`, remainder untouched
    Data(&'a str),
    /// `id: <id>`, remainder trimmed
    Id(&'a str),
    /// Empty line - terminates the current frame
    Empty,
    /// Anything else, including `:` comments
    Ignored,
}
