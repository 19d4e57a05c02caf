//! SSE frame parsing logic
//!
//! Turns a block of text into the events it contains. Parsing is lenient:
//! frames missing an `event:` or `data:` line are dropped without error,
//! and only an explicit blank line closes a frame.

use crate::sse::events::{Payload, SseEvent, SseLine};

const EVENT_PREFIX: &str = "event: ";
const DATA_PREFIX: &str = "data: ";
const ID_PREFIX: &str = "id: ";

/// Classify a single SSE line.
///
/// Prefixes are matched literally and are case-sensitive. The line must
/// already have its `\n` removed; a trailing `\r` is part of the line.
pub fn parse_sse_line(line: &str) -> SseLine<'_> {
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(rest) = line.strip_prefix(EVENT_PREFIX) {
        return SseLine::Event(rest.trim());
    }

    if let Some(rest) = line.strip_prefix(DATA_PREFIX) {
        return SseLine::Data(rest);
    }

    if let Some(rest) = line.strip_prefix(ID_PREFIX) {
        return SseLine::Id(rest.trim());
    }

    SseLine::Ignored
}

/// Partially accumulated frame.
#[derive(Debug, Default)]
struct PendingFrame {
    kind: Option<String>,
    payload: Option<Payload>,
    id: Option<String>,
}

impl PendingFrame {
    /// Close the frame, returning an event if it is complete.
    ///
    /// The accumulator is always left empty.
    fn close(&mut self) -> Option<SseEvent> {
        let frame = std::mem::take(self);
        match (frame.kind, frame.payload) {
            (Some(kind), Some(payload)) => Some(SseEvent {
                kind,
                payload,
                id: frame.id,
            }),
            (kind, payload) => {
                tracing::trace!(
                    has_kind = kind.is_some(),
                    has_payload = payload.is_some(),
                    "Dropping incomplete SSE frame"
                );
                None
            }
        }
    }
}

/// Parse every blank-line-terminated frame in `text` into events.
///
/// Lines end at `\n` only. A `\r` before it stays in the line, so a line
/// holding just `\r` is not blank and does not close a frame.
///
/// Events are returned in the order their closing blank line appears.
/// A trailing frame with no closing blank line is not emitted.
pub fn parse_frames(text: &str) -> Vec<SseEvent> {
    let mut events = Vec::new();
    let mut pending = PendingFrame::default();

    // The text after the last `\n` is an unterminated line, never a blank one
    for line in text.split_terminator('\n') {
        match parse_sse_line(line) {
            SseLine::Event(kind) => {
                // An empty kind is treated as no kind at all
                pending.kind = (!kind.is_empty()).then(|| kind.to_string());
            }
            SseLine::Data(data) => {
                pending.payload = Some(Payload::from_data(data));
            }
            SseLine::Id(id) => {
                pending.id = Some(id.to_string());
            }
            SseLine::Empty => {
                // Skip the no-op close of an empty accumulator between frames
                if pending.kind.is_some() || pending.payload.is_some() || pending.id.is_some() {
                    events.extend(pending.close());
                }
            }
            SseLine::Ignored => {}
        }
    }

    events
}
