//! Line-based event rendering.

use crossterm::style::Stylize;
use std::io::{self, Write};

use crate::sse::SseEvent;

/// How events are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `[kind] payload #id`
    #[default]
    Pretty,
    /// `{"event": kind, "data": payload, "id": id}` per line
    JsonLines,
}

/// Writes events in the chosen [`OutputFormat`].
#[derive(Debug, Clone, Copy)]
pub struct EventPrinter {
    format: OutputFormat,
    color: bool,
}

impl EventPrinter {
    /// Create a printer. `color` only affects [`OutputFormat::Pretty`].
    pub fn new(format: OutputFormat, color: bool) -> Self {
        Self { format, color }
    }

    /// Render one event as a single line, without the trailing newline.
    ///
    /// ```text
    /// [content] {"text":"hello"} #42
    /// ```
    pub fn render(&self, event: &SseEvent) -> String {
        match self.format {
            OutputFormat::JsonLines => {
                // SseEvent only holds strings and JSON values
                serde_json::to_string(event).unwrap_or_default()
            }
            OutputFormat::Pretty => self.render_pretty(event),
        }
    }

    fn render_pretty(&self, event: &SseEvent) -> String {
        let label = format!("[{}]", event.kind);
        let label = if self.color {
            label.cyan().bold().to_string()
        } else {
            label
        };

        let payload = match event.payload.as_json() {
            // Show plain string payloads without JSON quoting
            Some(serde_json::Value::String(text)) => text.clone(),
            _ => event.payload.to_string(),
        };

        match &event.id {
            Some(id) => {
                let id = format!("#{}", id);
                let id = if self.color { id.dark_grey().to_string() } else { id };
                format!("{} {} {}", label, payload, id)
            }
            None => format!("{} {}", label, payload),
        }
    }

    /// Write one event followed by a newline.
    pub fn write_event<W: Write>(&self, out: &mut W, event: &SseEvent) -> io::Result<()> {
        writeln!(out, "{}", self.render(event))?;
        out.flush()
    }
}
