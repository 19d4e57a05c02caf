//! CLI output for streamed events.
//!
//! Renders each event as it arrives, either as a colored human-readable line
//! or as one JSON object per line for piping into other tools.

mod events;

pub use events::{EventPrinter, OutputFormat};
