//! spoq-stream - streaming Server-Sent Events client for the conductor API
//!
//! The core lives in [`sse`]: a frame parser, a pull-based stream reader over
//! any [`traits::ByteSource`], and a consumer adapter that feeds each event
//! to a handler. The other modules wire that core to a reqwest connection
//! and a small CLI.

pub mod adapters;
pub mod cli;
pub mod cli_output;
pub mod conductor;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod sse;
pub mod traits;

pub mod prelude;
