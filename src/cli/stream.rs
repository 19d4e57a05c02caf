//! Stream command: send a prompt and print the events as they arrive.

use color_eyre::{
    eyre::{Report, WrapErr},
    Result,
};

use super::args::StreamArgs;
use crate::cli_output::EventPrinter;
use crate::conductor::{ConductorClient, ConductorError};
use crate::error::StreamError;
use crate::config::StreamConfig;
use crate::models::StreamRequest;
use crate::session::SessionStore;
use crate::sse::consume_events;

/// Build the request for `args`, reusing the stored session when allowed.
pub fn build_request(args: &StreamArgs, store: Option<&SessionStore>) -> StreamRequest {
    let mut request = StreamRequest::new(args.prompt.clone());
    if !args.new_session {
        if let Some(session_id) = store.and_then(SessionStore::load) {
            request = request.with_session_id(session_id);
        }
    }
    if let Some(thread_id) = &args.thread_id {
        request = request.with_thread_id(thread_id.clone());
    }
    request
}

/// Apply command-line overrides on top of the loaded config.
pub fn apply_overrides(mut config: StreamConfig, args: &StreamArgs) -> StreamConfig {
    if let Some(url) = &args.url {
        config = config.with_base_url(url.clone());
    }
    if let Some(token) = &args.token {
        config = config.with_auth_token(token.clone());
    }
    config
}

/// Lead with the user-facing message, keeping the error as the cause.
fn describe_stream_error(err: StreamError) -> Report {
    let message = err.user_message();
    Report::new(err).wrap_err(message)
}

/// Handle the stream command.
///
/// Events are printed to stdout as they arrive. Ctrl-C stops reading and
/// closes the connection.
pub async fn handle_stream_command(args: StreamArgs) -> Result<()> {
    let config = StreamConfig::load(args.config_path.as_deref()).map_err(ConductorError::from)?;
    let config = apply_overrides(config, &args);

    let store = SessionStore::new();
    let request = build_request(&args, store.as_ref());

    let client = ConductorClient::new(config);
    let events = client
        .stream(&request)
        .await
        .wrap_err("Failed to open event stream")?;

    let printer = EventPrinter::new(args.format, args.color);
    let consume = consume_events(events, |event| {
        futures::future::ready(printer.write_event(&mut std::io::stdout(), &event))
    });

    let delivered = tokio::select! {
        result = consume => result.map_err(describe_stream_error)?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted, closing stream");
            return Ok(());
        }
    };
    tracing::debug!(delivered, "Stream complete");

    if let Some(store) = &store {
        if !store.save(&request.session_id) {
            tracing::warn!(path = ?store.session_path(), "Failed to save session id");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli_output::OutputFormat;
    use tempfile::TempDir;

    fn args(prompt: &str) -> StreamArgs {
        StreamArgs {
            prompt: prompt.to_string(),
            url: None,
            token: None,
            thread_id: None,
            config_path: None,
            format: OutputFormat::Pretty,
            color: false,
            new_session: false,
        }
    }

    #[test]
    fn test_build_request_reuses_stored_session() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::in_dir(temp_dir.path());
        store.save("stored-session");

        let request = build_request(&args("hi"), Some(&store));
        assert_eq!(request.session_id, "stored-session");
        assert_eq!(request.prompt, "hi");
    }

    #[test]
    fn test_build_request_new_session() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::in_dir(temp_dir.path());
        store.save("stored-session");

        let mut stream_args = args("hi");
        stream_args.new_session = true;
        stream_args.thread_id = Some("t-1".to_string());

        let request = build_request(&stream_args, Some(&store));
        assert_ne!(request.session_id, "stored-session");
        assert_eq!(request.thread_id.as_deref(), Some("t-1"));
    }

    #[test]
    fn test_build_request_without_store() {
        let request = build_request(&args("hi"), None);
        assert!(!request.session_id.is_empty());
    }

    #[test]
    fn test_stream_error_report_leads_with_user_message() {
        let report = describe_stream_error(StreamError::NoStream);
        assert_eq!(report.to_string(), StreamError::NoStream.user_message());
        let cause = report.chain().nth(1).map(|err| err.to_string());
        assert_eq!(cause, Some(StreamError::NoStream.to_string()));
    }

    #[test]
    fn test_apply_overrides() {
        let mut stream_args = args("hi");
        stream_args.url = Some("http://cli:1".to_string());
        stream_args.token = Some("cli-token".to_string());

        let config = apply_overrides(StreamConfig::new().with_auth_token("file"), &stream_args);
        assert_eq!(config.base_url, "http://cli:1");
        assert_eq!(config.auth_token.as_deref(), Some("cli-token"));
    }
}
