//! Conductor API client for streaming responses.
//!
//! Opens the streaming endpoint with reqwest and hands the response body to
//! the SSE reader. The client owns request construction and HTTP status
//! handling; everything after the body starts flowing is the reader's job.

use crate::adapters::StreamSource;
use crate::config::{ConfigError, StreamConfig};
use crate::error::StreamError;
use crate::models::StreamRequest;
use crate::sse::{read_events, EventStream};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};

/// Error type for Conductor client operations
#[derive(Debug)]
pub enum ConductorError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// Server returned an error status
    ServerError { status: u16, message: String },
    /// The event stream could not be started
    Stream(StreamError),
    /// The configuration could not be loaded
    Config(ConfigError),
}

impl std::fmt::Display for ConductorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConductorError::Http(e) => write!(f, "HTTP error: {}", e),
            ConductorError::ServerError { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            ConductorError::Stream(e) => write!(f, "Stream error: {}", e),
            ConductorError::Config(e) => write!(f, "Config error: {}", e),
        }
    }
}

impl std::error::Error for ConductorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConductorError::Http(e) => Some(e),
            ConductorError::Stream(e) => Some(e),
            ConductorError::Config(e) => Some(e),
            ConductorError::ServerError { .. } => None,
        }
    }
}

impl From<reqwest::Error> for ConductorError {
    fn from(e: reqwest::Error) -> Self {
        ConductorError::Http(e)
    }
}

impl From<StreamError> for ConductorError {
    fn from(e: StreamError) -> Self {
        ConductorError::Stream(e)
    }
}

impl From<ConfigError> for ConductorError {
    fn from(e: ConfigError) -> Self {
        ConductorError::Config(e)
    }
}

/// Client for the Conductor streaming API.
pub struct ConductorClient {
    config: StreamConfig,
    /// Reusable HTTP client
    client: Client,
}

impl ConductorClient {
    /// Create a client from a config.
    pub fn new(config: StreamConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Create a client for `base_url` with otherwise default settings.
    pub fn with_url(base_url: &str) -> Self {
        Self::new(StreamConfig::new().with_base_url(base_url))
    }

    /// Get the active configuration.
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Stream a conversation response from the Conductor API.
    ///
    /// Sends a POST request to the configured stream endpoint and returns
    /// the lazily decoded event stream. The connection stays open until the
    /// stream ends or is dropped.
    ///
    /// # Errors
    /// - [`ConductorError::Http`] if the request could not be sent
    /// - [`ConductorError::ServerError`] on a non-2xx status
    /// - [`ConductorError::Stream`] with [`StreamError::NoStream`] when the
    ///   response has no body
    pub async fn stream(&self, request: &StreamRequest) -> Result<EventStream, ConductorError> {
        let url = self.config.stream_url();
        tracing::info!(url = %url, session_id = %request.session_id, "Opening event stream");

        let mut builder = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "text/event-stream")
            .json(request);
        if let Some(token) = &self.config.auth_token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        for (name, value) in &self.config.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ConductorError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        let has_body = status != StatusCode::NO_CONTENT && response.content_length() != Some(0);
        let source = has_body.then(|| {
            StreamSource::new(response.bytes_stream()).with_read_timeout(self.config.read_timeout)
        });

        Ok(read_events(source)?)
    }
}

impl Default for ConductorClient {
    fn default() -> Self {
        Self::new(StreamConfig::default())
    }
}
