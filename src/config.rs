//! Client configuration.
//!
//! Settings are layered: built-in defaults, then the JSON config file, then
//! environment variables, then whatever the caller sets with the builder
//! methods (the CLI applies its flags last).

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default conductor base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default path of the streaming endpoint.
pub const DEFAULT_STREAM_PATH: &str = "/v1/stream";

/// Environment variable overriding the base URL.
pub const ENV_URL: &str = "SPOQ_STREAM_URL";

/// Environment variable providing the bearer token.
pub const ENV_TOKEN: &str = "SPOQ_STREAM_TOKEN";

const APP_DIR: &str = "spoq-stream";
const CONFIG_FILE: &str = "config.json";

/// Errors loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid config JSON.
    #[error("Invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk shape of the config file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    base_url: Option<String>,
    stream_path: Option<String>,
    auth_token: Option<String>,
    read_timeout_secs: Option<u64>,
    headers: BTreeMap<String, String>,
}

/// Configuration for opening event streams.
///
/// # Example
///
/// ```ignore
/// use spoq_stream::config::StreamConfig;
///
/// let config = StreamConfig::load(None)?
///     .with_base_url("http://localhost:9000")
///     .with_auth_token("secret");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StreamConfig {
    /// Conductor base URL (default: http://localhost:8000)
    pub base_url: String,
    /// Path of the streaming endpoint (default: /v1/stream)
    pub stream_path: String,
    /// Bearer token sent as `Authorization`
    pub auth_token: Option<String>,
    /// Abort the body if no data arrives for this long (default: none)
    pub read_timeout: Option<Duration>,
    /// Extra request headers
    pub headers: BTreeMap<String, String>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            stream_path: DEFAULT_STREAM_PATH.to_string(),
            auth_token: None,
            read_timeout: None,
            headers: BTreeMap::new(),
        }
    }
}

impl StreamConfig {
    /// Create a StreamConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location of the config file, if a config dir exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load defaults, the config file and environment overrides.
    ///
    /// `path` overrides the default file location. A missing file is not an
    /// error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(Path::to_path_buf).or_else(Self::default_path);
        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Load defaults overlaid with a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(?path, "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let file: ConfigFile =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(?path, "Loaded config file");

        let mut config = Self::default();
        if let Some(base_url) = file.base_url {
            config.base_url = base_url;
        }
        if let Some(stream_path) = file.stream_path {
            config.stream_path = stream_path;
        }
        config.auth_token = file.auth_token;
        config.read_timeout = file.read_timeout_secs.map(Duration::from_secs);
        config.headers = file.headers;
        Ok(config)
    }

    /// Apply `SPOQ_STREAM_URL` and `SPOQ_STREAM_TOKEN` when set and non-empty.
    pub fn apply_env(&mut self) {
        if let Some(url) = non_empty_env(ENV_URL) {
            self.base_url = url;
        }
        if let Some(token) = non_empty_env(ENV_TOKEN) {
            self.auth_token = Some(token);
        }
    }

    /// Full URL of the streaming endpoint.
    pub fn stream_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.stream_path.trim_start_matches('/')
        )
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the streaming endpoint path.
    pub fn with_stream_path(mut self, stream_path: impl Into<String>) -> Self {
        self.stream_path = stream_path.into();
        self
    }

    /// Set the bearer token.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Set the body read timeout.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Add an extra request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
