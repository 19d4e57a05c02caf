//! Command-line argument parsing for the spoq-stream CLI.

use std::path::PathBuf;
use thiserror::Error;

use crate::cli_output::OutputFormat;

/// Usage text printed by `--help` and on argument errors.
pub const USAGE: &str = "\
Usage: spoq-stream [OPTIONS] <PROMPT>...

Send a prompt to the conductor and print the streamed events.

Options:
  --url <URL>        Conductor base URL (env: SPOQ_STREAM_URL)
  --token <TOKEN>    Bearer token (env: SPOQ_STREAM_TOKEN)
  --thread <ID>      Continue an existing thread
  --config <PATH>    Config file to load instead of the default
  --json             Print one JSON object per event
  --no-color         Disable colored output
  --new-session      Start a new session instead of reusing the stored one
  -V, --version      Print version
  -h, --help         Print help";

/// Options for streaming a prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamArgs {
    /// Prompt words joined with spaces
    pub prompt: String,
    pub url: Option<String>,
    pub token: Option<String>,
    pub thread_id: Option<String>,
    pub config_path: Option<PathBuf>,
    pub format: OutputFormat,
    pub color: bool,
    pub new_session: bool,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Stream a prompt
    Stream(StreamArgs),
}

/// Argument errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("unknown option: {0}")]
    UnknownOption(String),
    #[error("no prompt given")]
    MissingPrompt,
}

/// Parse command-line arguments and return the command to run.
///
/// # Arguments
///
/// * `args` - Iterator of command-line arguments (typically `std::env::args()`)
///
/// # Examples
///
/// ```
/// use spoq_stream::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["spoq-stream".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut url = None;
    let mut token = None;
    let mut thread_id = None;
    let mut config_path = None;
    let mut format = OutputFormat::Pretty;
    let mut color = true;
    let mut new_session = false;
    let mut words = Vec::new();

    // Skip the program name
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--url" => url = Some(take_value(&mut args, &arg)?),
            "--token" => token = Some(take_value(&mut args, &arg)?),
            "--thread" => thread_id = Some(take_value(&mut args, &arg)?),
            "--config" => config_path = Some(PathBuf::from(take_value(&mut args, &arg)?)),
            "--json" => format = OutputFormat::JsonLines,
            "--no-color" => color = false,
            "--new-session" => new_session = true,
            "--" => {
                words.extend(args.by_ref());
            }
            other if other.starts_with("--") => {
                return Err(ArgsError::UnknownOption(other.to_string()));
            }
            _ => words.push(arg),
        }
    }

    if words.is_empty() {
        return Err(ArgsError::MissingPrompt);
    }

    Ok(CliCommand::Stream(StreamArgs {
        prompt: words.join(" "),
        url,
        token,
        thread_id,
        config_path,
        format,
        color,
        new_session,
    }))
}

fn take_value<I>(args: &mut I, flag: &str) -> Result<String, ArgsError>
where
    I: Iterator<Item = String>,
{
    args.next()
        .ok_or_else(|| ArgsError::MissingValue(flag.to_string()))
}
