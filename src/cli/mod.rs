//! CLI module for spoq-stream.
//!
//! - Argument parsing
//! - Version display
//! - Streaming a prompt to stdout
//!
//! # Usage
//!
//! ```ignore
//! use spoq_stream::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args())?;
//! runtime.block_on(run_cli_command(command))?;
//! ```

pub mod args;
pub mod stream;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand, StreamArgs, USAGE};
pub use stream::handle_stream_command;
pub use version::{handle_version_command, VERSION};

use color_eyre::Result;

/// Run a parsed CLI command.
///
/// # Note
///
/// The `Version` command never returns as it calls `std::process::exit(0)`.
pub async fn run_cli_command(command: CliCommand) -> Result<()> {
    match command {
        CliCommand::Version => handle_version_command(),
        CliCommand::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        CliCommand::Stream(args) => handle_stream_command(args).await,
    }
}
