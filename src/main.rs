use spoq_stream::cli::{parse_args, run_cli_command, USAGE};

use color_eyre::Result;
use tracing_subscriber::EnvFilter;

/// Environment variable controlling log output (e.g. `SPOQ_STREAM_LOG=debug`).
const LOG_ENV: &str = "SPOQ_STREAM_LOG";

/// Send logs to stderr so stdout carries only events.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_cli_command(command))
}
