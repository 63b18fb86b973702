use std::io::{self, IsTerminal};

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Logs go to stderr so stdout only ever carries
/// the extracted text. `RUST_LOG` wins over `level` when set.
pub fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install log subscriber: {err}"))?;

    Ok(())
}
