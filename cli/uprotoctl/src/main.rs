//! uprotoctl - offline inspection of uProtocol addresses and identifiers
//!
//! Decodes and encodes uris in their long, micro, and short forms, and
//! generates or inspects message identifiers.

use anyhow::Result;
use clap::Parser;
use tracing::debug;

mod commands;
mod config;
mod error;
mod logging;
mod output;

use commands::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::Config::from_env()?;
    logging::init(&config)?;

    debug!(
        log_level = %config.log_level,
        id_scheme = %config.id_scheme,
        "Configuration loaded"
    );

    if let Err(e) = cli.run(config) {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
