//! CLI commands.

mod id;
mod uri;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::output::OutputFormat;

/// uprotoctl - Inspect and convert uProtocol addresses and identifiers.
#[derive(Debug, Parser)]
#[command(name = "uprotoctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Decode, encode, and classify addresses.
    Uri(uri::UriCommand),

    /// Generate and inspect identifiers.
    Id(id::IdCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Run the CLI command.
    pub fn run(self, config: Config) -> Result<()> {
        let ctx = CommandContext {
            config,
            format: self.format,
        };

        match self.command {
            Commands::Uri(cmd) => cmd.run(&ctx),
            Commands::Id(cmd) => cmd.run(&ctx),
            Commands::Version => {
                println!("uprotoctl {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub config: Config,
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uri_parse() {
        let cli =
            Cli::try_parse_from(["uprotoctl", "uri", "parse", "/body.access/1/door"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(matches!(cli.command, Commands::Uri(_)));
    }

    #[test]
    fn test_parse_global_format() {
        let cli = Cli::try_parse_from(["uprotoctl", "id", "new", "--format", "json"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["uprotoctl", "--format", "yaml", "version"]).is_err());
    }

    #[test]
    fn test_run_version() {
        let cli = Cli::try_parse_from(["uprotoctl", "version"]).unwrap();
        assert!(cli.run(Config::default()).is_ok());
    }
}
