//! Error handling and display for the CLI.

use colored::Colorize;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Could not decode {form} uri: {input}")]
    InvalidUri { form: &'static str, input: String },

    #[error("Address cannot be written in {form} form: {reason}")]
    NotEncodable { form: &'static str, reason: String },

    #[error("Long and micro forms do not describe one resolved address")]
    Unresolvable,

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(#[from] uproto_id::IdError),
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        match cli_err {
            CliError::InvalidUri { form: "micro", .. } => {
                eprintln!(
                    "\n{}",
                    "Hint: micro uris are hex encoded, e.g. 0100271a0003fe00.".yellow()
                );
            }
            CliError::InvalidUri { .. } => {
                eprintln!(
                    "\n{}",
                    "Hint: long uris look like //authority/entity/1/resource.instance#Message."
                        .yellow()
                );
            }
            CliError::Unresolvable => {
                eprintln!(
                    "\n{}",
                    "Hint: pass names in the long form and ids in the micro form of one address."
                        .yellow()
                );
            }
            _ => {}
        }
    }

    for cause in err.chain().skip(1) {
        eprintln!("  {} {}", "Caused by:".dimmed(), cause);
    }
}
