//! Identifier commands.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;
use tracing::info;
use uproto_id::{
    get_elapsed_time, get_remaining_time, get_time, get_variant, get_version, is_expired,
    validate, Identifier, Scheme,
};

use crate::error::CliError;
use crate::output::{print_failure, print_list, print_success, print_view, Field, OutputFormat};

use super::CommandContext;

/// Generate and inspect identifiers.
#[derive(Debug, Args)]
pub struct IdCommand {
    #[command(subcommand)]
    command: IdSubcommand,
}

#[derive(Debug, Subcommand)]
enum IdSubcommand {
    /// Generate identifiers.
    New {
        /// Identifier scheme (uprotocol or v6); defaults to UPROTO_ID_SCHEME.
        #[arg(long, value_parser = parse_scheme)]
        scheme: Option<Scheme>,

        /// Number of identifiers to generate.
        #[arg(long, default_value_t = 1)]
        count: usize,
    },

    /// Show version, variant, creation time, and expiry of an identifier.
    Inspect {
        /// Hyphenated identifier.
        id: String,

        /// Time-to-live in milliseconds.
        #[arg(long)]
        ttl: Option<i64>,
    },
}

fn parse_scheme(s: &str) -> Result<Scheme, String> {
    s.parse()
}

impl IdCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        match self.command {
            IdSubcommand::New { scheme, count } => {
                let scheme = scheme.unwrap_or(ctx.config.id_scheme);
                let ids = generate(scheme, count);
                info!(%scheme, count, "generated identifiers");
                print_list(&ids, ctx.format);
                Ok(())
            }
            IdSubcommand::Inspect { id, ttl } => {
                let id = Identifier::parse(&id).map_err(CliError::from)?;
                let view = IdView::new(id, ttl);
                print_view(&view, &view.fields(), ctx.format);
                if ctx.format == OutputFormat::Text {
                    match &view.validation {
                        None => print_success("identifier is well formed"),
                        Some(message) => print_failure(message),
                    }
                }
                Ok(())
            }
        }
    }
}

fn generate(scheme: Scheme, count: usize) -> Vec<Identifier> {
    let factory = scheme.factory();
    (0..count).map(|_| factory.create_now()).collect()
}

#[derive(Debug, Serialize)]
struct IdView {
    id: Identifier,
    version: String,
    variant: String,
    time_ms: Option<i64>,
    created_at: Option<DateTime<Utc>>,
    elapsed_ms: Option<i64>,
    ttl_ms: Option<i64>,
    remaining_ms: Option<i64>,
    expired: Option<bool>,
    validation: Option<String>,
}

impl IdView {
    fn new(id: Identifier, ttl: Option<i64>) -> Self {
        let time_ms = get_time(&id);
        Self {
            id,
            version: get_version(&id).to_string(),
            variant: format!("{:?}", get_variant(&id)),
            time_ms,
            created_at: time_ms.and_then(DateTime::from_timestamp_millis),
            elapsed_ms: get_elapsed_time(&id),
            ttl_ms: ttl,
            remaining_ms: ttl.and_then(|ttl| get_remaining_time(&id, ttl)),
            expired: ttl.map(|ttl| is_expired(&id, ttl)),
            validation: validate(&id).err().map(|e| e.to_string()),
        }
    }

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::new("id", self.id),
            Field::new("version", &self.version),
            Field::new("variant", &self.variant),
            Field::optional("created", self.created_at.map(|t| t.to_rfc3339())),
            Field::optional("elapsed ms", self.elapsed_ms),
            Field::optional("ttl ms", self.ttl_ms),
            Field::optional("remaining ms", self.remaining_ms),
            Field::optional("expired", self.expired),
        ]
    }
}

#[cfg(test)]
mod tests {
    use uproto_id::{is_uprotocol, is_uuidv6};

    use super::*;

    #[test]
    fn test_generate_count_and_scheme() {
        let ids = generate(Scheme::UProtocol, 3);
        assert_eq!(ids.len(), 3);
        assert!(ids.iter().all(is_uprotocol));
        assert!(ids.windows(2).all(|w| w[0] < w[1]));

        let ids = generate(Scheme::TimeOrdered, 2);
        assert!(ids.iter().all(is_uuidv6));
    }

    #[test]
    fn test_view_of_fresh_identifier() {
        let id = generate(Scheme::UProtocol, 1)[0];
        let view = IdView::new(id, Some(60_000));
        assert_eq!(view.version, "uprotocol (8)");
        assert_eq!(view.expired, Some(false));
        assert!(view.created_at.is_some());
        assert!(view.validation.is_none());
    }

    #[test]
    fn test_view_of_unknown_identifier() {
        let view = IdView::new(Identifier::NIL, None);
        assert_eq!(view.time_ms, None);
        assert_eq!(view.expired, None);
        assert_eq!(
            view.validation.as_deref(),
            Some("Invalid UUID Version,Invalid UUID Time")
        );
    }

    #[test]
    fn test_parse_scheme_arg() {
        assert_eq!(parse_scheme("v6"), Ok(Scheme::TimeOrdered));
        assert!(parse_scheme("v1").is_err());
    }
}
