//! CLI configuration.
//!
//! Loaded from the environment; command-line flags override it.

use anyhow::{Context, Result};
use uproto_id::Scheme;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// CLI configuration (env-driven).
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level used when `RUST_LOG` is unset (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log line format on stderr.
    pub log_format: LogFormat,

    /// Identifier scheme used by `id new` when `--scheme` is not given.
    pub id_scheme: Scheme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_format: LogFormat::Compact,
            id_scheme: Scheme::UProtocol,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let log_level = lookup("UPROTO_LOG_LEVEL").unwrap_or(defaults.log_level);

        let log_format = match lookup("UPROTO_LOG_FORMAT").as_deref() {
            None | Some("compact") => LogFormat::Compact,
            Some("json") => LogFormat::Json,
            Some(other) => anyhow::bail!(
                "UPROTO_LOG_FORMAT must be 'compact' or 'json', got '{other}'."
            ),
        };

        let id_scheme = lookup("UPROTO_ID_SCHEME")
            .map(|v| v.parse::<Scheme>())
            .transpose()
            .map_err(anyhow::Error::msg)
            .context("UPROTO_ID_SCHEME must be 'uprotocol' or 'v6'.")?
            .unwrap_or(defaults.id_scheme);

        Ok(Self {
            log_level,
            log_format,
            id_scheme,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_format, LogFormat::Compact);
        assert_eq!(config.id_scheme, Scheme::UProtocol);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("UPROTO_LOG_LEVEL", "debug"),
            ("UPROTO_LOG_FORMAT", "json"),
            ("UPROTO_ID_SCHEME", "v6"),
        ]))
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.id_scheme, Scheme::TimeOrdered);
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::from_lookup(lookup_from(&[("UPROTO_LOG_FORMAT", "xml")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("UPROTO_ID_SCHEME", "v4")])).is_err());
    }
}
