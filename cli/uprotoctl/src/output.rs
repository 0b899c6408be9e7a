//! Output formatting for CLI commands.

use colored::Colorize;
use serde::Serialize;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable `key: value` lines.
    #[default]
    Text,
    /// JSON format.
    Json,
}

/// A labelled value for text output.
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

impl Field {
    pub fn new(label: &'static str, value: impl ToString) -> Self {
        Self {
            label,
            value: value.to_string(),
        }
    }

    /// A field whose absent value prints as `-`.
    pub fn optional(label: &'static str, value: Option<impl ToString>) -> Self {
        Self {
            label,
            value: value.map_or_else(|| "-".to_string(), |v| v.to_string()),
        }
    }
}

/// Print `data` as JSON, or `fields` as aligned text.
pub fn print_view<T: Serialize>(data: &T, fields: &[Field], format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", format_json(data)),
        OutputFormat::Text => println!("{}", format_fields(fields)),
    }
}

/// Print a list of plain values, one per line, or as a JSON array.
pub fn print_list<T: Serialize + std::fmt::Display>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", format_json(&items)),
        OutputFormat::Text => {
            for item in items {
                println!("{item}");
            }
        }
    }
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "Valid:".green().bold(), message);
}

/// Print a failure message without failing the command.
pub fn print_failure(message: &str) {
    println!("{} {}", "Invalid:".red().bold(), message);
}

fn format_json<T: Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
}

fn format_fields(fields: &[Field]) -> String {
    let width = fields.iter().map(|f| f.label.len()).max().unwrap_or(0);
    fields
        .iter()
        .map(|f| format!("{:width$}  {}", format!("{}:", f.label), f.value, width = width + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fields_aligns_labels() {
        let text = format_fields(&[
            Field::new("long", "/a/1"),
            Field::optional("micro", None::<String>),
        ]);
        assert_eq!(text, "long:   /a/1\nmicro:  -");
    }

    #[test]
    fn test_format_json() {
        assert_eq!(format_json(&serde_json::json!({"a": 1})), "{\n  \"a\": 1\n}");
    }
}
