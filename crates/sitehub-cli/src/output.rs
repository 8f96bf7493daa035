//! Terminal output for CLI commands: tables for people, JSON for scripts.

use serde::Serialize;
use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print rows as a table, or as a JSON array.
pub fn print_list<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table if rows.is_empty() => println!("No results found."),
        OutputFormat::Table => {
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            println!("{table}");
            println!("{} row(s)", rows.len());
        }
        OutputFormat::Json => print_json(&rows),
    }
}

/// Print one value as a two-column `field | value` table, or as JSON.
pub fn print_item<T: Serialize>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            let value = serde_json::to_value(item).unwrap_or(Value::Null);
            let mut builder = Builder::default();
            builder.push_record(["field", "value"]);
            for (key, val) in flatten(&value) {
                builder.push_record([key, val]);
            }
            let mut table = builder.build();
            table.with(Style::rounded());
            println!("{table}");
        }
        OutputFormat::Json => print_json(item),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => print_error(&format!("Failed to render JSON: {e}")),
    }
}

/// Flatten nested objects into dotted keys. Arrays and scalars are leaves.
fn flatten(value: &Value) -> Vec<(String, String)> {
    fn walk(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    walk(&path, child, out);
                }
            }
            Value::String(s) => out.push((prefix.to_string(), s.clone())),
            Value::Null => out.push((prefix.to_string(), "-".to_string())),
            other => out.push((prefix.to_string(), other.to_string())),
        }
    }

    let mut out = Vec::new();
    walk("", value, &mut out);
    out
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Print an aligned `key: value` line.
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {value}", format!("{key}:"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_nested_object() {
        let value = serde_json::json!({
            "server": { "port": 8080, "cors": { "allowed_origins": ["*"] } },
            "logging": { "format": "json" },
            "missing": null,
        });
        let rows = flatten(&value);
        assert!(rows.contains(&("server.port".to_string(), "8080".to_string())));
        assert!(rows.contains(&(
            "server.cors.allowed_origins".to_string(),
            "[\"*\"]".to_string()
        )));
        assert!(rows.contains(&("logging.format".to_string(), "json".to_string())));
        assert!(rows.contains(&("missing".to_string(), "-".to_string())));
    }
}
