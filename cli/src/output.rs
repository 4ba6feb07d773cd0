//! Output formatting

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn print<T: Serialize>(&self, data: &T) {
        match self {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
            OutputFormat::Yaml => {
                println!("{}", serde_yaml::to_string(data).unwrap_or_default());
            }
            OutputFormat::Table => {
                let value = serde_json::to_value(data).unwrap_or(Value::Null);
                println!("{}", render_table(&value));
            }
        }
    }

    /// Print a status line (table mode only, structured formats stay parseable)
    pub fn notice(&self, message: &str) {
        if *self == OutputFormat::Table {
            println!("{}", message.bold());
        }
    }
}

/// Render a JSON value as `key: value` lines; nested objects use dotted keys
/// and arrays are separated by blank lines.
pub fn render_table(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(render_table)
            .collect::<Vec<_>>()
            .join("\n\n"),
        Value::Object(_) => {
            let mut rows = Vec::new();
            flatten("", value, &mut rows);
            let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
            rows.iter()
                .map(|(k, v)| format!("{:width$}  {}", k, v, width = width))
                .collect::<Vec<_>>()
                .join("\n")
        }
        other => scalar(other),
    }
}

fn flatten(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, inner) in map {
                let key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten(&key, inner, rows);
            }
        }
        Value::Array(items) => {
            let joined = items.iter().map(scalar).collect::<Vec<_>>().join(", ");
            rows.push((prefix.to_string(), joined));
        }
        other => rows.push((prefix.to_string(), scalar(other))),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => "-".into(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_object() {
        let table = render_table(&json!({
            "tier": "free",
            "resources": { "daily_cap": 25 },
            "expires": null
        }));
        assert!(table.contains("tier"));
        assert!(table.contains("resources.daily_cap  25"));
        assert!(table.contains("expires"));
        assert!(table.lines().any(|l| l.trim_end().ends_with('-')));
    }

    #[test]
    fn test_render_array_of_rows() {
        let table = render_table(&json!([
            { "date": "2024-01-02", "read_mb": 1.0 },
            { "date": "2024-01-01", "read_mb": 0.5 }
        ]));
        assert_eq!(table.split("\n\n").count(), 2);
        assert!(table.starts_with("date"));
    }

    #[test]
    fn test_render_scalar_list() {
        let table = render_table(&json!({ "first": [1, 2, 3] }));
        assert_eq!(table, "first  1, 2, 3");
    }
}
