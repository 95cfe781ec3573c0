//! Field lookup over `tracing-subscriber` JSON output.
//!
//! Event fields live under `fields`; the timestamp is top-level. Lines that
//! are not JSON objects yield nothing.

use serde_json::Value;

use crate::port::{Field, FieldExtractor};

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExtractor;

impl JsonExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn lookup<'a>(root: &'a Value, field: Field) -> Option<&'a Value> {
    if field == Field::Timestamp {
        return root.get("timestamp");
    }
    root.get("fields")
        .and_then(|fields| fields.get(field.key()))
        .or_else(|| root.get(field.key()))
}

fn render(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn unwrap_token_address(raw: &str) -> &str {
    raw.strip_prefix("TokenAddress(")
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(raw)
}

impl FieldExtractor for JsonExtractor {
    fn extract(&self, line: &str, field: Field) -> Option<String> {
        let trimmed = line.trim();
        if !trimmed.starts_with('{') {
            return None;
        }
        let root: Value = serde_json::from_str(trimmed).ok()?;
        let raw = render(lookup(&root, field)?)?;

        let value = match field {
            Field::SellToken | Field::BuyToken => unwrap_token_address(&raw).to_string(),
            _ => raw,
        };

        if value.is_empty() || value.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return None;
        }
        if field.is_numeric() && !value.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(value)
    }

    fn name(&self) -> &'static str {
        "json"
    }
}
