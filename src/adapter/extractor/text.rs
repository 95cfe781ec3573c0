//! Regex extraction over free-text `tracing` output.
//!
//! Handles lines like
//! `2024-01-01T00:00:00Z INFO solved order order_uid=0xabc sell_token=TokenAddress(0x..) sell_amount=1000`.
//! Terminal color escapes are removed before matching.

use std::borrow::Cow;

use regex::{Captures, Regex};

use crate::error::Result;
use crate::port::{Field, FieldExtractor};

/// One compiled pattern per field.
#[derive(Debug, Clone)]
pub struct RegexExtractor {
    ansi: Regex,
    timestamp: Regex,
    order_uid: Regex,
    sell_token: Regex,
    buy_token: Regex,
    sell_amount: Regex,
    buy_amount: Regex,
    num_solutions: Regex,
}

fn token_pattern(key: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(
        r#"\b{key}="?(?:TokenAddress\(([^)\s"]+)\)|([^\s,()"]+))"#
    ))?)
}

fn number_pattern(key: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(r#"\b{key}="?(\d+)\b"#))?)
}

/// First capture group that participated in the match.
fn first_group(caps: &Captures<'_>) -> Option<String> {
    caps.iter()
        .skip(1)
        .flatten()
        .map(|m| m.as_str())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

impl RegexExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            ansi: Regex::new(r"\x1b\[[0-9;]*[A-Za-z]")?,
            timestamp: Regex::new(r"^\s*(\d[^\s]*)")?,
            order_uid: Regex::new(r#"\border_uid="?([^\s,"]+)"#)?,
            sell_token: token_pattern("sell_token")?,
            buy_token: token_pattern("buy_token")?,
            sell_amount: number_pattern("sell_amount")?,
            buy_amount: number_pattern("buy_amount")?,
            num_solutions: number_pattern("num_solutions")?,
        })
    }

    fn pattern(&self, field: Field) -> &Regex {
        match field {
            Field::Timestamp => &self.timestamp,
            Field::OrderUid => &self.order_uid,
            Field::SellToken => &self.sell_token,
            Field::BuyToken => &self.buy_token,
            Field::SellAmount => &self.sell_amount,
            Field::BuyAmount => &self.buy_amount,
            Field::NumSolutions => &self.num_solutions,
        }
    }

    fn strip_ansi<'a>(&self, line: &'a str) -> Cow<'a, str> {
        if line.contains('\x1b') {
            self.ansi.replace_all(line, "")
        } else {
            Cow::Borrowed(line)
        }
    }
}

impl FieldExtractor for RegexExtractor {
    fn extract(&self, line: &str, field: Field) -> Option<String> {
        let line = self.strip_ansi(line);
        self.pattern(field)
            .captures(&line)
            .as_ref()
            .and_then(first_group)
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}
