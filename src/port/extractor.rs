//! Field extraction port.
//!
//! Pulls named values out of a single log line. The strategy (regex over
//! text, JSON lookup, ...) is swappable without touching the pipeline.

use crate::domain::{UNKNOWN_AMOUNT, UNKNOWN_FIELD};

/// Structured fields carried by solver log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Timestamp,
    OrderUid,
    SellToken,
    BuyToken,
    SellAmount,
    BuyAmount,
    NumSolutions,
}

impl Field {
    /// Key the field is logged under.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::OrderUid => "order_uid",
            Self::SellToken => "sell_token",
            Self::BuyToken => "buy_token",
            Self::SellAmount => "sell_amount",
            Self::BuyAmount => "buy_amount",
            Self::NumSolutions => "num_solutions",
        }
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::SellAmount | Self::BuyAmount | Self::NumSolutions
        )
    }

    /// Value substituted when the field cannot be extracted.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        if self.is_numeric() {
            UNKNOWN_AMOUNT
        } else {
            UNKNOWN_FIELD
        }
    }
}

/// Extraction strategy for one log line format.
///
/// Each field is looked up independently; `None` means the field is absent
/// or malformed and the caller substitutes [`Field::placeholder`].
pub trait FieldExtractor: Send + Sync {
    fn extract(&self, line: &str, field: Field) -> Option<String>;

    /// Extract a field or fall back to its placeholder.
    fn extract_or_placeholder(&self, line: &str, field: Field) -> String {
        self.extract(line, field)
            .unwrap_or_else(|| field.placeholder().to_string())
    }

    /// Short name for logs.
    fn name(&self) -> &'static str;
}
