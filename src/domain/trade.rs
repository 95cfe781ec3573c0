//! Winning-trade records written to the ledger.

use std::borrow::Cow;
use std::fmt;

use super::event::SolvedOrder;

/// One ledger entry.
///
/// Once appended a record is never rewritten or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeRecord {
    pub timestamp: String,
    pub order_id: String,
    pub sell_token: String,
    pub sell_amount: String,
    pub buy_token: String,
    pub buy_amount: String,
}

impl From<SolvedOrder> for TradeRecord {
    fn from(order: SolvedOrder) -> Self {
        Self {
            timestamp: order.timestamp,
            order_id: order.order_id,
            sell_token: order.sell_token,
            sell_amount: order.sell_amount,
            buy_token: order.buy_token,
            buy_amount: order.buy_amount,
        }
    }
}

impl TradeRecord {
    /// The single ledger line for this record, without a trailing newline.
    #[must_use]
    pub fn ledger_line(&self) -> String {
        self.to_string()
    }
}

/// Replace whitespace and control characters so a value stays one token.
fn token(value: &str) -> Cow<'_, str> {
    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        Cow::Owned(
            value
                .chars()
                .map(|c| if c.is_whitespace() || c.is_control() { '_' } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(value)
    }
}

impl fmt::Display for TradeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} TRADE uid={} sell={} amt={} buy={} amt={}",
            token(&self.timestamp),
            token(&self.order_id),
            token(&self.sell_token),
            token(&self.sell_amount),
            token(&self.buy_token),
            token(&self.buy_amount)
        )
    }
}
