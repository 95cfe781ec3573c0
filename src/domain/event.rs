//! Typed events recognized in solver log lines.
//!
//! An [`Event`] is produced per line by the classifier and consumed
//! immediately by the pipeline. Nothing here is stored beyond the line
//! being processed.

/// Placeholder for identifier, address and timestamp fields that could not
/// be extracted from a line.
pub const UNKNOWN_FIELD: &str = "???";

/// Placeholder for numeric fields that could not be extracted from a line.
pub const UNKNOWN_AMOUNT: &str = "0";

/// One classified log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The solver finished an auction and reported how many solutions it found.
    AuctionCompleted {
        /// Value of `num_solutions`, or 0 when absent or unparsable.
        solution_count: u64,
    },
    /// The solver started working on an LP order.
    OrderProcessed,
    /// The solver gave up on an order.
    OrderFailed,
    /// The solver produced a solution for an order.
    OrderSolved(SolvedOrder),
    /// Line matched no known signature.
    Unrecognized,
}

impl Event {
    /// Short machine-friendly label used in structured logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AuctionCompleted { .. } => "auction_completed",
            Self::OrderProcessed => "order_processed",
            Self::OrderFailed => "order_failed",
            Self::OrderSolved(_) => "order_solved",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Returns true for every kind except [`Event::Unrecognized`].
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized)
    }
}

/// Fields of a solved order as they appeared in the log.
///
/// Values are kept as text: addresses are opaque and amounts are uint256
/// values that only ever get printed. Missing fields hold
/// [`UNKNOWN_FIELD`] or [`UNKNOWN_AMOUNT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolvedOrder {
    pub order_id: String,
    pub sell_token: String,
    pub buy_token: String,
    pub sell_amount: String,
    pub buy_amount: String,
    pub timestamp: String,
}

impl Default for SolvedOrder {
    fn default() -> Self {
        Self {
            order_id: UNKNOWN_FIELD.to_string(),
            sell_token: UNKNOWN_FIELD.to_string(),
            buy_token: UNKNOWN_FIELD.to_string(),
            sell_amount: UNKNOWN_AMOUNT.to_string(),
            buy_amount: UNKNOWN_AMOUNT.to_string(),
            timestamp: UNKNOWN_FIELD.to_string(),
        }
    }
}
