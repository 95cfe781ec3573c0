//! Trade ledger port.

use crate::domain::TradeRecord;
use crate::error::Result;

/// Durable, append-only store of winning trades.
///
/// Each successful `append` adds exactly one entry at the end. Entries are
/// never rewritten, reordered or removed, and no de-duplication happens.
pub trait TradeLedger: Send + Sync {
    fn append(&self, record: &TradeRecord) -> Result<()>;
}
