//! Ledger test doubles.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::TradeRecord;
use crate::error::{Error, Result};
use crate::port::TradeLedger;

/// Ledger kept in memory; clones share entries.
#[derive(Clone, Default)]
pub struct MemoryLedger {
    records: Arc<Mutex<Vec<TradeRecord>>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<TradeRecord> {
        self.records.lock().clone()
    }

    /// Entries rendered exactly as the file ledger writes them.
    pub fn lines(&self) -> Vec<String> {
        self.records.lock().iter().map(TradeRecord::ledger_line).collect()
    }
}

impl TradeLedger for MemoryLedger {
    fn append(&self, record: &TradeRecord) -> Result<()> {
        self.records.lock().push(record.clone());
        Ok(())
    }
}

/// Ledger whose storage is always unavailable.
#[derive(Clone, Copy, Default)]
pub struct FailingLedger;

impl TradeLedger for FailingLedger {
    fn append(&self, _record: &TradeRecord) -> Result<()> {
        Err(Error::Io(std::io::Error::other("disk full")))
    }
}
