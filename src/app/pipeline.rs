//! Per-line processing shared by backfill and follow.
//!
//! classify → stats apply → (solved orders) ledger append + alert broadcast.
//! Nothing in here can stop the loop: ledger and notifier failures are
//! logged and the next line is processed as usual.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, info};

use super::classifier::classify;
use crate::domain::{Event, Stats, TradeRecord};
use crate::port::{Alert, FieldExtractor, LineSink, NotifierRegistry, StatusDisplay, TradeLedger};

/// Shared, mutex-guarded counters.
pub type SharedStats = Arc<Mutex<Stats>>;

pub struct Pipeline {
    extractor: Arc<dyn FieldExtractor>,
    ledger: Arc<dyn TradeLedger>,
    notifiers: Arc<NotifierRegistry>,
    stats: SharedStats,
    status: Option<Arc<dyn StatusDisplay>>,
}

impl Pipeline {
    pub fn new(
        extractor: Arc<dyn FieldExtractor>,
        ledger: Arc<dyn TradeLedger>,
        notifiers: Arc<NotifierRegistry>,
    ) -> Self {
        Self {
            extractor,
            ledger,
            notifiers,
            stats: Arc::new(Mutex::new(Stats::new())),
            status: None,
        }
    }

    /// Refresh `status` with the running counters after every line.
    #[must_use]
    pub fn with_status(mut self, status: Arc<dyn StatusDisplay>) -> Self {
        self.status = Some(status);
        self
    }

    /// Handle to the counters for readers on other tasks.
    #[must_use]
    pub fn stats(&self) -> SharedStats {
        Arc::clone(&self.stats)
    }

    #[must_use]
    pub fn snapshot(&self) -> Stats {
        self.stats.lock().snapshot()
    }

    #[must_use]
    pub fn notifiers(&self) -> Arc<NotifierRegistry> {
        Arc::clone(&self.notifiers)
    }

    /// Process one raw line and return the event it produced.
    pub fn process_line(&self, line: &str) -> Event {
        let event = classify(line, self.extractor.as_ref());
        if !event.is_recognized() {
            return event;
        }

        let totals = {
            let mut stats = self.stats.lock();
            stats.apply(&event);
            stats.snapshot()
        };
        debug!(kind = event.kind(), "Classified line");

        if let Event::OrderSolved(order) = &event {
            self.record_trade(TradeRecord::from(order.clone()));
        }

        if let Some(status) = &self.status {
            status.update(&totals);
        }
        event
    }

    fn record_trade(&self, record: TradeRecord) {
        if let Err(e) = self.ledger.append(&record) {
            error!(order_uid = %record.order_id, error = %e, "Failed to append trade to ledger");
        } else {
            info!(order_uid = %record.order_id, "Trade recorded");
        }
        self.notifiers.broadcast(&Alert::Trade(record));
    }
}

impl LineSink for Pipeline {
    fn accept(&self, line: &str) {
        self.process_line(line);
    }
}
