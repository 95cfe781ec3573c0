//! Stream driver.
//!
//! One loop for every destination: lines go from the [`LogSource`] into the
//! [`Pipeline`], which fans out to the ledger and the notifier registry.
//! The cycle monitor is started once historical lines are done so that
//! backfilled events are not mistaken for fresh activity.

use std::sync::Arc;

use tracing::{info, warn};

use super::monitor::CycleMonitor;
use super::pipeline::Pipeline;
use crate::config::MonitorConfig;
use crate::error::Result;
use crate::port::{Cursor, LogSource};

/// How the driver treats content that already exists at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Process existing content once, then follow new lines.
    BackfillThenFollow,
    /// Skip existing content and follow new lines only.
    FollowOnly,
}

pub struct StreamDriver {
    source: Arc<dyn LogSource>,
    pipeline: Arc<Pipeline>,
    monitor: MonitorConfig,
}

impl StreamDriver {
    pub fn new(source: Arc<dyn LogSource>, pipeline: Arc<Pipeline>, monitor: MonitorConfig) -> Self {
        Self {
            source,
            pipeline,
            monitor,
        }
    }

    /// Run every currently available line through the pipeline once.
    pub async fn backfill(&self) -> Result<Cursor> {
        info!(source = %self.source.describe(), "Starting backfill");
        let cursor = self.source.backfill(self.pipeline.as_ref()).await?;
        let stats = self.pipeline.snapshot();
        info!(
            auctions = stats.auctions,
            orders = stats.orders,
            solutions = stats.solutions,
            errors = stats.errors,
            trades = stats.trades,
            "Backfill finished"
        );
        Ok(cursor)
    }

    /// Run until the source fails for good. Under normal operation this
    /// never returns.
    pub async fn run(&self, mode: RunMode) -> Result<()> {
        let cursor = match mode {
            RunMode::BackfillThenFollow => match self.backfill().await {
                Ok(cursor) => cursor,
                Err(e) => {
                    warn!(error = %e, "Backfill failed, following new lines only");
                    Cursor::End
                }
            },
            RunMode::FollowOnly => Cursor::End,
        };

        let monitor = CycleMonitor::new(
            self.pipeline.stats(),
            self.pipeline.notifiers(),
            self.monitor,
        );
        let monitor = tokio::spawn(monitor.run());

        info!(source = %self.source.describe(), "Following live log stream");
        let result = self.source.follow(cursor, self.pipeline.as_ref()).await;

        monitor.abort();
        result
    }
}
