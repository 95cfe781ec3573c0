//! Log source port.
//!
//! A [`LogSource`] produces raw lines either once (backfill) or forever
//! (follow). Lines are pushed into a [`LineSink`] in arrival order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;

/// Receiver of raw log lines.
pub trait LineSink: Send + Sync {
    fn accept(&self, line: &str);
}

/// Where a follow should start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Skip everything already present.
    End,
    /// Byte offset into a file.
    Offset(u64),
    /// Wall-clock position, for sources that can only seek by time.
    Since(DateTime<Utc>),
}

/// Trait for log stream providers.
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Feed all currently available lines to `sink`, then return the
    /// position where a follow can pick up.
    async fn backfill(&self, sink: &dyn LineSink) -> Result<Cursor>;

    /// Feed new lines to `sink` as they appear. Only returns on a fatal
    /// source error.
    async fn follow(&self, from: Cursor, sink: &dyn LineSink) -> Result<()>;

    /// Human-readable description for logs.
    fn describe(&self) -> String;
}
