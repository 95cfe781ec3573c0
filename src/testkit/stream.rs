//! Scripted [`LogSource`] for driver tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::port::{Cursor, LineSink, LogSource};

/// A source that replays fixed line lists.
///
/// `backfill` replays the history and returns `Cursor::Offset(n)` where `n`
/// is the number of history lines. `follow` replays the live lines and
/// returns, so tests finish. Cursors passed to `follow` are recorded.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    history: Vec<String>,
    live: Vec<String>,
    fail_backfill: bool,
    follow_cursors: Arc<Mutex<Vec<Cursor>>>,
    backfill_calls: Arc<AtomicUsize>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.history = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_live<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.live = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Make `backfill` return an error.
    pub fn failing_backfill(mut self) -> Self {
        self.fail_backfill = true;
        self
    }

    pub fn follow_cursors(&self) -> Vec<Cursor> {
        self.follow_cursors.lock().clone()
    }

    pub fn backfill_calls(&self) -> usize {
        self.backfill_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LogSource for ScriptedSource {
    async fn backfill(&self, sink: &dyn LineSink) -> Result<Cursor> {
        self.backfill_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_backfill {
            return Err(Error::Source("scripted backfill failure".into()));
        }
        for line in &self.history {
            sink.accept(line);
        }
        Ok(Cursor::Offset(self.history.len() as u64))
    }

    async fn follow(&self, from: Cursor, sink: &dyn LineSink) -> Result<()> {
        self.follow_cursors.lock().push(from);
        for line in &self.live {
            sink.accept(line);
        }
        Ok(())
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}
