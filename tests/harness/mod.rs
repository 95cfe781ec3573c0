//! Integration test harness.

#![allow(dead_code)]

pub mod temp_log;

use std::sync::Arc;
use std::time::Duration;

use solver_watch::adapter::extractor::RegexExtractor;
use solver_watch::app::Pipeline;
use solver_watch::port::{NotifierRegistry, TradeLedger};
use solver_watch::testkit::{MemoryLedger, RecordingNotifier};

pub use temp_log::TempLog;

/// Pipeline over the regex extractor with an in-memory ledger and one
/// recording notifier.
pub struct TestPipeline {
    pub pipeline: Arc<Pipeline>,
    pub ledger: MemoryLedger,
    pub notifier: RecordingNotifier,
}

impl TestPipeline {
    pub fn new() -> Self {
        let ledger = MemoryLedger::new();
        let notifier = RecordingNotifier::new();
        let pipeline = pipeline_with(Arc::new(ledger.clone()), vec![Box::new(notifier.clone())]);
        Self {
            pipeline,
            ledger,
            notifier,
        }
    }
}

pub fn pipeline_with(
    ledger: Arc<dyn TradeLedger>,
    notifiers: Vec<Box<dyn solver_watch::port::Notifier>>,
) -> Arc<Pipeline> {
    let extractor = Arc::new(RegexExtractor::new().expect("compile patterns"));
    let mut registry = NotifierRegistry::new();
    for notifier in notifiers {
        registry.register(notifier);
    }
    Arc::new(Pipeline::new(extractor, ledger, Arc::new(registry)))
}

/// Poll `condition` until it holds or `timeout` elapses.
pub async fn wait_until<F>(timeout: Duration, mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    condition()
}
