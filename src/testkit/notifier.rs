//! Notifier test doubles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::NotifyError;
use crate::port::{Alert, Notifier, Target};

/// Thread-safe alert collector for notification assertions in tests.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<(Target, Alert)>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sent.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.lock().is_empty()
    }

    /// Alerts in send order.
    pub fn alerts(&self) -> Vec<Alert> {
        self.sent.lock().iter().map(|(_, a)| a.clone()).collect()
    }

    /// Alerts sent to `target`, in send order.
    pub fn alerts_for(&self, target: Target) -> Vec<Alert> {
        self.sent
            .lock()
            .iter()
            .filter(|(t, _)| *t == target)
            .map(|(_, a)| a.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn send(&self, target: Target, alert: &Alert) -> Result<(), NotifyError> {
        self.sent.lock().push((target, alert.clone()));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Notifier whose transport always errors. Counts attempts.
#[derive(Clone, Default)]
pub struct FailingNotifier {
    attempts: Arc<AtomicUsize>,
}

impl FailingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Notifier for FailingNotifier {
    fn send(&self, _target: Target, _alert: &Alert) -> Result<(), NotifyError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(NotifyError::Closed)
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}
