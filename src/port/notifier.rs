//! Notifier port for alert delivery.
//!
//! This module defines the trait for sending alerts about winning trades,
//! idle periods and periodic statistics, plus a registry that broadcasts
//! to every configured destination.

use tracing::debug;

use crate::domain::{Stats, TradeRecord};
use crate::error::NotifyError;

/// Logical destination of an alert within a notifier.
///
/// Remote notifiers may route each target to a different chat thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Idle reports and periodic counters.
    Stats,
    /// Winning trades.
    Trades,
}

/// Periodic statistics for one observation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsReport {
    /// Counter growth during the cycle.
    pub cycle: Stats,
    /// Running totals since startup.
    pub totals: Stats,
    /// Cycle length in seconds.
    pub interval_secs: u64,
}

/// Alerts that can be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// A solved order was written to the ledger.
    Trade(TradeRecord),
    /// The solver has been silent for a while.
    Idle {
        /// Consecutive silent cycles.
        cycles: u64,
        /// Total silent minutes.
        minutes: u64,
    },
    /// Activity summary for an active cycle.
    Stats(StatsReport),
}

impl Alert {
    /// Default destination for this alert.
    #[must_use]
    pub const fn target(&self) -> Target {
        match self {
            Self::Trade(_) => Target::Trades,
            Self::Idle { .. } | Self::Stats(_) => Target::Stats,
        }
    }
}

/// Trait for alert destinations.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `send` is called from the line-processing loop and must return quickly;
///   slow transports queue the alert and deliver it from a background task
/// - Errors are reported to the caller but never retried
pub trait Notifier: Send + Sync {
    fn send(&self, target: Target, alert: &Alert) -> Result<(), NotifyError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Live view of the running counters, refreshed after every line.
pub trait StatusDisplay: Send + Sync {
    fn update(&self, stats: &Stats);
}

/// Registry of notifiers (composite pattern).
///
/// Broadcasts alerts to all registered notifiers. Delivery is best-effort:
/// a failing notifier is logged and skipped.
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { notifiers: vec![] }
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Send an alert to its default target on every notifier.
    pub fn broadcast(&self, alert: &Alert) {
        let target = alert.target();
        for notifier in &self.notifiers {
            if let Err(e) = notifier.send(target, alert) {
                debug!(notifier = notifier.name(), error = %e, "Dropped alert");
            }
        }
    }

    /// Number of registered notifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Default for NotifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}
