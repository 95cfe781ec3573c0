//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`notifier`] - Recording and always-failing [`Notifier`](crate::port::Notifier)s.
//! - [`ledger`] - In-memory and always-failing [`TradeLedger`](crate::port::TradeLedger)s.
//! - [`stream`] - [`ScriptedSource`], a [`LogSource`](crate::port::LogSource) fed
//!   from fixed line lists.
//! - [`lines`] - Canonical solver log lines.

pub mod ledger;
pub mod lines;
pub mod notifier;
pub mod stream;

pub use ledger::{FailingLedger, MemoryLedger};
pub use notifier::{FailingNotifier, RecordingNotifier};
pub use stream::ScriptedSource;
