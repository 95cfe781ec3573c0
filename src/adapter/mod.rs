//! Adapter implementations.
//!
//! Concrete implementations of the traits in [`crate::port`]:
//!
//! - [`extractor`] - Regex and JSON field extraction
//! - [`notifier`] - Console, Telegram and log notifiers
//! - [`ledger`] - Append-only trade ledger file
//! - [`source`] - Log file and Docker container sources

pub mod extractor;
pub mod ledger;
pub mod notifier;
pub mod source;
