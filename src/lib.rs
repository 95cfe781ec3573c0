//! Solver Watch - log-driven monitoring and alerting for a trading solver.
//!
//! Reads the solver's log stream (a file or a container's output), turns
//! recognized lines into events, and from those events keeps running
//! counters, a trade ledger, idle detection and chat notifications.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **`domain`** - Pure types and rules: events, counters, idle detection,
//!   trade records
//! - **`port`** - Traits at the edges: field extraction, log sources, the
//!   ledger and notifiers
//! - **`adapter`** - Implementations of those traits: regex/JSON
//!   extractors, file and container sources, file ledger, console and
//!   Telegram notifiers
//! - **`app`** - Line classification, the event pipeline, the cycle monitor
//!   and the stream driver
//!
//! # Modules
//!
//! - [`config`] - Configuration from environment variables
//! - [`error`] - Error types for the crate
//! - [`cli`] - Command-line arguments and the run command
//!
//! # Example
//!
//! ```no_run
//! use solver_watch::adapter::extractor::RegexExtractor;
//! use solver_watch::app::classify;
//!
//! let extractor = RegexExtractor::new().unwrap();
//! let event = classify("INFO Curve LP solver completed num_solutions=2", &extractor);
//! assert!(event.is_recognized());
//! ```

pub mod adapter;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

pub use error::{Error, Result};
