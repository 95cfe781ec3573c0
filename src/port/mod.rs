//! Port definitions.
//!
//! Traits at the boundary between the monitoring pipeline and the outside
//! world: where lines come from, how fields are pulled out of them, where
//! trades are recorded and where alerts go.

pub mod extractor;
pub mod ledger;
pub mod notifier;
pub mod source;

pub use extractor::{Field, FieldExtractor};
pub use ledger::TradeLedger;
pub use notifier::{Alert, Notifier, NotifierRegistry, StatsReport, StatusDisplay, Target};
pub use source::{Cursor, LineSink, LogSource};
