//! Monitoring domain types: events, counters, idle detection, trade records.

mod event;
mod idle;
mod stats;
mod trade;

pub use event::{Event, SolvedOrder, UNKNOWN_AMOUNT, UNKNOWN_FIELD};
pub use idle::{CycleOutcome, IdleDetector, IdleState};
pub use stats::Stats;
pub use trade::TradeRecord;
