//! Application layer: classification, the per-line pipeline, the cycle
//! monitor and the stream driver that ties them to a log source.

pub mod classifier;
pub mod driver;
pub mod monitor;
pub mod pipeline;

pub use classifier::{classify, match_signature, Signature, SIGNATURES};
pub use driver::{RunMode, StreamDriver};
pub use monitor::CycleMonitor;
pub use pipeline::{Pipeline, SharedStats};
