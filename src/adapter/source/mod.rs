//! Log source adapters.
//!
//! Implements the `port::LogSource` trait for a plain file and for a Docker
//! container's output.

mod container;
mod file;

pub mod lines;

use std::sync::Arc;

pub use container::ContainerSource;
pub use file::FileSource;

use crate::config::LogInput;
use crate::port::LogSource;

/// Build the source described by the configuration.
#[must_use]
pub fn from_input(input: &LogInput) -> Arc<dyn LogSource> {
    match input {
        LogInput::File(path) => Arc::new(FileSource::new(path.clone())),
        LogInput::Container(name) => Arc::new(ContainerSource::new(name.clone())),
    }
}
