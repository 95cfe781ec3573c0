//! Field extraction adapters.
//!
//! Implements the `port::FieldExtractor` trait for the two log formats the
//! solver can emit.

mod json;
mod text;

use std::sync::Arc;

pub use self::json::JsonExtractor;
pub use self::text::RegexExtractor;

use crate::config::LineFormat;
use crate::error::Result;
use crate::port::FieldExtractor;

/// Build the extractor matching the configured line format.
pub fn for_format(format: LineFormat) -> Result<Arc<dyn FieldExtractor>> {
    Ok(match format {
        LineFormat::Text => Arc::new(RegexExtractor::new()?),
        LineFormat::Json => Arc::new(JsonExtractor::new()),
    })
}
