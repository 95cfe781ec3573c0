//! File-backed trade ledger.
//!
//! The file is opened in append mode and never truncated, so entries from
//! previous runs are preserved.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::info;

use crate::domain::TradeRecord;
use crate::error::Result;
use crate::port::TradeLedger;

/// Append-only text ledger, one trade per line.
pub struct FileLedger {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileLedger {
    /// Open (or create) the ledger at `path` for appending.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        info!(path = %path.display(), "Trade ledger opened");
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TradeLedger for FileLedger {
    fn append(&self, record: &TradeRecord) -> Result<()> {
        // One write call per entry so concurrent appenders never interleave.
        let line = format!("{}\n", record.ledger_line());
        let mut file = self.file.lock();
        file.write_all(line.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}
