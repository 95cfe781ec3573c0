use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Temporary solver log file for integration tests.
///
/// The directory is removed when the value is dropped.
pub struct TempLog {
    dir: TempDir,
    path: PathBuf,
}

impl TempLog {
    pub fn create() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("solver.log");
        std::fs::write(&path, "").expect("create log file");
        Self { dir, path }
    }

    pub fn with_lines(lines: &[&str]) -> Self {
        let log = Self::create();
        log.append(lines);
        log
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Append complete lines.
    pub fn append(&self, lines: &[&str]) {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .expect("open log file");
        for line in lines {
            writeln!(file, "{line}").expect("append line");
        }
        file.flush().expect("flush log file");
    }

    /// Append raw text without adding a newline.
    pub fn append_raw(&self, text: &str) {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .expect("open log file");
        file.write_all(text.as_bytes()).expect("append text");
        file.flush().expect("flush log file");
    }
}
