//! Log file source.
//!
//! Backfill reads the file to its current end and reports the byte offset of
//! the last complete line. Follow polls from that offset, so nothing is read
//! twice across the hand-off. A file that shrinks is treated as truncated or
//! rotated and is read again from the start. Following from the end skips a
//! line the writer has only half written.

use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncReadExt, AsyncSeekExt, BufReader};
use tracing::{debug, info, warn};

use super::lines::LineReader;
use crate::error::Result;
use crate::port::{Cursor, LineSink, LogSource};

/// Delay between end-of-file checks while following.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Tails a plain log file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    poll_interval: Duration,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn current_len(&self) -> u64 {
        tokio::fs::metadata(&self.path)
            .await
            .map(|m| m.len())
            .unwrap_or(0)
    }

    /// Position at the current end of the file. A writer caught mid-line
    /// leaves a fragment there, which is skipped.
    async fn end_position(&self) -> Resume {
        let len = self.current_len().await;
        let mid_line = match len.checked_sub(1) {
            Some(last) => !matches!(self.byte_at(last).await, Ok(b'\n')),
            None => false,
        };
        Resume {
            offset: len,
            mid_line,
        }
    }

    async fn byte_at(&self, position: u64) -> std::io::Result<u8> {
        let mut file = File::open(&self.path).await?;
        file.seek(SeekFrom::Start(position)).await?;
        file.read_u8().await
    }

    /// Follow from `resume` until the file shrinks or a read fails. `resume`
    /// always holds the position of the last line handed to `sink`.
    async fn follow_from(&self, resume: &mut Resume, sink: &dyn LineSink) -> Result<()> {
        let mut file = File::open(&self.path).await?;
        let len = file.metadata().await?.len();
        if resume.offset > len {
            info!(path = %self.path.display(), "Log file truncated, reading from start");
            *resume = Resume::default();
        }
        let start = resume.offset;
        file.seek(SeekFrom::Start(start)).await?;

        let mut reader = LineReader::new(BufReader::new(file));
        if resume.mid_line {
            reader = reader.skip_partial();
        }
        loop {
            drain_lines(&mut reader, start, resume, sink).await?;

            tokio::time::sleep(self.poll_interval).await;

            if self.current_len().await < resume.offset {
                info!(path = %self.path.display(), "Log file shrank, reopening");
                *resume = Resume::default();
                return Ok(());
            }
        }
    }
}

/// Where following picks up after the file is reopened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Resume {
    offset: u64,
    /// `offset` sits inside a line whose start was never read.
    mid_line: bool,
}

impl Resume {
    const fn at(offset: u64) -> Self {
        Self {
            offset,
            mid_line: false,
        }
    }
}

/// Hand every complete line to `sink`, keeping `resume` on the last one
/// delivered even when a read fails.
async fn drain_lines<R: AsyncBufRead + Unpin>(
    reader: &mut LineReader<R>,
    start: u64,
    resume: &mut Resume,
    sink: &dyn LineSink,
) -> std::io::Result<()> {
    loop {
        let line = reader.next_line().await;
        *resume = Resume {
            offset: start + reader.line_offset(),
            mid_line: reader.is_discarding(),
        };
        match line? {
            Some(line) => sink.accept(&line),
            None => return Ok(()),
        }
    }
}

#[async_trait]
impl LogSource for FileSource {
    async fn backfill(&self, sink: &dyn LineSink) -> Result<Cursor> {
        let file = File::open(&self.path).await?;
        let mut reader = LineReader::new(BufReader::new(file));
        let mut count: u64 = 0;

        while let Some(line) = reader.next_line().await? {
            sink.accept(&line);
            count += 1;
        }

        let offset = reader.line_offset();
        info!(path = %self.path.display(), lines = count, offset, "Backfill complete");
        Ok(Cursor::Offset(offset))
    }

    async fn follow(&self, from: Cursor, sink: &dyn LineSink) -> Result<()> {
        let mut resume = match from {
            Cursor::Offset(offset) => Resume::at(offset),
            Cursor::End | Cursor::Since(_) => self.end_position().await,
        };
        info!(
            path = %self.path.display(),
            offset = resume.offset,
            mid_line = resume.mid_line,
            "Following log file"
        );

        loop {
            if let Err(e) = self.follow_from(&mut resume, sink).await {
                warn!(path = %self.path.display(), error = %e, "Log file unavailable, retrying");
                tokio::time::sleep(self.poll_interval.max(Duration::from_secs(1))).await;
            }
            debug!(offset = resume.offset, "Reopening log file");
        }
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
