//! Bounded line splitting over async readers.
//!
//! A line longer than the limit is cut at the limit and emitted; the rest of
//! it, up to the next newline, is dropped. Memory per reader therefore stays
//! under the limit no matter what the producer writes.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Longest line kept in memory.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

/// Incremental line reader that survives end-of-input.
///
/// At end-of-input an unterminated tail stays buffered, so a file that is
/// still being written can be read again later without losing or splitting
/// the line.
pub struct LineReader<R> {
    reader: R,
    buf: Vec<u8>,
    max_len: usize,
    discarding: bool,
    consumed: u64,
}

fn drain_line(buf: &mut Vec<u8>) -> String {
    let line = String::from_utf8_lossy(buf)
        .trim_end_matches('\r')
        .to_string();
    buf.clear();
    line
}

impl<R: AsyncBufRead + Unpin> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_max_len(reader, MAX_LINE_BYTES)
    }

    pub fn with_max_len(reader: R, max_len: usize) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            max_len: max_len.max(1),
            discarding: false,
            consumed: 0,
        }
    }

    /// Drop everything up to and including the next newline, for readers
    /// that start somewhere inside a line.
    #[must_use]
    pub fn skip_partial(mut self) -> Self {
        self.discarding = true;
        self
    }

    /// Whether the reader is inside a line it will not emit.
    #[must_use]
    pub const fn is_discarding(&self) -> bool {
        self.discarding
    }

    /// Next complete line without its terminator, or `None` when no complete
    /// line is available yet.
    pub async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        loop {
            let available = self.reader.fill_buf().await?;
            if available.is_empty() {
                return Ok(None);
            }

            let newline = available.iter().position(|&b| b == b'\n');
            let end = newline.unwrap_or(available.len());
            let mut emit = None;

            if self.discarding {
                if newline.is_some() {
                    self.discarding = false;
                }
            } else {
                let room = self.max_len.saturating_sub(self.buf.len());
                let keep = end.min(room);
                self.buf.extend_from_slice(&available[..keep]);

                if newline.is_some() {
                    emit = Some(drain_line(&mut self.buf));
                } else if self.buf.len() >= self.max_len {
                    self.discarding = true;
                    emit = Some(drain_line(&mut self.buf));
                }
            }

            let used = newline.map_or(available.len(), |i| i + 1);
            self.reader.consume(used);
            self.consumed += used as u64;

            if emit.is_some() {
                return Ok(emit);
            }
        }
    }

    /// Flush an unterminated final line once the input is known to be
    /// complete.
    pub fn finish(&mut self) -> Option<String> {
        if self.buf.is_empty() {
            return None;
        }
        Some(drain_line(&mut self.buf))
    }

    /// Bytes consumed up to the end of the last complete line, relative to
    /// where reading started.
    #[must_use]
    pub fn line_offset(&self) -> u64 {
        self.consumed.saturating_sub(self.buf.len() as u64)
    }
}
