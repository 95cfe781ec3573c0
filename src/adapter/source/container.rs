//! Docker container log source.
//!
//! Reads the solver's output through `docker logs`, merging stdout and
//! stderr. Backfill is bounded with `--until` and follow resumes with
//! `--since` at the same instant, so the hand-off neither drops nor repeats
//! lines.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use tokio::io::{AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::lines::LineReader;
use crate::error::{Error, Result};
use crate::port::{Cursor, LineSink, LogSource};

/// Lines buffered between the pipe readers and the sink.
const CHANNEL_CAPACITY: usize = 1024;

/// Delay before restarting a follow process that exited.
const RESTART_DELAY: Duration = Duration::from_secs(5);

/// Reads `docker logs` for one container.
#[derive(Debug, Clone)]
pub struct ContainerSource {
    container: String,
    program: String,
}

fn docker_time(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

impl ContainerSource {
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            program: "docker".to_string(),
        }
    }

    /// Use a different executable than `docker`.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Arguments for a one-shot dump of everything logged before `until`.
    #[must_use]
    pub fn backfill_args(&self, until: DateTime<Utc>) -> Vec<String> {
        vec![
            "logs".to_string(),
            "--until".to_string(),
            docker_time(until),
            self.container.clone(),
        ]
    }

    /// Arguments for an unbounded follow starting at `from`.
    #[must_use]
    pub fn follow_args(&self, from: Cursor) -> Vec<String> {
        let mut args = vec!["logs".to_string(), "--follow".to_string()];
        match from {
            Cursor::Since(at) => {
                args.push("--since".to_string());
                args.push(docker_time(at));
            }
            Cursor::End | Cursor::Offset(_) => {
                args.push("--tail".to_string());
                args.push("0".to_string());
            }
        }
        args.push(self.container.clone());
        args
    }

    /// Run one `docker logs` process to completion, feeding every line to
    /// `sink`.
    async fn run(&self, args: &[String], sink: &dyn LineSink) -> Result<u64> {
        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let (tx, mut rx) = mpsc::channel(CHANNEL_CAPACITY);
        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(pump(stdout, tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(pump(stderr, tx.clone()));
        }
        drop(tx);

        let mut count: u64 = 0;
        while let Some(line) = rx.recv().await {
            sink.accept(&line);
            count += 1;
        }

        let status = child.wait().await?;
        if !status.success() {
            return Err(Error::Source(format!(
                "{} {} exited with {status}",
                self.program,
                args.join(" ")
            )));
        }
        Ok(count)
    }
}

/// Forward lines from one pipe into the shared channel.
async fn pump<R>(stream: R, tx: mpsc::Sender<String>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let mut reader = LineReader::new(BufReader::new(stream));
    loop {
        match reader.next_line().await {
            Ok(Some(line)) => {
                if tx.send(line).await.is_err() {
                    return;
                }
            }
            Ok(None) => {
                if let Some(rest) = reader.finish() {
                    let _ = tx.send(rest).await;
                }
                return;
            }
            Err(e) => {
                warn!(error = %e, "Failed reading container output");
                return;
            }
        }
    }
}

#[async_trait]
impl LogSource for ContainerSource {
    async fn backfill(&self, sink: &dyn LineSink) -> Result<Cursor> {
        let until = Utc::now();
        let lines = self.run(&self.backfill_args(until), sink).await?;
        info!(container = %self.container, lines, "Backfill complete");
        Ok(Cursor::Since(until))
    }

    async fn follow(&self, from: Cursor, sink: &dyn LineSink) -> Result<()> {
        let mut cursor = from;
        loop {
            info!(container = %self.container, "Following container logs");
            match self.run(&self.follow_args(cursor), sink).await {
                Ok(lines) => {
                    warn!(container = %self.container, lines, "Container log stream ended");
                }
                Err(e) => {
                    warn!(container = %self.container, error = %e, "Container log stream failed");
                }
            }
            cursor = Cursor::Since(Utc::now());
            tokio::time::sleep(RESTART_DELAY).await;
        }
    }

    fn describe(&self) -> String {
        format!("container {}", self.container)
    }
}
