//! Command-line interface definitions.

pub mod run;

use clap::Parser;

use crate::app::RunMode;

/// Solver Watch - log-driven monitoring for a trading solver.
///
/// All settings come from environment variables (a `.env` file in the
/// working directory is loaded first).
#[derive(Parser, Debug, Default)]
#[command(name = "solver-watch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Process the existing log content before following new lines
    #[arg(long)]
    pub backfill: bool,
}

impl Cli {
    #[must_use]
    pub const fn mode(&self) -> RunMode {
        if self.backfill {
            RunMode::BackfillThenFollow
        } else {
            RunMode::FollowOnly
        }
    }
}
