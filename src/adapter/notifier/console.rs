//! Local console output.
//!
//! Keeps a single colorized status line updated in place and prints a block
//! above it for every alert. Writing to the terminal cannot fail in a way
//! worth reporting, so `send` always succeeds.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Stream};

use crate::domain::{Stats, TradeRecord};
use crate::error::NotifyError;
use crate::port::{Alert, Notifier, StatsReport, StatusDisplay, Target};

/// Braille spinner animation frames.
const BRAILLE_SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Console notifier and in-place status line.
#[derive(Clone)]
pub struct ConsoleNotifier {
    bar: ProgressBar,
}

impl ConsoleNotifier {
    /// Status line on stderr with a steady spinner.
    ///
    /// indicatif hides the bar when stderr is not a terminal; alerts are
    /// then printed as plain lines.
    #[must_use]
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .tick_strings(BRAILLE_SPINNER)
            .template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message(format_status(&Stats::default()));
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar }
    }

    /// Console output without a status line.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Whether the status line is suppressed.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.bar.is_hidden()
    }

    fn print_block(&self, block: &str) {
        if self.is_hidden() {
            println!("{block}");
        } else {
            self.bar.println(block);
        }
    }

    /// Clear the status line before exit.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ConsoleNotifier {
    fn send(&self, _target: Target, alert: &Alert) -> Result<(), NotifyError> {
        self.print_block(&format_alert_block(alert));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "console"
    }
}

impl StatusDisplay for ConsoleNotifier {
    fn update(&self, stats: &Stats) {
        self.bar.set_message(format_status(stats));
    }
}

/// One-line running totals.
#[must_use]
pub fn format_status(stats: &Stats) -> String {
    format!(
        "{} {}  {} {}  {} {}  {} {}  {} {}",
        "auctions".if_supports_color(Stream::Stderr, |t| t.dimmed()),
        stats.auctions.if_supports_color(Stream::Stderr, |t| t.cyan()),
        "orders".if_supports_color(Stream::Stderr, |t| t.dimmed()),
        stats.orders.if_supports_color(Stream::Stderr, |t| t.cyan()),
        "solutions".if_supports_color(Stream::Stderr, |t| t.dimmed()),
        stats.solutions.if_supports_color(Stream::Stderr, |t| t.green()),
        "errors".if_supports_color(Stream::Stderr, |t| t.dimmed()),
        stats.errors.if_supports_color(Stream::Stderr, |t| t.red()),
        "trades".if_supports_color(Stream::Stderr, |t| t.dimmed()),
        stats.trades.if_supports_color(Stream::Stderr, |t| t.yellow()),
    )
}

/// Multi-line block for one alert.
#[must_use]
pub fn format_alert_block(alert: &Alert) -> String {
    match alert {
        Alert::Trade(record) => format_trade_block(record),
        Alert::Idle { cycles, minutes } => format!(
            "  {} no solver activity for {} min ({} cycles)",
            "idle".if_supports_color(Stream::Stdout, |t| t.yellow()),
            minutes,
            cycles
        ),
        Alert::Stats(report) => format_stats_line(report),
    }
}

fn format_trade_block(record: &TradeRecord) -> String {
    format!(
        "\n  {} {}\n  {:<6} {}\n  {:<6} {} of {}\n  {:<6} {} of {}\n",
        "✓ trade won".if_supports_color(Stream::Stdout, |t| t.green()),
        record.timestamp.if_supports_color(Stream::Stdout, |t| t.dimmed()),
        "uid",
        record.order_id,
        "sell",
        record.sell_amount,
        record.sell_token,
        "buy",
        record.buy_amount,
        record.buy_token,
    )
}

fn format_stats_line(report: &StatsReport) -> String {
    let c = &report.cycle;
    format!(
        "  {} last {} min: {} auctions, {} orders, {} solutions, {} errors",
        "stats".if_supports_color(Stream::Stdout, |t| t.cyan()),
        report.interval_secs / 60,
        c.auctions,
        c.orders,
        c.solutions,
        c.errors
    )
}
