//! Notification adapters.
//!
//! Implements the `port::Notifier` trait for the console, Telegram and the
//! structured log.

pub mod console;
pub mod telegram;

pub use console::ConsoleNotifier;
pub use telegram::{TelegramConfig, TelegramNotifier};

use tracing::info;

use crate::error::NotifyError;
use crate::port::{Alert, Notifier, Target};

/// A logging notifier that records alerts via tracing.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, target: Target, alert: &Alert) -> Result<(), NotifyError> {
        match alert {
            Alert::Trade(record) => {
                info!(
                    destination = ?target,
                    order_uid = %record.order_id,
                    sell_token = %record.sell_token,
                    sell_amount = %record.sell_amount,
                    buy_token = %record.buy_token,
                    buy_amount = %record.buy_amount,
                    "Trade won"
                );
            }
            Alert::Idle { cycles, minutes } => {
                info!(destination = ?target, cycles, minutes, "Solver idle");
            }
            Alert::Stats(report) => {
                info!(
                    destination = ?target,
                    auctions = report.cycle.auctions,
                    orders = report.cycle.orders,
                    solutions = report.cycle.solutions,
                    errors = report.cycle.errors,
                    "Cycle stats"
                );
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
