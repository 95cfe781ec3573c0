//! Telegram notification delivery.
//!
//! Posts trade, idle and stats alerts to a chat through the Bot API, with
//! optional per-destination forum threads.

mod format;

pub mod notifier;

pub use format::{escape_code, escape_markdown, format_alert_message};
pub use notifier::{TelegramClient, TelegramConfig, TelegramNotifier};
