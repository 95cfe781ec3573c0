//! Telegram notification delivery.
//!
//! Provides the [`TelegramNotifier`], which formats alerts and hands them to
//! a background worker over a bounded queue. The worker posts each message
//! through the Bot API with a per-request timeout. Failures are logged and
//! dropped; nothing is retried.

use std::time::Duration;

use teloxide::prelude::*;
use teloxide::types::{MessageId, ParseMode, ThreadId};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::NotifyError;
use crate::port::{Alert, Notifier, Target};

use super::format::format_alert_message;

/// Pending messages before `send` starts rejecting.
const QUEUE_CAPACITY: usize = 256;

/// Configuration for the Telegram notifier.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot API token obtained from BotFather.
    pub bot_token: String,
    /// Target chat ID for all messages.
    pub chat_id: i64,
    /// Forum thread for idle and stats reports.
    pub stats_thread_id: Option<i32>,
    /// Forum thread for winning trades.
    pub trades_thread_id: Option<i32>,
    /// Bot API base URL.
    pub api_url: String,
    /// Send `MarkdownV2` instead of plain text.
    pub markdown: bool,
    /// Upper bound on a single request.
    pub timeout: Duration,
}

impl TelegramConfig {
    /// Thread that messages for `target` are posted to.
    #[must_use]
    pub const fn thread_for(&self, target: Target) -> Option<i32> {
        match target {
            Target::Stats => self.stats_thread_id,
            Target::Trades => self.trades_thread_id,
        }
    }
}

/// Bot handle bound to one chat.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    bot: Bot,
    config: TelegramConfig,
}

impl TelegramClient {
    pub fn new(config: TelegramConfig) -> Result<Self, NotifyError> {
        let http = teloxide::net::default_reqwest_settings()
            .timeout(config.timeout)
            .build()
            .map_err(|e| NotifyError::Client(e.to_string()))?;
        let api_url = Url::parse(&config.api_url)?;
        let bot = Bot::with_client(config.bot_token.clone(), http).set_api_url(api_url);
        Ok(Self { bot, config })
    }

    /// Post one message to the thread configured for `target`.
    pub async fn send_message(&self, target: Target, text: &str) -> Result<(), NotifyError> {
        let mut request = self.bot.send_message(ChatId(self.config.chat_id), text);
        if let Some(thread) = self.config.thread_for(target) {
            request = request.message_thread_id(ThreadId(MessageId(thread)));
        }
        if self.config.markdown {
            request = request.parse_mode(ParseMode::MarkdownV2);
        }
        request.await?;
        Ok(())
    }
}

struct Outbound {
    target: Target,
    text: String,
}

/// Telegram notifier that sends messages to a chat.
///
/// Implements the [`Notifier`] trait; delivery happens on a spawned worker
/// so `send` never waits on the network.
pub struct TelegramNotifier {
    sender: mpsc::Sender<Outbound>,
    markdown: bool,
}

impl TelegramNotifier {
    /// Create a new Telegram notifier and spawn the background worker.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: TelegramConfig) -> Result<Self, NotifyError> {
        let markdown = config.markdown;
        let client = TelegramClient::new(config)?;
        let (sender, receiver) = mpsc::channel(QUEUE_CAPACITY);

        tokio::spawn(telegram_worker(client, receiver));

        Ok(Self { sender, markdown })
    }
}

impl Notifier for TelegramNotifier {
    fn send(&self, target: Target, alert: &Alert) -> Result<(), NotifyError> {
        let text = format_alert_message(alert, self.markdown);
        self.sender
            .try_send(Outbound { target, text })
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => NotifyError::QueueFull,
                mpsc::error::TrySendError::Closed(_) => NotifyError::Closed,
            })
    }

    fn name(&self) -> &'static str {
        "telegram"
    }
}

/// Background worker that sends Telegram messages.
async fn telegram_worker(client: TelegramClient, mut receiver: mpsc::Receiver<Outbound>) {
    info!(chat_id = client.config.chat_id, "Telegram notifier started");

    while let Some(message) = receiver.recv().await {
        match client.send_message(message.target, &message.text).await {
            Ok(()) => debug!(destination = ?message.target, "Telegram message sent"),
            Err(e) => warn!(destination = ?message.target, error = %e, "Failed to send Telegram message"),
        }
    }

    warn!("Telegram notifier worker shutting down");
}
