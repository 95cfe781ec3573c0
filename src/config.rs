//! Application configuration loading and validation.
//!
//! All settings come from the environment (a `.env` file is honored by
//! `main`). Required settings that are absent or malformed fail startup
//! with an error naming the variable.

use std::num::NonZeroU64;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

use crate::adapter::notifier::TelegramConfig;
use crate::error::{ConfigError, Result};

pub const TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
pub const TELEGRAM_STATS_THREAD_ID: &str = "TELEGRAM_STATS_THREAD_ID";
pub const TELEGRAM_TRADES_THREAD_ID: &str = "TELEGRAM_TRADES_THREAD_ID";
pub const TELEGRAM_API_URL: &str = "TELEGRAM_API_URL";
pub const TELEGRAM_MARKDOWN: &str = "TELEGRAM_MARKDOWN";
pub const NOTIFY_TIMEOUT_SECS: &str = "NOTIFY_TIMEOUT_SECS";
pub const LOG_FILE: &str = "LOG_FILE";
pub const LOG_CONTAINER: &str = "LOG_CONTAINER";
pub const LOG_LINE_FORMAT: &str = "LOG_LINE_FORMAT";
pub const LEDGER_PATH: &str = "LEDGER_PATH";
pub const POLL_INTERVAL_SECS: &str = "POLL_INTERVAL_SECS";
pub const IDLE_REPORT_EVERY: &str = "IDLE_REPORT_EVERY";
pub const STATS_REPORTS: &str = "STATS_REPORTS";
pub const LOG_LEVEL: &str = "LOG_LEVEL";
pub const LOG_FORMAT: &str = "LOG_FORMAT";

const DEFAULT_API_URL: &str = "https://api.telegram.org";
const DEFAULT_LEDGER_PATH: &str = "trades.log";
const DEFAULT_NOTIFY_TIMEOUT_SECS: u64 = 10;
const DEFAULT_POLL_INTERVAL_SECS: u64 = 300;
const DEFAULT_IDLE_REPORT_EVERY: u64 = 6;

/// Format of the solver's log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineFormat {
    /// Human-readable `tracing` output.
    #[default]
    Text,
    /// `tracing-subscriber` JSON output.
    Json,
}

impl FromStr for LineFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" | "full" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `text` or `json`, got `{other}`")),
        }
    }
}

/// Where the solver's log lines come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogInput {
    File(PathBuf),
    Container(String),
}

/// Cycle timer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Length of one observation cycle.
    pub interval: Duration,
    /// Report idleness every this many silent cycles.
    pub idle_report_every: NonZeroU64,
    /// Send a stats report after each active cycle.
    pub stats_reports: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            idle_report_every: NonZeroU64::new(DEFAULT_IDLE_REPORT_EVERY)
                .unwrap_or(NonZeroU64::MIN),
            stats_reports: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

impl LoggingConfig {
    /// Install the global tracing subscriber. `RUST_LOG` takes precedence
    /// over the configured level.
    pub fn init(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.level));

        let result = match self.format.as_str() {
            "json" => fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
            _ => fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
        };
        if let Err(e) = result {
            eprintln!("Logging already initialized: {e}");
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub input: LogInput,
    pub line_format: LineFormat,
    pub ledger_path: PathBuf,
    pub monitor: MonitorConfig,
    pub logging: LoggingConfig,
}

/// Non-empty value of a variable.
fn lookup_value<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup_value(lookup, key).ok_or_else(|| ConfigError::MissingField { field: key }.into())
}

fn parsed<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup_value(lookup, key)
        .map(|raw| {
            raw.parse::<T>().map_err(|e| {
                ConfigError::InvalidValue {
                    field: key,
                    reason: format!("`{raw}`: {e}"),
                }
                .into()
            })
        })
        .transpose()
}

fn flag<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup_value(lookup, key) {
        None => Ok(default),
        Some(raw) => match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                field: key,
                reason: format!("`{raw}` is not a boolean"),
            }
            .into()),
        },
    }
}

fn positive<F>(lookup: &F, key: &'static str, default: u64) -> Result<NonZeroU64>
where
    F: Fn(&str) -> Option<String>,
{
    let value = parsed::<F, u64>(lookup, key)?.unwrap_or(default);
    NonZeroU64::new(value).ok_or_else(|| {
        ConfigError::InvalidValue {
            field: key,
            reason: "must be greater than zero".into(),
        }
        .into()
    })
}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = required(&lookup, TELEGRAM_BOT_TOKEN)?;
        let chat_id = parsed::<F, i64>(&lookup, TELEGRAM_CHAT_ID)?
            .ok_or(ConfigError::MissingField {
                field: TELEGRAM_CHAT_ID,
            })?;

        let telegram = TelegramConfig {
            bot_token,
            chat_id,
            stats_thread_id: parsed(&lookup, TELEGRAM_STATS_THREAD_ID)?,
            trades_thread_id: parsed(&lookup, TELEGRAM_TRADES_THREAD_ID)?,
            api_url: lookup_value(&lookup, TELEGRAM_API_URL)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            markdown: flag(&lookup, TELEGRAM_MARKDOWN, true)?,
            timeout: Duration::from_secs(
                positive(&lookup, NOTIFY_TIMEOUT_SECS, DEFAULT_NOTIFY_TIMEOUT_SECS)?.get(),
            ),
        };

        let input = match (
            lookup_value(&lookup, LOG_FILE),
            lookup_value(&lookup, LOG_CONTAINER),
        ) {
            (Some(path), None) => LogInput::File(PathBuf::from(path)),
            (None, Some(name)) => LogInput::Container(name),
            (Some(_), Some(_)) => {
                return Err(ConfigError::Conflict(format!(
                    "set only one of {LOG_FILE} and {LOG_CONTAINER}"
                ))
                .into())
            }
            (None, None) => {
                return Err(ConfigError::MissingField {
                    field: "LOG_FILE or LOG_CONTAINER",
                }
                .into())
            }
        };

        let monitor = MonitorConfig {
            interval: Duration::from_secs(
                positive(&lookup, POLL_INTERVAL_SECS, DEFAULT_POLL_INTERVAL_SECS)?.get(),
            ),
            idle_report_every: positive(&lookup, IDLE_REPORT_EVERY, DEFAULT_IDLE_REPORT_EVERY)?,
            stats_reports: flag(&lookup, STATS_REPORTS, true)?,
        };

        let defaults = LoggingConfig::default();
        let logging = LoggingConfig {
            level: lookup_value(&lookup, LOG_LEVEL).unwrap_or(defaults.level),
            format: lookup_value(&lookup, LOG_FORMAT).unwrap_or(defaults.format),
        };

        Ok(Self {
            telegram,
            input,
            line_format: parsed(&lookup, LOG_LINE_FORMAT)?.unwrap_or_default(),
            ledger_path: lookup_value(&lookup, LEDGER_PATH)
                .map_or_else(|| PathBuf::from(DEFAULT_LEDGER_PATH), PathBuf::from),
            monitor,
            logging,
        })
    }

    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    const BASE: &[(&str, &str)] = &[
        (TELEGRAM_BOT_TOKEN, "123:abc"),
        (TELEGRAM_CHAT_ID, "-1001234"),
        (LOG_CONTAINER, "solvers"),
    ];

    fn missing_field(result: Result<Config>) -> Option<&'static str> {
        match result {
            Err(Error::Config(ConfigError::MissingField { field })) => Some(field),
            _ => None,
        }
    }

    #[test]
    fn test_defaults() {
        let config = load(BASE).unwrap();
        assert_eq!(config.telegram.chat_id, -1_001_234);
        assert_eq!(config.telegram.api_url, "https://api.telegram.org");
        assert!(config.telegram.markdown);
        assert_eq!(config.telegram.stats_thread_id, None);
        assert_eq!(config.input, LogInput::Container("solvers".into()));
        assert_eq!(config.line_format, LineFormat::Text);
        assert_eq!(config.ledger_path, PathBuf::from("trades.log"));
        assert_eq!(config.monitor.interval, Duration::from_secs(300));
        assert_eq!(config.monitor.idle_report_every.get(), 6);
        assert!(config.monitor.stats_reports);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_token_names_variable() {
        let result = load(&[(TELEGRAM_CHAT_ID, "1"), (LOG_FILE, "/tmp/x.log")]);
        assert_eq!(missing_field(result), Some(TELEGRAM_BOT_TOKEN));
    }

    #[test]
    fn test_missing_chat_id_names_variable() {
        let result = load(&[(TELEGRAM_BOT_TOKEN, "t"), (LOG_FILE, "/tmp/x.log")]);
        assert_eq!(missing_field(result), Some(TELEGRAM_CHAT_ID));
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let result = load(&[
            (TELEGRAM_BOT_TOKEN, "   "),
            (TELEGRAM_CHAT_ID, "1"),
            (LOG_FILE, "/tmp/x.log"),
        ]);
        assert_eq!(missing_field(result), Some(TELEGRAM_BOT_TOKEN));
    }

    #[test]
    fn test_invalid_chat_id() {
        let result = load(&[
            (TELEGRAM_BOT_TOKEN, "t"),
            (TELEGRAM_CHAT_ID, "not-a-number"),
            (LOG_FILE, "/tmp/x.log"),
        ]);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: TELEGRAM_CHAT_ID,
                ..
            }))
        ));
    }

    #[test]
    fn test_log_input_required_and_exclusive() {
        let none = load(&[(TELEGRAM_BOT_TOKEN, "t"), (TELEGRAM_CHAT_ID, "1")]);
        assert!(missing_field(none).is_some());

        let mut both = BASE.to_vec();
        both.push((LOG_FILE, "/var/log/solver.log"));
        assert!(matches!(
            load(&both),
            Err(Error::Config(ConfigError::Conflict(_)))
        ));
    }

    #[test]
    fn test_overrides() {
        let mut vars = BASE.to_vec();
        vars.extend_from_slice(&[
            (TELEGRAM_STATS_THREAD_ID, "11"),
            (TELEGRAM_TRADES_THREAD_ID, "22"),
            (TELEGRAM_MARKDOWN, "false"),
            (POLL_INTERVAL_SECS, "60"),
            (IDLE_REPORT_EVERY, "3"),
            (STATS_REPORTS, "off"),
            (LOG_LINE_FORMAT, "json"),
            (LEDGER_PATH, "/data/trades.log"),
        ]);
        let config = load(&vars).unwrap();
        assert_eq!(config.telegram.stats_thread_id, Some(11));
        assert_eq!(config.telegram.trades_thread_id, Some(22));
        assert!(!config.telegram.markdown);
        assert_eq!(config.monitor.interval, Duration::from_secs(60));
        assert_eq!(config.monitor.idle_report_every.get(), 3);
        assert!(!config.monitor.stats_reports);
        assert_eq!(config.line_format, LineFormat::Json);
        assert_eq!(config.ledger_path, PathBuf::from("/data/trades.log"));
    }

    #[test]
    fn test_zero_cadence_rejected() {
        let mut vars = BASE.to_vec();
        vars.push((IDLE_REPORT_EVERY, "0"));
        assert!(matches!(
            load(&vars),
            Err(Error::Config(ConfigError::InvalidValue {
                field: IDLE_REPORT_EVERY,
                ..
            }))
        ));
    }
}
