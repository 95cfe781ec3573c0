use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required setting: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("conflicting settings: {0}")]
    Conflict(String),
}

/// Notification delivery errors.
///
/// Callers treat every variant as non-fatal: alerts are best-effort.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("notification queue is full")]
    QueueFull,

    #[error("notification worker has stopped")]
    Closed,

    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Client(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Notify(#[from] NotifyError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("log source error: {0}")]
    Source(String),
}

pub type Result<T> = std::result::Result<T, Error>;
