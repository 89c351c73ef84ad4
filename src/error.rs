//! Error types for chansweep.

use std::path::PathBuf;

/// Top-level error type for the sweeper.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Slack API error: {0}")]
    Slack(#[from] SlackError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No API token: pass one directly or point to a token file")]
    MissingToken,

    #[error("Token file {path} is empty")]
    EmptyTokenFile { path: PathBuf },

    #[error("Invalid earliest-archive date {value}: expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Slack Web API errors.
///
/// `Transport` covers network and HTTP-level failures; `Protocol` covers
/// well-formed responses that lack the expected payload collection (which
/// is also what an `ok: false` error response looks like).
#[derive(Debug, thiserror::Error)]
pub enum SlackError {
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{method} response missing expected field: {field}")]
    Protocol { method: String, field: String },
}

/// Outbound notification errors.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Failed to post to channel {channel}: {reason}")]
    SendFailed { channel: String, reason: String },
}

/// Result type alias for the sweeper.
pub type Result<T> = std::result::Result<T, Error>;
