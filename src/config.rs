//! Sweep configuration and notice-text loading.

use std::path::Path;

use chrono::NaiveDate;
use secrecy::SecretString;
use tokio::fs;

use crate::error::ConfigError;

/// User ids whose messages never count as channel activity.
/// USLACKBOT is Slack's own automated account.
pub const DEFAULT_IGNORED_USERS: &[&str] = &["USLACKBOT"];

/// Channels are never archived before this date, regardless of staleness.
pub const DEFAULT_EARLIEST_ARCHIVE_DATE: &str = "2016-01-28";

/// Sweeper configuration.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Slack workspace short name (the part preceding `.slack.com`).
    pub slack_name: String,
    /// Slack API token, sent as a query parameter on every call.
    pub api_token: SecretString,
    /// User ids excluded from activity consideration.
    pub ignored_users: Vec<String>,
    /// Earliest date on which archival is permitted.
    pub earliest_archive_date: NaiveDate,
}

impl SweepConfig {
    /// Build a config, resolving the token from a direct value or a file.
    pub async fn new(
        slack_name: impl Into<String>,
        api_token: Option<String>,
        api_token_file: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            slack_name: slack_name.into(),
            api_token: resolve_token(api_token, api_token_file).await?,
            ignored_users: DEFAULT_IGNORED_USERS.iter().map(|s| s.to_string()).collect(),
            earliest_archive_date: parse_earliest_date(DEFAULT_EARLIEST_ARCHIVE_DATE)?,
        })
    }

    /// Base URL for the workspace's Web API.
    pub fn api_base(&self) -> String {
        format!("https://{}.slack.com/api/", self.slack_name)
    }
}

/// Parse an earliest-archive date in `YYYY-MM-DD` form.
pub fn parse_earliest_date(value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ConfigError::InvalidDate {
        value: value.to_string(),
    })
}

/// Resolve an API token from a direct value, falling back to a token file.
pub async fn resolve_token(
    direct: Option<String>,
    file: Option<&Path>,
) -> Result<SecretString, ConfigError> {
    if let Some(token) = direct {
        return Ok(SecretString::from(token));
    }
    let Some(path) = file else {
        return Err(ConfigError::MissingToken);
    };
    let raw = fs::read_to_string(path).await?;
    let token = raw.trim();
    if token.is_empty() {
        return Err(ConfigError::EmptyTokenFile {
            path: path.to_path_buf(),
        });
    }
    Ok(SecretString::from(token))
}

/// Fixed notice texts sent to channels, loaded once per run.
#[derive(Debug, Clone)]
pub struct NoticeTexts {
    /// Sent immediately before a channel is archived.
    pub closure: String,
    /// Sent when a channel first goes stale.
    pub warning: String,
}

impl NoticeTexts {
    /// Construct from raw strings, trimming surrounding whitespace.
    pub fn new(closure: &str, warning: &str) -> Self {
        Self {
            closure: closure.trim().to_string(),
            warning: warning.trim().to_string(),
        }
    }

    /// Load both notice files from disk.
    pub async fn load(closure_path: &Path, warning_path: &Path) -> Result<Self, ConfigError> {
        let closure = fs::read_to_string(closure_path).await?;
        let warning = fs::read_to_string(warning_path).await?;
        Ok(Self::new(&closure, &warning))
    }
}
