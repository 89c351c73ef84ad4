//! Outbound notices and at-most-once warning delivery.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::config::SweepConfig;
use crate::error::NotifyError;
use crate::slack::Message;

/// Outbound message sink — the thin collaborator that posts to a channel.
///
/// Seam for tests; production uses [`SlackSink`].
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn say(&self, channel_name: &str, text: &str) -> Result<(), NotifyError>;
}

/// Posts messages via `chat.postMessage`.
pub struct SlackSink {
    base_url: String,
    token: SecretString,
    client: reqwest::Client,
}

impl SlackSink {
    pub fn new(config: &SweepConfig) -> Self {
        Self {
            base_url: config.api_base(),
            token: config.api_token.clone(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl MessageSink for SlackSink {
    async fn say(&self, channel_name: &str, text: &str) -> Result<(), NotifyError> {
        let url = format!("{}chat.postMessage", self.base_url);
        let resp = self
            .client
            .post(&url)
            .query(&[("token", self.token.expose_secret())])
            .json(&serde_json::json!({
                "channel": channel_name,
                "text": text,
            }))
            .send()
            .await
            .map_err(|e| NotifyError::SendFailed {
                channel: channel_name.to_string(),
                reason: e.to_string(),
            })?;

        if !resp.status().is_success() {
            return Err(NotifyError::SendFailed {
                channel: channel_name.to_string(),
                reason: format!("chat.postMessage returned {}", resp.status()),
            });
        }

        Ok(())
    }
}

/// Outcome of a warning attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarnOutcome {
    /// Warning text was posted to the channel.
    Sent,
    /// The warning is already present in the recent history; nothing sent.
    Skipped,
}

/// True when the warning text already appears, trimmed-exact, in the
/// recent history.
///
/// Exact-text matching is a heuristic: an edited or reformatted warning
/// will not be recognized and a duplicate will be sent.
pub fn already_warned(warning_text: &str, recent: &[Message]) -> bool {
    let warning = warning_text.trim();
    recent.iter().any(|m| m.text.trim() == warning)
}

/// Send the warning unless an identical one is already in the window.
/// At most one outbound message per call.
pub async fn warn_if_needed(
    sink: &dyn MessageSink,
    channel_name: &str,
    warning_text: &str,
    recent: &[Message],
) -> Result<WarnOutcome, NotifyError> {
    if already_warned(warning_text, recent) {
        tracing::info!(channel = channel_name, "Already warned — skipping");
        return Ok(WarnOutcome::Skipped);
    }

    sink.say(channel_name, warning_text).await?;
    tracing::info!(channel = channel_name, "Warned");
    Ok(WarnOutcome::Sent)
}
