//! Concrete Slack Web API client.
//!
//! Thin HTTP layer over three endpoints: `channels.list`,
//! `channels.history`, `channels.archive`. The API token travels as a
//! query parameter on every call, matching the legacy token scheme.

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};

use crate::classify::ActivityWindow;
use crate::config::SweepConfig;
use crate::error::SlackError;
use crate::slack::types::{ChannelSnapshot, HistoryResponse, ListResponse, Message};
use crate::slack::MessageSource;

/// Slack Web API client for one workspace.
pub struct SlackClient {
    base_url: String,
    token: SecretString,
    client: reqwest::Client,
}

impl SlackClient {
    pub fn new(config: &SweepConfig) -> Self {
        Self {
            base_url: config.api_base(),
            token: config.api_token.clone(),
            client: reqwest::Client::new(),
        }
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}{method}", self.base_url)
    }
}

#[async_trait::async_trait]
impl MessageSource for SlackClient {
    async fn list_channels(&self, exclude_archived: bool) -> Result<ChannelSnapshot, SlackError> {
        let resp: ListResponse = self
            .client
            .get(self.api_url("channels.list"))
            .query(&[
                ("exclude_archived", if exclude_archived { "1" } else { "0" }),
                ("token", self.token.expose_secret()),
            ])
            .send()
            .await?
            .json()
            .await?;

        let channels = resp.channels.ok_or_else(|| SlackError::Protocol {
            method: "channels.list".to_string(),
            field: "channels".to_string(),
        })?;

        tracing::debug!(count = channels.len(), "Listed channels");

        Ok(channels.into_iter().map(|c| (c.name, c.id)).collect())
    }

    async fn recent_messages(
        &self,
        channel_id: &str,
        window: &ActivityWindow,
    ) -> Result<Vec<Message>, SlackError> {
        let oldest = window.oldest_ts(Utc::now());

        let resp: HistoryResponse = self
            .client
            .get(self.api_url("channels.history"))
            .query(&[
                ("oldest", oldest.to_string().as_str()),
                ("token", self.token.expose_secret()),
                ("channel", channel_id),
            ])
            .send()
            .await?
            .json()
            .await?;

        let messages = resp.messages.ok_or_else(|| SlackError::Protocol {
            method: "channels.history".to_string(),
            field: "messages".to_string(),
        })?;

        // Slack tags automated notifications ("X has joined the channel")
        // as messages with a subtype; real talk has none. Drop the events.
        let messages: Vec<Message> = messages
            .into_iter()
            .filter(|m| !m.is_system_event())
            .collect();

        tracing::debug!(
            channel = %window.channel,
            days = window.days,
            count = messages.len(),
            "Fetched recent messages"
        );

        Ok(messages)
    }

    async fn archive_channel(&self, channel_id: &str) -> Result<serde_json::Value, SlackError> {
        let payload: serde_json::Value = self
            .client
            .get(self.api_url("channels.archive"))
            .query(&[
                ("token", self.token.expose_secret()),
                ("channel", channel_id),
            ])
            .send()
            .await?
            .json()
            .await?;

        tracing::info!(channel_id, "Archive call issued");

        Ok(payload)
    }
}
