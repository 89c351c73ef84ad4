//! Slack Web API access — wire types, the `MessageSource` seam, and the
//! concrete HTTP client.

pub mod client;
pub mod types;

pub use client::SlackClient;
pub use types::{Channel, ChannelSnapshot, HistoryResponse, ListResponse, Message};

use async_trait::async_trait;

use crate::classify::ActivityWindow;
use crate::error::SlackError;

/// Read/act interface against the messaging platform.
///
/// Implemented by [`SlackClient`] in production and by in-memory fakes in
/// tests. All operations are stateless queries or actions against the
/// platform; nothing is cached between calls.
#[async_trait]
pub trait MessageSource: Send + Sync {
    /// List channels as a name → id snapshot.
    async fn list_channels(&self, exclude_archived: bool) -> Result<ChannelSnapshot, SlackError>;

    /// Fetch recent non-system messages for a channel, bounded by the window.
    ///
    /// Slack caps history responses at a fixed count (observed: 100) and
    /// silently truncates older messages within the window. Callers get a
    /// bounded-recency sample, not the complete window.
    async fn recent_messages(
        &self,
        channel_id: &str,
        window: &ActivityWindow,
    ) -> Result<Vec<Message>, SlackError>;

    /// Archive a channel. Returns the raw response payload; not retried.
    async fn archive_channel(&self, channel_id: &str) -> Result<serde_json::Value, SlackError>;
}
