//! Wire types for the Slack Web API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A channel as returned by `channels.list`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_archived: bool,
}

/// A message as returned by `channels.history`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    /// Authoring user id. Absent for some bot/integration messages.
    pub user: Option<String>,
    #[serde(default)]
    pub text: String,
    /// Slack timestamp string.
    pub ts: Option<String>,
    /// Set on automated events ("X has joined the channel" and friends).
    pub subtype: Option<String>,
}

impl Message {
    /// True for system/automated events, which carry a non-empty subtype.
    /// Plain user messages have no subtype.
    pub fn is_system_event(&self) -> bool {
        self.subtype.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// True when this message was authored by one of the given user ids.
    pub fn authored_by_any(&self, user_ids: &[String]) -> bool {
        match &self.user {
            Some(user) => user_ids.iter().any(|id| id == user),
            None => false,
        }
    }
}

/// `channels.list` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse {
    pub ok: bool,
    pub error: Option<String>,
    pub channels: Option<Vec<Channel>>,
}

/// `channels.history` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    pub ok: bool,
    pub error: Option<String>,
    pub messages: Option<Vec<Message>>,
    pub has_more: Option<bool>,
}

/// Immutable per-run snapshot of non-archived channels, name → id.
///
/// Iteration order is lexicographic by channel name, which fixes the
/// visiting order of every sweep run.
#[derive(Debug, Clone, Default)]
pub struct ChannelSnapshot {
    channels: BTreeMap<String, String>,
}

impl ChannelSnapshot {
    /// Look up a channel id by name.
    pub fn id_of(&self, name: &str) -> Option<&str> {
        self.channels.get(name).map(String::as_str)
    }

    /// Iterate `(name, id)` pairs in lexicographic name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.channels.iter().map(|(n, i)| (n.as_str(), i.as_str()))
    }

    /// Channel names in lexicographic order.
    pub fn names(&self) -> Vec<&str> {
        self.channels.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl FromIterator<(String, String)> for ChannelSnapshot {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            channels: iter.into_iter().collect(),
        }
    }
}
