//! Staleness classification over a trailing activity window.

use chrono::{DateTime, Utc};

use crate::slack::Message;

const SECONDS_PER_DAY: i64 = 86_400;

/// A channel name paired with a trailing day-count window, used to bound a
/// history query.
#[derive(Debug, Clone)]
pub struct ActivityWindow {
    pub channel: String,
    pub days: u32,
}

impl ActivityWindow {
    pub fn new(channel: impl Into<String>, days: u32) -> Self {
        Self {
            channel: channel.into(),
            days,
        }
    }

    /// Lower-bound Unix timestamp for the window: `now − days×86400`.
    pub fn oldest_ts(&self, now: DateTime<Utc>) -> i64 {
        now.timestamp() - i64::from(self.days) * SECONDS_PER_DAY
    }
}

/// Decide staleness: a channel is stale iff, after dropping messages
/// authored by an ignored user id, no messages remain in the window.
///
/// Messages without an author id (some integrations) count as activity.
/// Pure function; system events are expected to be filtered out upstream.
pub fn is_stale(messages: &[Message], ignored_users: &[String]) -> bool {
    !messages.iter().any(|m| !m.authored_by_any(ignored_users))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn msg(user: Option<&str>, text: &str) -> Message {
        Message {
            user: user.map(String::from),
            text: text.to_string(),
            ts: None,
            subtype: None,
        }
    }

    fn ignored() -> Vec<String> {
        vec!["USLACKBOT".to_string()]
    }

    // ── is_stale ────────────────────────────────────────────────────

    #[test]
    fn empty_history_is_stale() {
        assert!(is_stale(&[], &ignored()));
    }

    #[test]
    fn only_ignored_users_is_stale() {
        let messages = vec![msg(Some("USLACKBOT"), "beep"), msg(Some("USLACKBOT"), "boop")];
        assert!(is_stale(&messages, &ignored()));
    }

    #[test]
    fn one_human_message_is_not_stale() {
        let messages = vec![msg(Some("USLACKBOT"), "beep"), msg(Some("U123"), "hello")];
        assert!(!is_stale(&messages, &ignored()));
    }

    #[test]
    fn authorless_message_counts_as_activity() {
        let messages = vec![msg(None, "integration post")];
        assert!(!is_stale(&messages, &ignored()));
    }

    #[test]
    fn empty_ignore_list_counts_everyone() {
        let messages = vec![msg(Some("USLACKBOT"), "beep")];
        assert!(!is_stale(&messages, &[]));
    }

    #[test]
    fn all_messages_ignored_across_multiple_ids() {
        let ignored = vec!["USLACKBOT".to_string(), "UBOT2".to_string()];
        let messages = vec![msg(Some("USLACKBOT"), "a"), msg(Some("UBOT2"), "b")];
        assert!(is_stale(&messages, &ignored));
    }

    // ── ActivityWindow ──────────────────────────────────────────────

    #[test]
    fn oldest_ts_subtracts_whole_days() {
        let now = Utc.with_ymd_and_hms(2016, 2, 1, 12, 0, 0).unwrap();
        let window = ActivityWindow::new("general", 30);
        assert_eq!(window.oldest_ts(now), now.timestamp() - 30 * 86_400);
    }

    #[test]
    fn zero_day_window_bound_is_now() {
        let now = Utc.with_ymd_and_hms(2016, 2, 1, 0, 0, 0).unwrap();
        let window = ActivityWindow::new("general", 0);
        assert_eq!(window.oldest_ts(now), now.timestamp());
    }
}
