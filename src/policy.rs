//! Retirement policy — date-gated channel archival.
//!
//! Archival is irreversible, so it is gated on a fixed earliest-eligible
//! date independent of per-channel staleness. Before that date the channel
//! gets a deferred notice instead of being archived.

use chrono::NaiveDate;

use crate::error::Result;
use crate::notify::MessageSink;
use crate::slack::MessageSource;

/// Outcome of a safe-archive attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ArchiveOutcome {
    /// Channel was archived; carries the raw archive response payload.
    Archived(serde_json::Value),
    /// Too early to archive; a deferred notice was sent instead.
    Deferred,
}

/// Date gate for archival.
#[derive(Debug, Clone, Copy)]
pub struct RetirementPolicy {
    pub earliest_archive_date: NaiveDate,
}

impl RetirementPolicy {
    pub fn new(earliest_archive_date: NaiveDate) -> Self {
        Self {
            earliest_archive_date,
        }
    }

    /// Archival is permitted strictly after the earliest date.
    pub fn eligible_on(&self, today: NaiveDate) -> bool {
        today > self.earliest_archive_date
    }

    /// Archive the channel if the gate is open, else send a deferred notice.
    ///
    /// On the eligible path the closure notice is sent before the archive
    /// call; an archive failure propagates without retry.
    pub async fn safe_archive(
        &self,
        source: &dyn MessageSource,
        sink: &dyn MessageSink,
        channel_name: &str,
        channel_id: &str,
        closure_text: &str,
        today: NaiveDate,
    ) -> Result<ArchiveOutcome> {
        if self.eligible_on(today) {
            sink.say(channel_name, closure_text).await?;
            let payload = source.archive_channel(channel_id).await?;
            tracing::info!(channel = channel_name, "Archived");
            Ok(ArchiveOutcome::Archived(payload))
        } else {
            let message = format!(
                "Just FYI, I would have archived this channel but it's not yet {}",
                self.earliest_archive_date
            );
            sink.say(channel_name, &message).await?;
            tracing::info!(
                channel = channel_name,
                earliest = %self.earliest_archive_date,
                "Archive deferred"
            );
            Ok(ArchiveOutcome::Deferred)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::result::Result;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::classify::ActivityWindow;
    use crate::error::{NotifyError, SlackError};
    use crate::slack::{ChannelSnapshot, Message};

    /// Shared call log so ordering across sink and source is observable.
    type CallLog = Arc<Mutex<Vec<String>>>;

    struct FakeSource {
        log: CallLog,
    }

    #[async_trait]
    impl MessageSource for FakeSource {
        async fn list_channels(&self, _exclude_archived: bool) -> Result<ChannelSnapshot, SlackError> {
            Ok(ChannelSnapshot::default())
        }

        async fn recent_messages(
            &self,
            _channel_id: &str,
            _window: &ActivityWindow,
        ) -> Result<Vec<Message>, SlackError> {
            Ok(Vec::new())
        }

        async fn archive_channel(&self, channel_id: &str) -> Result<serde_json::Value, SlackError> {
            self.log.lock().unwrap().push(format!("archive:{channel_id}"));
            Ok(serde_json::json!({"ok": true}))
        }
    }

    struct FakeSink {
        log: CallLog,
    }

    #[async_trait]
    impl MessageSink for FakeSink {
        async fn say(&self, channel_name: &str, text: &str) -> Result<(), NotifyError> {
            self.log
                .lock()
                .unwrap()
                .push(format!("say:{channel_name}:{text}"));
            Ok(())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fakes() -> (FakeSource, FakeSink, CallLog) {
        let log: CallLog = Arc::new(Mutex::new(Vec::new()));
        (
            FakeSource { log: Arc::clone(&log) },
            FakeSink { log: Arc::clone(&log) },
            log,
        )
    }

    // ── Eligibility ─────────────────────────────────────────────────

    #[test]
    fn day_before_earliest_is_not_eligible() {
        let policy = RetirementPolicy::new(date(2016, 1, 28));
        assert!(!policy.eligible_on(date(2016, 1, 27)));
    }

    #[test]
    fn earliest_date_itself_is_not_eligible() {
        let policy = RetirementPolicy::new(date(2016, 1, 28));
        assert!(!policy.eligible_on(date(2016, 1, 28)));
    }

    #[test]
    fn day_after_earliest_is_eligible() {
        let policy = RetirementPolicy::new(date(2016, 1, 28));
        assert!(policy.eligible_on(date(2016, 1, 29)));
    }

    // ── safe_archive ────────────────────────────────────────────────

    #[tokio::test]
    async fn eligible_path_sends_closure_then_archives() {
        let (source, sink, log) = fakes();
        let policy = RetirementPolicy::new(date(2016, 1, 28));

        let outcome = policy
            .safe_archive(&source, &sink, "general", "C1", "closing up", date(2016, 1, 29))
            .await
            .unwrap();

        assert_eq!(outcome, ArchiveOutcome::Archived(serde_json::json!({"ok": true})));
        let calls = log.lock().unwrap();
        assert_eq!(*calls, vec!["say:general:closing up", "archive:C1"]);
    }

    #[tokio::test]
    async fn ineligible_path_defers_with_notice_and_no_archive() {
        let (source, sink, log) = fakes();
        let policy = RetirementPolicy::new(date(2016, 1, 28));

        let outcome = policy
            .safe_archive(&source, &sink, "general", "C1", "closing up", date(2016, 1, 27))
            .await
            .unwrap();

        assert_eq!(outcome, ArchiveOutcome::Deferred);
        let calls = log.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].starts_with("say:general:"));
        assert!(calls[0].contains("2016-01-28"));
        assert!(!calls.iter().any(|c| c.starts_with("archive:")));
    }
}
