//! Sweep orchestration — walk every channel, classify, then act.
//!
//! Channels are visited strictly sequentially in lexicographic name order;
//! irreversible actions (notice before archive) must not race, and the
//! one-call-at-a-time pattern is the only rate limiting applied. A failure
//! on one channel aborts the run; callers wanting per-channel resilience
//! wrap each run themselves.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::classify::{is_stale, ActivityWindow};
use crate::config::{NoticeTexts, SweepConfig};
use crate::error::Result;
use crate::notify::{warn_if_needed, MessageSink, SlackSink};
use crate::policy::RetirementPolicy;
use crate::slack::{ChannelSnapshot, Message, MessageSource, SlackClient};

/// Orchestrates staleness sweeps over one workspace.
pub struct Sweeper {
    source: Arc<dyn MessageSource>,
    sink: Arc<dyn MessageSink>,
    notices: NoticeTexts,
    ignored_users: Vec<String>,
    policy: RetirementPolicy,
}

impl Sweeper {
    pub fn new(
        source: Arc<dyn MessageSource>,
        sink: Arc<dyn MessageSink>,
        notices: NoticeTexts,
        ignored_users: Vec<String>,
        policy: RetirementPolicy,
    ) -> Self {
        Self {
            source,
            sink,
            notices,
            ignored_users,
            policy,
        }
    }

    /// Wire up the production client and sink from a config.
    pub fn from_config(config: &SweepConfig, notices: NoticeTexts) -> Self {
        Self::new(
            Arc::new(SlackClient::new(config)),
            Arc::new(SlackSink::new(config)),
            notices,
            config.ignored_users.clone(),
            RetirementPolicy::new(config.earliest_archive_date),
        )
    }

    /// Fetch a fresh snapshot of non-archived channels.
    ///
    /// The snapshot is immutable and per-run: callers refresh it explicitly
    /// and pass it into each run rather than relying on a cached listing.
    pub async fn snapshot(&self) -> Result<ChannelSnapshot> {
        Ok(self.source.list_channels(true).await?)
    }

    async fn recent(&self, name: &str, id: &str, days: u32) -> Result<Vec<Message>> {
        let window = ActivityWindow::new(name, days);
        Ok(self.source.recent_messages(id, &window).await?)
    }

    /// Warn every channel stale over the trailing `days`-day window.
    pub async fn run_warn_all(&self, snapshot: &ChannelSnapshot, days: u32) -> Result<()> {
        for (name, id) in snapshot.iter() {
            let messages = self.recent(name, id, days).await?;
            if is_stale(&messages, &self.ignored_users) {
                warn_if_needed(self.sink.as_ref(), name, &self.notices.warning, &messages).await?;
            } else {
                tracing::info!(channel = name, "Not stale");
            }
        }
        Ok(())
    }

    /// Safe-archive every channel stale over the trailing `days`-day window,
    /// gated on today's date.
    pub async fn run_archive_all(&self, snapshot: &ChannelSnapshot, days: u32) -> Result<()> {
        self.run_archive_all_on(snapshot, days, Local::now().date_naive())
            .await
    }

    /// Same as [`run_archive_all`](Self::run_archive_all) with an explicit
    /// gate date.
    pub async fn run_archive_all_on(
        &self,
        snapshot: &ChannelSnapshot,
        days: u32,
        today: NaiveDate,
    ) -> Result<()> {
        for (name, id) in snapshot.iter() {
            let messages = self.recent(name, id, days).await?;
            if is_stale(&messages, &self.ignored_users) {
                tracing::info!(channel = name, "Attempting to safe-archive");
                self.policy
                    .safe_archive(
                        self.source.as_ref(),
                        self.sink.as_ref(),
                        name,
                        id,
                        &self.notices.closure,
                        today,
                    )
                    .await?;
            }
        }
        Ok(())
    }

    /// Read-only classification pass: names of stale channels, in order.
    pub async fn list_stale(&self, snapshot: &ChannelSnapshot, days: u32) -> Result<Vec<String>> {
        let mut stale = Vec::new();
        for (name, id) in snapshot.iter() {
            let messages = self.recent(name, id, days).await?;
            if is_stale(&messages, &self.ignored_users) {
                stale.push(name.to_string());
            }
        }
        Ok(stale)
    }
}
