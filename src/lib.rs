//! Chansweep — stale Slack channel detection and retirement.

pub mod classify;
pub mod config;
pub mod error;
pub mod notify;
pub mod policy;
pub mod slack;
pub mod sweep;
