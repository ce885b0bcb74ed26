// ABOUTME: Wait durations used by the network reconciliation loops.
// ABOUTME: Poll cadence, not-ready backoff, route settle delay and route backoff.

use serde::Deserialize;
use std::time::Duration;

/// Fixed waits between reconciliation steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TimingConfig {
    /// Pause between existence polls.
    #[serde(default = "default_poll_interval", with = "humantime_serde")]
    pub poll_interval: Duration,

    /// Wait after a create failed because a parent resource is not ready.
    #[serde(default = "default_not_ready_backoff", with = "humantime_serde")]
    pub not_ready_backoff: Duration,

    /// Wait before inspecting routes, so the provider can detach them.
    #[serde(default = "default_settle_delay", with = "humantime_serde")]
    pub settle_delay: Duration,

    /// Wait after a batch of route deletions before starting over.
    #[serde(default = "default_route_backoff", with = "humantime_serde")]
    pub route_backoff: Duration,
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(1)
}

fn default_not_ready_backoff() -> Duration {
    Duration::from_secs(5)
}

fn default_settle_delay() -> Duration {
    Duration::from_secs(20)
}

fn default_route_backoff() -> Duration {
    Duration::from_secs(5)
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            poll_interval: default_poll_interval(),
            not_ready_backoff: default_not_ready_backoff(),
            settle_delay: default_settle_delay(),
            route_backoff: default_route_backoff(),
        }
    }
}
