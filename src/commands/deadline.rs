// ABOUTME: Outer deadline for reconciliation runs.
// ABOUTME: The loops never give up on their own; the CLI races them against a timeout.

use netward::config::Config;
use netward::error::{Error, Result};
use netward::reconcile::ReconcileError;
use netward::types::ResourceName;
use std::future::Future;
use std::time::Duration;

/// Deadline from `--timeout` (seconds, 0 disables) or the config file.
pub fn effective_timeout(config: &Config, override_secs: Option<u64>) -> Option<Duration> {
    match override_secs {
        Some(0) => None,
        Some(secs) => Some(Duration::from_secs(secs)),
        None => config.timeout,
    }
}

/// Run `call`, abandoning it once `limit` elapses.
///
/// Abandoning drops the in-flight provider call; whatever it already
/// requested keeps going on the provider side.
pub async fn with_deadline<T, F>(network: &ResourceName, limit: Option<Duration>, call: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, ReconcileError>>,
{
    match limit {
        Some(after) => tokio::time::timeout(after, call)
            .await
            .map_err(|_| Error::Timeout {
                network: network.to_string(),
                after,
            })?
            .map_err(Error::from),
        None => call.await.map_err(Error::from),
    }
}
