// ABOUTME: Teardown command implementation.
// ABOUTME: Deletes the network's routes, then the network, and waits until it is gone.

use super::deadline::{effective_timeout, with_deadline};
use netward::config::Config;
use netward::error::Result;
use netward::output::Output;
use netward::reconcile::{NetworkReconciler, NetworkRequest};
use netward::types::ResourceName;

pub async fn teardown(
    config: &Config,
    name: &str,
    timeout: Option<u64>,
    output: &Output,
) -> Result<()> {
    let request = NetworkRequest::new(ResourceName::new(name)?);
    let provider = config.provider.build()?;
    let reconciler = NetworkReconciler::with_timing(&provider, config.timing);

    output.progress(&format!(
        "  → Tearing down network {} (routes first, settle delay {}s)...",
        request.name,
        config.timing.settle_delay.as_secs()
    ));

    with_deadline(
        &request.name,
        effective_timeout(config, timeout),
        reconciler.ensure_absent(&request),
    )
    .await?;

    output.success(&format!("Network {} is gone", request.name));
    Ok(())
}
