// ABOUTME: Ensure command implementation.
// ABOUTME: Creates the network if missing and waits until the provider reports it.

use super::deadline::{effective_timeout, with_deadline};
use netward::config::Config;
use netward::error::Result;
use netward::output::Output;
use netward::reconcile::{NetworkReconciler, Presence};
use netward::types::ResourceName;

pub async fn ensure(
    config: &Config,
    name: &str,
    timeout: Option<u64>,
    output: &Output,
) -> Result<()> {
    let name = ResourceName::new(name)?;
    let provider = config.provider.build()?;
    let reconciler = NetworkReconciler::with_timing(&provider, config.timing);

    output.progress(&format!("  → Ensuring network {} exists...", name));

    let presence = with_deadline(
        &name,
        effective_timeout(config, timeout),
        reconciler.create_if_missing(&name),
    )
    .await?;

    match presence {
        Presence::AlreadyPresent => output.success(&format!("Network {} already exists", name)),
        Presence::Created => output.success(&format!("Network {} created", name)),
    }

    Ok(())
}
