// ABOUTME: Status command implementation.
// ABOUTME: Reports existence of a network and the routes a teardown would delete.

use netward::config::Config;
use netward::error::Result;
use netward::output::Output;
use netward::provider::{NetworkOps, RouteOps};
use netward::types::{ResourceName, Route};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct NetworkStatus {
    network: String,
    exists: bool,
    blocking_routes: Vec<Route>,
    self_routes: Vec<String>,
}

pub async fn status(config: &Config, name: &str, output: &Output) -> Result<()> {
    let name = ResourceName::new(name)?;
    let provider = config.provider.build()?;

    let exists = provider.network_exists(&name).await?;
    let routes = if exists {
        provider.list_routes(&name).await?
    } else {
        Vec::new()
    };

    let (blocking_routes, others): (Vec<Route>, Vec<Route>) = routes
        .into_iter()
        .filter(|route| route.belongs_to(&name))
        .partition(|route| route.is_cleanup_target(&name));

    let status = NetworkStatus {
        network: name.to_string(),
        exists,
        blocking_routes,
        self_routes: others.into_iter().map(|route| route.name).collect(),
    };

    output.report(&describe(&status), &status);
    Ok(())
}

fn describe(status: &NetworkStatus) -> String {
    if !status.exists {
        return format!("Network {}: absent", status.network);
    }

    let mut lines = vec![format!("Network {}: present", status.network)];
    if status.blocking_routes.is_empty() {
        lines.push("  no routes block deletion".to_string());
    } else {
        lines.push(format!(
            "  {} route(s) block deletion:",
            status.blocking_routes.len()
        ));
        for route in &status.blocking_routes {
            lines.push(format!("    - {}", route.name));
        }
    }
    if !status.self_routes.is_empty() {
        lines.push(format!(
            "  {} self-route(s) kept: {}",
            status.self_routes.len(),
            status.self_routes.join(", ")
        ));
    }
    lines.join("\n")
}
