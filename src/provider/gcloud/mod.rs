// ABOUTME: Google Cloud provider adapter backed by the gcloud CLI.
// ABOUTME: Implements NetworkOps and RouteOps with `gcloud compute` subcommands.

mod errors;
mod operation;

pub use errors::parse_error;
pub use operation::GcloudOperation;

use async_trait::async_trait;
use serde::Deserialize;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use self::operation::OperationResource;
use super::{NetworkOps, ProviderError, RouteOps};
use crate::types::{ResourceName, Route};

/// Drives Compute Engine networks and routes through `gcloud`.
///
/// Authentication is whatever account the gcloud installation is logged in
/// with; this adapter never handles credentials itself.
#[derive(Debug, Clone)]
pub struct GcloudProvider {
    binary: String,
    project: Option<String>,
    configuration: Option<String>,
    pub(crate) operation_poll_interval: Duration,
}

impl Default for GcloudProvider {
    fn default() -> Self {
        Self::new("gcloud")
    }
}

impl GcloudProvider {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            project: None,
            configuration: None,
            operation_poll_interval: Duration::from_secs(2),
        }
    }

    /// Target project (`--project`).
    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Named gcloud configuration (`--configuration`).
    pub fn configuration(mut self, configuration: impl Into<String>) -> Self {
        self.configuration = Some(configuration.into());
        self
    }

    /// How often a pending delete operation is polled.
    pub fn operation_poll_interval(mut self, interval: Duration) -> Self {
        self.operation_poll_interval = interval;
        self
    }

    /// Run a gcloud command and return stdout.
    async fn run(&self, args: &[&str]) -> Result<String, ProviderError> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(args);
        if let Some(project) = &self.project {
            cmd.arg("--project").arg(project);
        }
        if let Some(configuration) = &self.configuration {
            cmd.arg("--configuration").arg(configuration);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!("Running: {} {}", self.binary, args.join(" "));

        let output = cmd.output().await.map_err(|e| {
            ProviderError::without_code(format!("failed to run {}: {}", self.binary, e))
        })?;

        if !output.status.success() {
            return Err(parse_error(&String::from_utf8_lossy(&output.stderr)));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    pub(crate) async fn describe_operation(
        &self,
        id: &str,
    ) -> Result<OperationResource, ProviderError> {
        let output = self
            .run(&[
                "compute",
                "operations",
                "describe",
                id,
                "--global",
                "--format=json",
            ])
            .await?;
        decode(&output)
    }
}

fn decode<T: for<'de> Deserialize<'de>>(output: &str) -> Result<T, ProviderError> {
    serde_json::from_str(output)
        .map_err(|e| ProviderError::without_code(format!("unexpected gcloud output: {}", e)))
}

/// `networks delete --async` prints either one operation or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum AsyncResponse {
    Many(Vec<OperationResource>),
    One(OperationResource),
}

impl AsyncResponse {
    fn into_operation_name(self) -> Option<String> {
        match self {
            AsyncResponse::Many(ops) => ops.into_iter().next().map(|op| op.name),
            AsyncResponse::One(op) => Some(op.name),
        }
    }
}

#[async_trait]
impl NetworkOps for GcloudProvider {
    type Operation = GcloudOperation;

    async fn network_exists(&self, name: &ResourceName) -> Result<bool, ProviderError> {
        match self
            .run(&[
                "compute",
                "networks",
                "describe",
                name.as_str(),
                "--format=json",
            ])
            .await
        {
            Ok(_) => Ok(true),
            Err(err) if err.has_code(404) => Ok(false),
            Err(err) => Err(err),
        }
    }

    async fn create_network(&self, name: &ResourceName) -> Result<(), ProviderError> {
        self.run(&[
            "compute",
            "networks",
            "create",
            name.as_str(),
            "--subnet-mode=custom",
            "--format=json",
        ])
        .await?;
        Ok(())
    }

    async fn delete_network(&self, name: &ResourceName) -> Result<GcloudOperation, ProviderError> {
        let output = self
            .run(&[
                "compute",
                "networks",
                "delete",
                name.as_str(),
                "--async",
                "--quiet",
                "--format=json",
            ])
            .await?;

        let id = decode::<AsyncResponse>(&output)?
            .into_operation_name()
            .ok_or_else(|| {
                ProviderError::without_code(format!(
                    "gcloud returned no operation for deletion of network {}",
                    name
                ))
            })?;

        Ok(GcloudOperation::new(self.clone(), id))
    }
}

#[async_trait]
impl RouteOps for GcloudProvider {
    async fn list_routes(&self, network: &ResourceName) -> Result<Vec<Route>, ProviderError> {
        let filter = format!("--filter=network~/{}$", network);
        let output = self
            .run(&["compute", "routes", "list", filter.as_str(), "--format=json"])
            .await?;

        if output.trim().is_empty() {
            return Ok(Vec::new());
        }

        decode(&output)
    }

    async fn delete_route(&self, name: &str) -> Result<(), ProviderError> {
        self.run(&["compute", "routes", "delete", name, "--quiet"])
            .await?;
        Ok(())
    }
}
