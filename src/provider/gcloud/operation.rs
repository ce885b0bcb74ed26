// ABOUTME: Compute Engine operation polling for asynchronous network deletion.
// ABOUTME: Turns `gcloud compute operations describe` snapshots into lifecycle events.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::GcloudProvider;
use crate::provider::{
    Operation, OperationEvent, OperationMetadata, OperationStatus, ProviderError,
};

/// Snapshot of a global Compute operation resource.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OperationResource {
    pub name: String,
    pub status: ApiStatus,
    pub progress: Option<u8>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub http_error_status_code: Option<u16>,
    pub http_error_message: Option<String>,
    pub error: Option<OperationErrorBody>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum ApiStatus {
    Pending,
    Running,
    Done,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct OperationErrorBody {
    #[serde(default)]
    pub errors: Vec<OperationErrorItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OperationErrorItem {
    pub code: Option<String>,
    pub message: Option<String>,
}

impl OperationResource {
    pub fn metadata(&self) -> OperationMetadata {
        let status = match self.status {
            ApiStatus::Pending => OperationStatus::Pending,
            ApiStatus::Running => OperationStatus::Running,
            ApiStatus::Done => OperationStatus::Done,
        };
        OperationMetadata {
            status,
            progress: self.progress,
            started_at: self.start_time,
            ended_at: self.end_time,
        }
    }

    /// The failure recorded on a finished operation, if any.
    pub fn failure(&self) -> Option<ProviderError> {
        let errors = self
            .error
            .as_ref()
            .map(|body| body.errors.as_slice())
            .unwrap_or_default();

        if errors.is_empty() {
            return None;
        }

        let message = errors
            .iter()
            .map(|item| match (&item.code, &item.message) {
                (Some(code), Some(message)) => format!("{code}: {message}"),
                (Some(code), None) => code.clone(),
                (None, Some(message)) => message.clone(),
                (None, None) => "unknown operation error".to_string(),
            })
            .collect::<Vec<_>>()
            .join("; ");

        let message = match &self.http_error_message {
            Some(http) => format!("{http}: {message}"),
            None => message,
        };

        Some(ProviderError::new(self.http_error_status_code, message))
    }
}

/// A network deletion running on the Compute side, observed by polling.
#[derive(Debug)]
pub struct GcloudOperation {
    cli: GcloudProvider,
    id: String,
    reported_running: bool,
    finished: bool,
}

impl GcloudOperation {
    pub(crate) fn new(cli: GcloudProvider, id: String) -> Self {
        Self {
            cli,
            id,
            reported_running: false,
            finished: false,
        }
    }
}

#[async_trait]
impl Operation for GcloudOperation {
    fn id(&self) -> &str {
        &self.id
    }

    async fn next_event(&mut self) -> Option<OperationEvent> {
        if self.finished {
            return None;
        }

        loop {
            let resource = match self.cli.describe_operation(&self.id).await {
                Ok(resource) => resource,
                Err(err) => {
                    self.finished = true;
                    return Some(OperationEvent::Error(err));
                }
            };

            match resource.status {
                ApiStatus::Done => {
                    self.finished = true;
                    return Some(match resource.failure() {
                        Some(err) => OperationEvent::Error(err),
                        None => OperationEvent::Complete(resource.metadata()),
                    });
                }
                ApiStatus::Running if !self.reported_running => {
                    self.reported_running = true;
                    return Some(OperationEvent::Running(resource.metadata()));
                }
                _ => tokio::time::sleep(self.cli.operation_poll_interval).await,
            }
        }
    }
}
