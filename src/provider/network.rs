// ABOUTME: Network capability trait and the long-running operation handle.
// ABOUTME: Existence check, create, and asynchronous delete of VPC networks.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::ProviderError;
use crate::types::ResourceName;

/// Network operations: exists, create, delete.
#[async_trait]
pub trait NetworkOps: Send + Sync {
    /// Handle for an asynchronous delete issued by [`NetworkOps::delete_network`].
    type Operation: Operation;

    /// Check if a network exists right now. Never cached.
    async fn network_exists(&self, name: &ResourceName) -> Result<bool, ProviderError>;

    /// Request creation of a network. Success does not mean it is visible yet.
    async fn create_network(&self, name: &ResourceName) -> Result<(), ProviderError>;

    /// Request deletion of a network and return the operation tracking it.
    async fn delete_network(&self, name: &ResourceName) -> Result<Self::Operation, ProviderError>;
}

/// A provider-side long-running job.
///
/// Lifecycle: pending, running, then either complete or error. The handle is
/// a stream of lifecycle events consumed by one listener.
#[async_trait]
pub trait Operation: Send + 'static {
    /// Provider identifier of the operation.
    fn id(&self) -> &str;

    /// Wait for the next lifecycle event.
    ///
    /// Returns `None` once the operation has nothing more to report.
    async fn next_event(&mut self) -> Option<OperationEvent>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationEvent {
    Running(OperationMetadata),
    Complete(OperationMetadata),
    Error(ProviderError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationStatus {
    Pending,
    Running,
    Done,
}

/// Provider-reported progress of an operation, kept for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationMetadata {
    pub status: OperationStatus,
    pub progress: Option<u8>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl OperationMetadata {
    pub fn new(status: OperationStatus) -> Self {
        Self {
            status,
            progress: None,
            started_at: None,
            ended_at: None,
        }
    }

    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_times(mut self, started_at: DateTime<Utc>, ended_at: DateTime<Utc>) -> Self {
        self.started_at = Some(started_at);
        self.ended_at = Some(ended_at);
        self
    }

    /// Provider-side run time, when both ends were reported.
    pub fn duration(&self) -> Option<chrono::Duration> {
        Some(self.ended_at? - self.started_at?)
    }
}
