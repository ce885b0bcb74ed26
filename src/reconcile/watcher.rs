// ABOUTME: Tracks one asynchronous network deletion through its lifecycle.
// ABOUTME: A listener task writes the outcome into a slot that the polling loop reads.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::provider::{Operation, OperationEvent, OperationMetadata, ProviderError};

/// Latest known state of the tracked operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationState {
    /// Nothing tracked yet, or a failure was already handed to the loop.
    Untracked,
    /// Issued and not finished.
    Pending { id: String },
    /// Finished; `metadata` is `None` when the provider stopped reporting
    /// without a final status.
    Complete {
        id: String,
        metadata: Option<OperationMetadata>,
    },
    /// Finished with an error that has not been raised yet.
    Failed { id: String, error: ProviderError },
}

/// Owns the listener of at most one in-flight operation.
///
/// The listener runs as its own task and only ever writes the slot; it never
/// raises into the loop. The loop reads the slot on its next poll. Dropping
/// the watcher stops the listener.
#[derive(Debug)]
pub struct OperationWatcher {
    slot: Arc<Mutex<OperationState>>,
    listener: Option<JoinHandle<()>>,
}

impl Default for OperationWatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationWatcher {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(OperationState::Untracked)),
            listener: None,
        }
    }

    /// Start listening to `operation`. Replaces any previous listener.
    pub fn track<O: Operation>(&mut self, operation: O) {
        if let Some(previous) = self.listener.take() {
            previous.abort();
        }

        *self.slot.lock() = OperationState::Pending {
            id: operation.id().to_string(),
        };

        let slot = Arc::clone(&self.slot);
        self.listener = Some(tokio::spawn(listen(operation, slot)));
    }

    /// An operation has been issued and has not reached a terminal state.
    pub fn in_flight(&self) -> bool {
        matches!(*self.slot.lock(), OperationState::Pending { .. })
    }

    /// Take the stored failure, if any, leaving the slot untracked.
    pub fn take_error(&self) -> Option<ProviderError> {
        let mut slot = self.slot.lock();
        match std::mem::replace(&mut *slot, OperationState::Untracked) {
            OperationState::Failed { error, .. } => Some(error),
            other => {
                *slot = other;
                None
            }
        }
    }

    pub fn state(&self) -> OperationState {
        self.slot.lock().clone()
    }
}

impl Drop for OperationWatcher {
    fn drop(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.abort();
        }
    }
}

async fn listen<O: Operation>(mut operation: O, slot: Arc<Mutex<OperationState>>) {
    let id = operation.id().to_string();

    loop {
        match operation.next_event().await {
            Some(OperationEvent::Running(metadata)) => {
                tracing::info!(
                    operation = %id,
                    status = ?metadata.status,
                    started_at = ?metadata.started_at,
                    "network deletion has started"
                );
            }
            Some(OperationEvent::Complete(metadata)) => {
                tracing::info!(
                    operation = %id,
                    status = ?metadata.status,
                    progress = ?metadata.progress,
                    took = ?metadata.duration(),
                    "network deletion finished"
                );
                *slot.lock() = OperationState::Complete {
                    id,
                    metadata: Some(metadata),
                };
                return;
            }
            Some(OperationEvent::Error(error)) => {
                tracing::warn!(operation = %id, %error, "network deletion failed");
                *slot.lock() = OperationState::Failed { id, error };
                return;
            }
            None => {
                tracing::warn!(operation = %id, "operation stopped reporting before finishing");
                *slot.lock() = OperationState::Complete { id, metadata: None };
                return;
            }
        }
    }
}
