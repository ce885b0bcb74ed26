// ABOUTME: Reconcile error types with SNAFU pattern.
// ABOUTME: One variant per failing provider call, each keeping the provider error as source.

use snafu::Snafu;

use crate::provider::ProviderError;
use crate::types::ResourceName;

/// A fatal failure that ended an ensure call.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ReconcileError {
    #[snafu(display("failed to check whether network {network} exists: {source}"))]
    ExistenceCheck {
        network: ResourceName,
        source: ProviderError,
    },

    #[snafu(display("failed to create network {network}: {source}"))]
    Create {
        network: ResourceName,
        source: ProviderError,
    },

    #[snafu(display("failed to list routes of network {network}: {source}"))]
    ListRoutes {
        network: ResourceName,
        source: ProviderError,
    },

    #[snafu(display("failed to delete route {route} of network {network}: {source}"))]
    DeleteRoute {
        network: ResourceName,
        route: String,
        source: ProviderError,
    },

    #[snafu(display("failed to delete network {network}: {source}"))]
    DeleteNetwork {
        network: ResourceName,
        source: ProviderError,
    },

    #[snafu(display("deletion of network {network} failed: {source}"))]
    OperationFailed {
        network: ResourceName,
        source: ProviderError,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileErrorKind {
    ExistenceCheck,
    Create,
    ListRoutes,
    DeleteRoute,
    DeleteNetwork,
    /// The asynchronous delete operation reported an error.
    OperationFailed,
}

impl ReconcileError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ReconcileErrorKind {
        match self {
            ReconcileError::ExistenceCheck { .. } => ReconcileErrorKind::ExistenceCheck,
            ReconcileError::Create { .. } => ReconcileErrorKind::Create,
            ReconcileError::ListRoutes { .. } => ReconcileErrorKind::ListRoutes,
            ReconcileError::DeleteRoute { .. } => ReconcileErrorKind::DeleteRoute,
            ReconcileError::DeleteNetwork { .. } => ReconcileErrorKind::DeleteNetwork,
            ReconcileError::OperationFailed { .. } => ReconcileErrorKind::OperationFailed,
        }
    }

    /// The provider error exactly as the provider reported it.
    pub fn provider_error(&self) -> &ProviderError {
        match self {
            ReconcileError::ExistenceCheck { source, .. }
            | ReconcileError::Create { source, .. }
            | ReconcileError::ListRoutes { source, .. }
            | ReconcileError::DeleteRoute { source, .. }
            | ReconcileError::DeleteNetwork { source, .. }
            | ReconcileError::OperationFailed { source, .. } => source,
        }
    }

    /// Network the failed call was converging.
    pub fn network(&self) -> &ResourceName {
        match self {
            ReconcileError::ExistenceCheck { network, .. }
            | ReconcileError::Create { network, .. }
            | ReconcileError::ListRoutes { network, .. }
            | ReconcileError::DeleteRoute { network, .. }
            | ReconcileError::DeleteNetwork { network, .. }
            | ReconcileError::OperationFailed { network, .. } => network,
        }
    }
}
