// ABOUTME: Convergence loops that drive a network to present or absent.
// ABOUTME: Polls existence, mutates, classifies failures and retries on a fixed cadence.

use snafu::ResultExt;

use super::classify::{Disposition, ErrorClassifier, Mutation};
use super::error::{
    DeleteNetworkSnafu, DeleteRouteSnafu, ExistenceCheckSnafu, ListRoutesSnafu, ReconcileError,
};
use super::watcher::OperationWatcher;
use crate::config::TimingConfig;
use crate::provider::{Operation, Provider};
use crate::types::{ResourceName, cleanup_targets};

/// Target of a teardown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkRequest {
    pub name: ResourceName,
}

impl NetworkRequest {
    pub fn new(name: ResourceName) -> Self {
        Self { name }
    }
}

/// Whether a network was found or had to be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    AlreadyPresent,
    /// Missing on the first check; this call requested creation (or waited
    /// for a concurrent creation to show up).
    Created,
}

/// Outcome of one pass over the teardown branch.
enum TeardownStep {
    RoutesDeleted(usize),
    DeletionRequested,
}

/// Drives networks to a target state through a provider.
///
/// Holds no per-network state: every call owns its own watcher, so calls for
/// different networks can run concurrently. Calls for the same network must be
/// serialized by the caller.
///
/// Neither loop has an iteration cap. Callers that need a deadline wrap the
/// call in `tokio::time::timeout`; an abandoned call leaves the in-flight
/// provider request to finish on its own.
#[derive(Debug)]
pub struct NetworkReconciler<'a, P> {
    provider: &'a P,
    timing: TimingConfig,
    classifier: ErrorClassifier,
}

impl<'a, P: Provider> NetworkReconciler<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self::with_timing(provider, TimingConfig::default())
    }

    pub fn with_timing(provider: &'a P, timing: TimingConfig) -> Self {
        Self {
            provider,
            timing,
            classifier: ErrorClassifier::new(timing.not_ready_backoff),
        }
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Make sure the network exists, creating it if needed.
    ///
    /// Returns `true` once the network is present, whether or not this call
    /// created it. Use [`NetworkReconciler::create_if_missing`] to tell the
    /// two apart.
    ///
    /// # Errors
    ///
    /// Returns the first provider error that is neither "parent not ready"
    /// nor "already exists".
    pub async fn ensure_exists(&self, name: &ResourceName) -> Result<bool, ReconcileError> {
        self.create_if_missing(name).await.map(|_| true)
    }

    /// Same loop as [`NetworkReconciler::ensure_exists`], reporting whether
    /// the network was there on the first check.
    pub async fn create_if_missing(&self, name: &ResourceName) -> Result<Presence, ReconcileError> {
        let mut presence = Presence::AlreadyPresent;

        loop {
            if self.network_exists(name).await? {
                tracing::debug!(network = %name, ?presence, "network exists");
                return Ok(presence);
            }
            presence = Presence::Created;

            match self.provider.create_network(name).await {
                Ok(()) => tracing::debug!(network = %name, "network creation requested"),
                Err(source) => match self.classifier.classify(Mutation::Create, &source) {
                    Disposition::Retry { after } => {
                        tracing::info!(
                            network = %name,
                            "retry in {}s ({})",
                            after.as_secs(),
                            source.message
                        );
                        tokio::time::sleep(after).await;
                        continue;
                    }
                    Disposition::Ignore => {
                        tracing::info!(network = %name, error = %source, "network already exists");
                    }
                    Disposition::Fatal => {
                        return Err(ReconcileError::Create {
                            network: name.clone(),
                            source,
                        });
                    }
                },
            }

            tokio::time::sleep(self.timing.poll_interval).await;
        }
    }

    /// Make sure the network is gone, removing its routes first.
    ///
    /// # Errors
    ///
    /// Returns the first provider error other than "not found", and any error
    /// the delete operation reported, even if the network has disappeared
    /// since.
    pub async fn ensure_absent(&self, request: &NetworkRequest) -> Result<(), ReconcileError> {
        let name = &request.name;
        let mut watcher = OperationWatcher::new();

        loop {
            let exists = self.network_exists(name).await;

            // A stored operation failure outranks a failed existence check
            if let Some(source) = watcher.take_error() {
                if let Err(err) = &exists {
                    tracing::warn!(network = %name, error = %err, "existence check failed too");
                }
                return Err(ReconcileError::OperationFailed {
                    network: name.clone(),
                    source,
                });
            }
            let exists = exists?;

            if !exists {
                tracing::debug!(network = %name, "network is absent");
                return Ok(());
            }

            if watcher.in_flight() {
                tokio::time::sleep(self.timing.poll_interval).await;
                continue;
            }

            // Give the provider time to detach routes of a network being torn down
            tokio::time::sleep(self.timing.settle_delay).await;

            match self.teardown_step(name, &mut watcher).await {
                Ok(TeardownStep::RoutesDeleted(count)) => {
                    tracing::info!(
                        network = %name,
                        "deleted {} route(s), checking again in {}s",
                        count,
                        self.timing.route_backoff.as_secs()
                    );
                    tokio::time::sleep(self.timing.route_backoff).await;
                }
                Ok(TeardownStep::DeletionRequested) => {}
                Err(err) => match self
                    .classifier
                    .classify(Mutation::Destroy, err.provider_error())
                {
                    Disposition::Ignore => {
                        tracing::info!(network = %name, error = %err, "already gone, re-checking");
                    }
                    Disposition::Retry { after } => {
                        tracing::info!(network = %name, "retry in {}s ({})", after.as_secs(), err);
                        tokio::time::sleep(after).await;
                    }
                    Disposition::Fatal => return Err(err),
                },
            }
        }
    }

    async fn network_exists(&self, name: &ResourceName) -> Result<bool, ReconcileError> {
        self.provider
            .network_exists(name)
            .await
            .context(ExistenceCheckSnafu {
                network: name.clone(),
            })
    }

    /// Delete the routes blocking `name`, or the network itself once none are left.
    async fn teardown_step(
        &self,
        name: &ResourceName,
        watcher: &mut OperationWatcher,
    ) -> Result<TeardownStep, ReconcileError> {
        let routes = self
            .provider
            .list_routes(name)
            .await
            .context(ListRoutesSnafu {
                network: name.clone(),
            })?;
        let routes = cleanup_targets(routes, name);

        for route in &routes {
            tracing::info!(network = %name, route = %route.name, "Destroying route");
            self.provider
                .delete_route(&route.name)
                .await
                .context(DeleteRouteSnafu {
                    network: name.clone(),
                    route: route.name.clone(),
                })?;
        }

        if !routes.is_empty() {
            return Ok(TeardownStep::RoutesDeleted(routes.len()));
        }

        let operation = self
            .provider
            .delete_network(name)
            .await
            .context(DeleteNetworkSnafu {
                network: name.clone(),
            })?;

        tracing::info!(network = %name, operation = operation.id(), "network deletion requested");
        watcher.track(operation);

        Ok(TeardownStep::DeletionRequested)
    }
}
