// ABOUTME: In-memory provider that records every call it receives.
// ABOUTME: Failures, visibility lag and delete operation outcomes are scripted per test.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use netward::provider::{
    NetworkOps, Operation, OperationEvent, OperationMetadata, OperationStatus, ProviderError,
    RouteOps,
};
use netward::types::{ResourceName, Route};

/// A provider call as the fake received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Exists(String),
    Create(String),
    DeleteNetwork(String),
    ListRoutes(String),
    DeleteRoute(String),
}

impl Call {
    /// Everything except existence checks.
    pub fn is_mutation_or_listing(&self) -> bool {
        !matches!(self, Call::Exists(_))
    }
}

/// How the operation returned by `delete_network` ends.
#[derive(Debug, Clone)]
pub enum DeletePlan {
    /// Reports running, then completes after `after` and removes the network.
    Complete { after: Duration },
    /// Reports running, then fails after `after`. The network is removed
    /// anyway when `network_vanishes` is set.
    Fail {
        after: Duration,
        error: ProviderError,
        network_vanishes: bool,
    },
}

impl Default for DeletePlan {
    fn default() -> Self {
        DeletePlan::Complete {
            after: Duration::from_secs(3),
        }
    }
}

#[derive(Default)]
struct State {
    networks: HashSet<String>,
    routes: Vec<Route>,
    calls: Vec<Call>,
    /// Polls a freshly created network stays invisible for.
    visibility_lag: u32,
    invisible: HashMap<String, u32>,
    exists_errors: VecDeque<ProviderError>,
    exists_checks: usize,
    exists_errors_at: HashMap<usize, ProviderError>,
    create_errors: VecDeque<(ProviderError, bool)>,
    list_errors: VecDeque<ProviderError>,
    delete_route_errors: VecDeque<ProviderError>,
    delete_network_errors: VecDeque<(ProviderError, bool)>,
    delete_plan: DeletePlan,
}

/// Shared handle to the fake. Clones observe the same state.
#[derive(Clone, Default)]
pub struct FakeCloud {
    state: Arc<Mutex<State>>,
}

impl FakeCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_network(self, name: &str) -> Self {
        self.state.lock().networks.insert(name.to_string());
        self
    }

    pub fn with_route(self, route: Route) -> Self {
        self.state.lock().routes.push(route);
        self
    }

    pub fn with_visibility_lag(self, polls: u32) -> Self {
        self.state.lock().visibility_lag = polls;
        self
    }

    pub fn with_delete_plan(self, plan: DeletePlan) -> Self {
        self.state.lock().delete_plan = plan;
        self
    }

    pub fn fail_next_exists(&self, error: ProviderError) {
        self.state.lock().exists_errors.push_back(error);
    }

    /// Fail the `nth` existence check (1-based) of the whole run.
    pub fn fail_exists_at(&self, nth: usize, error: ProviderError) {
        self.state.lock().exists_errors_at.insert(nth, error);
    }

    /// Fail the next create. With `creates_anyway` the network appears
    /// regardless, as when a concurrent caller won the race.
    pub fn fail_next_create(&self, error: ProviderError, creates_anyway: bool) {
        self.state
            .lock()
            .create_errors
            .push_back((error, creates_anyway));
    }

    pub fn fail_next_list(&self, error: ProviderError) {
        self.state.lock().list_errors.push_back(error);
    }

    pub fn fail_next_route_delete(&self, error: ProviderError) {
        self.state.lock().delete_route_errors.push_back(error);
    }

    /// Fail the next network delete. With `removes_anyway` the network is
    /// gone afterwards.
    pub fn fail_next_network_delete(&self, error: ProviderError, removes_anyway: bool) {
        self.state
            .lock()
            .delete_network_errors
            .push_back((error, removes_anyway));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    /// Calls other than existence checks, in order.
    pub fn non_exists_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(Call::is_mutation_or_listing)
            .collect()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.state.lock().calls.iter().filter(|c| *c == call).count()
    }

    pub fn has_network(&self, name: &str) -> bool {
        self.state.lock().networks.contains(name)
    }

    pub fn route_names(&self) -> Vec<String> {
        self.state
            .lock()
            .routes
            .iter()
            .map(|r| r.name.clone())
            .collect()
    }
}

#[async_trait]
impl NetworkOps for FakeCloud {
    type Operation = FakeOperation;

    async fn network_exists(&self, name: &ResourceName) -> Result<bool, ProviderError> {
        let mut state = self.state.lock();
        state.calls.push(Call::Exists(name.to_string()));
        state.exists_checks += 1;
        let nth = state.exists_checks;
        if let Some(err) = state.exists_errors_at.remove(&nth) {
            return Err(err);
        }
        if let Some(err) = state.exists_errors.pop_front() {
            return Err(err);
        }

        let key = name.to_string();
        if let Some(remaining) = state.invisible.get_mut(&key) {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                state.invisible.remove(&key);
                state.networks.insert(key.clone());
            }
        }
        Ok(state.networks.contains(&key))
    }

    async fn create_network(&self, name: &ResourceName) -> Result<(), ProviderError> {
        let mut state = self.state.lock();
        let key = name.to_string();
        state.calls.push(Call::Create(key.clone()));

        if let Some((err, creates_anyway)) = state.create_errors.pop_front() {
            if creates_anyway {
                state.networks.insert(key);
            }
            return Err(err);
        }

        if state.networks.contains(&key) || state.invisible.contains_key(&key) {
            return Err(ProviderError::with_code(
                409,
                format!("The resource 'projects/test/global/networks/{key}' already exists"),
            ));
        }

        if state.visibility_lag == 0 {
            state.networks.insert(key);
        } else {
            let lag = state.visibility_lag;
            state.invisible.insert(key, lag);
        }
        Ok(())
    }

    async fn delete_network(&self, name: &ResourceName) -> Result<FakeOperation, ProviderError> {
        let mut state = self.state.lock();
        let key = name.to_string();
        state.calls.push(Call::DeleteNetwork(key.clone()));

        if let Some((err, removes_anyway)) = state.delete_network_errors.pop_front() {
            if removes_anyway {
                state.networks.remove(&key);
            }
            return Err(err);
        }

        Ok(FakeOperation {
            id: format!("operation-delete-{key}"),
            network: key,
            plan: state.delete_plan.clone(),
            state: Arc::clone(&self.state),
            phase: Phase::Started,
        })
    }
}

#[async_trait]
impl RouteOps for FakeCloud {
    async fn list_routes(&self, network: &ResourceName) -> Result<Vec<Route>, ProviderError> {
        let mut state = self.state.lock();
        state.calls.push(Call::ListRoutes(network.to_string()));
        if let Some(err) = state.list_errors.pop_front() {
            return Err(err);
        }
        // Like the real API, the listing is not filtered by network.
        Ok(state.routes.clone())
    }

    async fn delete_route(&self, name: &str) -> Result<(), ProviderError> {
        let mut state = self.state.lock();
        state.calls.push(Call::DeleteRoute(name.to_string()));
        if let Some(err) = state.delete_route_errors.pop_front() {
            return Err(err);
        }
        state.routes.retain(|r| r.name != name);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Started,
    Running,
    Finished,
}

/// Delete operation that plays back its [`DeletePlan`].
pub struct FakeOperation {
    id: String,
    network: String,
    plan: DeletePlan,
    state: Arc<Mutex<State>>,
    phase: Phase,
}

#[async_trait]
impl Operation for FakeOperation {
    fn id(&self) -> &str {
        &self.id
    }

    async fn next_event(&mut self) -> Option<OperationEvent> {
        match self.phase {
            Phase::Started => {
                self.phase = Phase::Running;
                Some(OperationEvent::Running(
                    OperationMetadata::new(OperationStatus::Running).with_progress(0),
                ))
            }
            Phase::Running => {
                self.phase = Phase::Finished;
                match self.plan.clone() {
                    DeletePlan::Complete { after } => {
                        tokio::time::sleep(after).await;
                        self.state.lock().networks.remove(&self.network);
                        Some(OperationEvent::Complete(
                            OperationMetadata::new(OperationStatus::Done).with_progress(100),
                        ))
                    }
                    DeletePlan::Fail {
                        after,
                        error,
                        network_vanishes,
                    } => {
                        tokio::time::sleep(after).await;
                        if network_vanishes {
                            self.state.lock().networks.remove(&self.network);
                        }
                        Some(OperationEvent::Error(error))
                    }
                }
            }
            Phase::Finished => None,
        }
    }
}
