// ABOUTME: Network reconciliation: ensure a network exists or is gone.
// ABOUTME: Exports the reconciler, error classifier, operation watcher and errors.

mod classify;
mod error;
mod reconciler;
mod watcher;

pub use classify::{Disposition, ErrorClassifier, Mutation};
pub use error::{ReconcileError, ReconcileErrorKind};
pub use reconciler::{NetworkReconciler, NetworkRequest, Presence};
pub use watcher::{OperationState, OperationWatcher};
