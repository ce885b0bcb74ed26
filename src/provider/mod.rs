// ABOUTME: Capability traits for the cloud provider plus the gcloud adapter.
// ABOUTME: The reconciler only sees NetworkOps, RouteOps and Operation.

mod error;
pub mod gcloud;
mod network;
mod route;

pub use error::ProviderError;
pub use gcloud::{GcloudOperation, GcloudProvider};
pub use network::{NetworkOps, Operation, OperationEvent, OperationMetadata, OperationStatus};
pub use route::RouteOps;

/// Every capability the reconciler needs.
///
/// Automatically implemented for any type with both `NetworkOps` and
/// `RouteOps`.
pub trait Provider: NetworkOps + RouteOps {}

impl<T: NetworkOps + RouteOps> Provider for T {}
