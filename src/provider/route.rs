// ABOUTME: Route capability trait.
// ABOUTME: List the routes attached to a network and delete them by name.

use async_trait::async_trait;

use super::error::ProviderError;
use crate::types::{ResourceName, Route};

/// Route operations: list, delete.
#[async_trait]
pub trait RouteOps: Send + Sync {
    /// List routes associated with `network`.
    ///
    /// Implementations may return routes of other networks as well; callers
    /// filter with [`Route::is_cleanup_target`].
    async fn list_routes(&self, network: &ResourceName) -> Result<Vec<Route>, ProviderError>;

    /// Delete a route by name.
    async fn delete_route(&self, name: &str) -> Result<(), ProviderError>;
}
