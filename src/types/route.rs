// ABOUTME: Routing table entries attached to a network.
// ABOUTME: Decides which routes must be removed before their network can be deleted.

use serde::{Deserialize, Serialize};

use super::resource_name::ResourceName;

/// A routing entry as reported by the provider.
///
/// `network` and `next_hop_network` are resource paths (bare names or
/// self-links); only their last segment is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub name: String,
    pub network: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_hop_network: Option<String>,
}

impl Route {
    pub fn new(name: impl Into<String>, network: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            network: network.into(),
            next_hop_network: None,
        }
    }

    pub fn with_next_hop_network(mut self, next_hop: impl Into<String>) -> Self {
        self.next_hop_network = Some(next_hop.into());
        self
    }

    /// The route is attached to `network`.
    pub fn belongs_to(&self, network: &ResourceName) -> bool {
        network.matches_path(&self.network)
    }

    /// The route's next hop points back at `network`. Such routes are
    /// managed by the provider together with the network and must never be
    /// deleted by hand.
    pub fn is_self_route(&self, network: &ResourceName) -> bool {
        self.next_hop_network
            .as_deref()
            .is_some_and(|hop| network.matches_path(hop))
    }

    /// The route blocks deletion of `network` and has to go first.
    pub fn is_cleanup_target(&self, network: &ResourceName) -> bool {
        self.belongs_to(network) && !self.is_self_route(network)
    }
}

/// Keep only the routes that must be deleted before `network`, preserving order.
pub fn cleanup_targets(routes: Vec<Route>, network: &ResourceName) -> Vec<Route> {
    routes
        .into_iter()
        .filter(|route| route.is_cleanup_target(network))
        .collect()
}
