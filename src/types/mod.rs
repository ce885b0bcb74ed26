// ABOUTME: Validated domain types shared by the provider adapter and reconciler.
// ABOUTME: Resource names and the routes that hang off a network.

mod resource_name;
mod route;

pub use resource_name::{ResourceName, ResourceNameError, last_segment};
pub use route::{Route, cleanup_targets};
