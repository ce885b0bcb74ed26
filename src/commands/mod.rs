// ABOUTME: Command module aggregator for the netward CLI.
// ABOUTME: Re-exports ensure, teardown, and status command handlers.

mod deadline;
mod ensure;
mod status;
mod teardown;

pub use ensure::ensure;
pub use status::status;
pub use teardown::teardown;
