// ABOUTME: Library root for netward - exposes the reconciler and its collaborators.
// ABOUTME: The CLI binary is in main.rs.

pub mod config;
pub mod error;
pub mod output;
pub mod provider;
pub mod reconcile;
pub mod types;
