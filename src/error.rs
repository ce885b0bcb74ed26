// ABOUTME: Application-wide error types for netward.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::provider::ProviderError;
use crate::reconcile::ReconcileError;
use crate::types::ResourceNameError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid resource name: {0}")]
    InvalidName(#[from] ResourceNameError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("gave up on network {network} after {}s", .after.as_secs())]
    Timeout { network: String, after: Duration },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
