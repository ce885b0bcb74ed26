// ABOUTME: Configuration types and parsing for netward.yml.
// ABOUTME: Handles YAML parsing, discovery, env interpolation and validation.

mod env_value;
mod init;
mod timing;

pub use env_value::EnvValue;
pub use init::init_config;
pub use timing::TimingConfig;

use crate::error::{Error, Result};
use crate::provider::GcloudProvider;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "netward.yml";
pub const CONFIG_FILENAME_ALT: &str = "netward.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".netward/config.yml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub timing: TimingConfig,

    /// Deadline for a single ensure/teardown run. Unbounded when absent.
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub project: Option<EnvValue>,

    #[serde(default = "default_gcloud")]
    pub gcloud: String,

    #[serde(default)]
    pub configuration: Option<String>,

    #[serde(default = "default_operation_poll_interval", with = "humantime_serde")]
    pub operation_poll_interval: Duration,
}

fn default_gcloud() -> String {
    "gcloud".to_string()
}

fn default_operation_poll_interval() -> Duration {
    Duration::from_secs(2)
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            project: None,
            gcloud: default_gcloud(),
            configuration: None,
            operation_poll_interval: default_operation_poll_interval(),
        }
    }
}

impl ProviderConfig {
    /// Build the gcloud adapter, resolving env-sourced values.
    pub fn build(&self) -> Result<GcloudProvider> {
        let mut provider = GcloudProvider::new(&self.gcloud)
            .operation_poll_interval(self.operation_poll_interval);

        if let Some(project) = &self.project {
            provider = provider.project(project.resolve()?);
        }

        if let Some(configuration) = &self.configuration {
            provider = provider.configuration(configuration);
        }

        Ok(provider)
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Reject settings that would make the loops spin or never start.
    pub fn validate(&self) -> Result<()> {
        if self.timing.poll_interval.is_zero() {
            return Err(Error::InvalidConfig(
                "timing.poll_interval must be greater than zero".to_string(),
            ));
        }

        if self.provider.operation_poll_interval.is_zero() {
            return Err(Error::InvalidConfig(
                "provider.operation_poll_interval must be greater than zero".to_string(),
            ));
        }

        if self.provider.gcloud.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "provider.gcloud cannot be empty".to_string(),
            ));
        }

        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(Error::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn template() -> Self {
        Config {
            provider: ProviderConfig {
                project: Some(EnvValue::Literal("my-project".to_string())),
                ..ProviderConfig::default()
            },
            timing: TimingConfig::default(),
            timeout: Some(Duration::from_secs(15 * 60)),
        }
    }
}
