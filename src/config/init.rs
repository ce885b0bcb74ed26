// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates netward.yml template files.

use std::path::Path;

use crate::error::{Error, Result};

use super::{CONFIG_FILENAME, Config, EnvValue};

pub fn init_config(dir: &Path, project: Option<&str>, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let mut config = Config::template();

    if let Some(p) = project {
        if p.trim().is_empty() {
            return Err(Error::InvalidConfig("project cannot be empty".to_string()));
        }
        config.provider.project = Some(EnvValue::Literal(p.to_string()));
    }

    let yaml = generate_template_yaml(&config);
    std::fs::write(&config_path, yaml)?;

    Ok(())
}

fn generate_template_yaml(config: &Config) -> String {
    let project = match &config.provider.project {
        Some(EnvValue::Literal(p)) => p.clone(),
        _ => "my-project".to_string(),
    };
    let timing = &config.timing;

    format!(
        r#"provider:
  project: {}
  # Or read it from the environment:
  # project:
  #   env: GCP_PROJECT
  gcloud: {}
  operation_poll_interval: {}s

timing:
  poll_interval: {}s
  not_ready_backoff: {}s
  settle_delay: {}s
  route_backoff: {}s

# Give up on a single ensure/teardown after this long
timeout: {}m
"#,
        project,
        config.provider.gcloud,
        config.provider.operation_poll_interval.as_secs(),
        timing.poll_interval.as_secs(),
        timing.not_ready_backoff.as_secs(),
        timing.settle_delay.as_secs(),
        timing.route_backoff.as_secs(),
        config.timeout.map(|t| t.as_secs() / 60).unwrap_or(15),
    )
}
