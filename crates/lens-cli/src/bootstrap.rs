use std::sync::Arc;

use anyhow::Context;
use lens_client::ServiceClient;
use lens_config::LensConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered configuration.
///
/// `--config` replaces the user and project config files; environment
/// variables still override it.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<LensConfig> {
    dotenvy::dotenv().ok();

    let config = match &flags.config {
        Some(path) => LensConfig::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => LensConfig::load().context("failed to load configuration")?,
    };

    tracing::debug!(
        base_url = %config.service.base_url,
        timeout_secs = config.workflow.request_timeout_secs,
        "configuration loaded"
    );
    Ok(config)
}

/// HTTP client shared by every collaborator.
pub fn service_client(config: &LensConfig) -> anyhow::Result<Arc<ServiceClient>> {
    let client = ServiceClient::new(&config.service, config.workflow.timeout())
        .context("failed to build service client")?;
    Ok(Arc::new(client))
}
