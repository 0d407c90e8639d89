use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{debug, info};

use hmi_core::ReconcileConfig;

/// Load the reconcile configuration from a TOML file.
///
/// A missing file is not an error: defaults are returned.
pub async fn load_reconcile_config(path: impl AsRef<Path>) -> Result<ReconcileConfig> {
    let path = path.as_ref();
    if !fs::try_exists(path)
        .await
        .with_context(|| format!("check config file failed: {}", path.display()))?
    {
        info!(path = %path.display(), "Config file not found, using default reconcile config");
        return Ok(ReconcileConfig::default());
    }

    let source = fs::read_to_string(path)
        .await
        .with_context(|| format!("read config file failed: {}", path.display()))?;
    let config = ReconcileConfig::from_toml_str(&source)
        .with_context(|| format!("parse config file failed: {}", path.display()))?;
    debug!(?config, "Loaded reconcile config");
    Ok(config)
}
