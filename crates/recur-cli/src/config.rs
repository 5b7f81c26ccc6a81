use std::path::Path;

use anyhow::{Context, Result};
use recur_core::app::SchedulerConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// CLI configuration loaded from a TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// tracing filter used when RUST_LOG is not set (e.g. "recur_core=debug")
    pub log_filter: Option<String>,

    /// Number of dates `upcoming` prints by default
    pub upcoming_count: usize,

    /// Task lifecycle limits
    pub scheduler: SchedulerConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_filter: None,
            upcoming_count: 5,
            scheduler: SchedulerConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load config from `path`, or return defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        debug!(?path, "Loading config");
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;
        Ok(config)
    }
}
