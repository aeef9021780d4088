//! CLI configuration file

use anyhow::Context;
use scaffold_core::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings read from the `--config` YAML file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub logging: LoggingConfig,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl CliConfig {
    /// Load from `path`, or fall back to defaults when no path is given
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }
}
