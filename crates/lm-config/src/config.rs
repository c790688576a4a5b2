use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::logging::{LoggerConfig, LoggingConfig};

/// Top-level configuration file (`lm.toml`). Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LmConfig {
    pub logging: LoggingConfig,
    pub logger: LoggerConfig,
}

impl LmConfig {
    /// Read and parse a config file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.as_ref().display()))?;
        content.parse()
    }
}

impl FromStr for LmConfig {
    type Err = anyhow::Error;

    fn from_str(toml_str: &str) -> anyhow::Result<Self> {
        let config: LmConfig =
            toml::from_str(toml_str).map_err(|e| anyhow::anyhow!("invalid config: {e}"))?;
        Ok(config)
    }
}
