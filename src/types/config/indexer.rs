use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::types::config::source::{resolve_source_config, SourceConfig, SourceConfigRaw};
use crate::types::config::store::StoreConfig;

fn default_batch_size() -> usize {
    500
}

#[derive(Debug, Deserialize)]
pub struct IndexerConfigRaw {
    pub store: StoreConfig,
    #[serde(default)]
    pub sources: Vec<SourceConfigRaw>,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

#[derive(Debug, Clone)]
pub struct IndexerConfig {
    pub store: StoreConfig,
    pub sources: Vec<SourceConfig>,
    /// Events written per store transaction.
    pub batch_size: usize,
}

impl IndexerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let base_dir = path.parent().unwrap_or(Path::new("."));
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;

        Self::from_json(&content, base_dir)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))
    }

    /// Parse a config, resolving relative paths against `base_dir`.
    pub fn from_json(content: &str, base_dir: &Path) -> anyhow::Result<Self> {
        let raw_config: IndexerConfigRaw = serde_json::from_str(content)?;

        anyhow::ensure!(raw_config.batch_size > 0, "batch_size must be positive");

        let store = match raw_config.store {
            StoreConfig::Postgres {
                database_url_env_var,
                pool_size,
                migrations_dir,
            } => StoreConfig::Postgres {
                database_url_env_var,
                pool_size,
                migrations_dir: base_dir.join(migrations_dir).to_string_lossy().to_string(),
            },
            other => other,
        };

        Ok(IndexerConfig {
            store,
            sources: raw_config
                .sources
                .into_iter()
                .map(|source| resolve_source_config(source, base_dir))
                .collect(),
            batch_size: raw_config.batch_size,
        })
    }
}
