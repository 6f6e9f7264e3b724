use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfigRaw {
    /// Contract name, used in logs.
    pub name: String,
    /// JSON-lines file of decoded events, relative to the config file.
    pub events_path: String,
}

/// One stream of decoded events, delivered in (block, log index) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub name: String,
    pub events_path: PathBuf,
}

pub fn resolve_source_config(raw: SourceConfigRaw, base_dir: &Path) -> SourceConfig {
    SourceConfig {
        name: raw.name,
        events_path: base_dir.join(raw.events_path),
    }
}
