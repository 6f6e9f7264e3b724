use serde::Deserialize;

fn default_database_url_env_var() -> String {
    "DATABASE_URL".to_string()
}

fn default_pool_size() -> usize {
    16
}

fn default_migrations_dir() -> String {
    "migrations".to_string()
}

/// Which record store backs the indexer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StoreConfig {
    /// Keep records in process memory; nothing survives a restart.
    Memory,
    Postgres {
        /// Name of the env var holding the connection string.
        #[serde(default = "default_database_url_env_var")]
        database_url_env_var: String,
        #[serde(default = "default_pool_size")]
        pool_size: usize,
        /// Directory of `.sql` migrations, relative to the config file.
        #[serde(default = "default_migrations_dir")]
        migrations_dir: String,
    },
}

impl StoreConfig {
    /// Env var that must be set before the store can be opened, if any.
    pub fn required_env_var(&self) -> Option<&str> {
        match self {
            StoreConfig::Memory => None,
            StoreConfig::Postgres {
                database_url_env_var,
                ..
            } => Some(database_url_env_var),
        }
    }
}
