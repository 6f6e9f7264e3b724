use std::env;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::fs::File;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use delegator_indexer::ingest::ingest_lines;
use delegator_indexer::types::config::{IndexerConfig, SourceConfig, StoreConfig};
use delegator_indexer::{EventKind, MemoryStore, PgRecordStore, RecordStore};

const DEFAULT_CONFIG_PATH: &str = "config/config.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let config_path = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let config = IndexerConfig::load(&config_path)?;
    load_required_env_vars(&config)?;

    tracing::info!(
        "Loaded config with {} source(s) from {}",
        config.sources.len(),
        config_path.display()
    );

    let store = open_store(&config.store).await?;

    for source in &config.sources {
        ingest_source(store.as_ref(), source, config.batch_size).await?;
    }

    for kind in EventKind::ALL {
        let count = store.count(kind).await?;
        if count > 0 {
            tracing::info!(kind = %kind, count, "Records stored");
        }
    }

    tracing::info!("All sources processed successfully");
    Ok(())
}

/// Ensures the store's env var is set, loading .env if needed.
fn load_required_env_vars(config: &IndexerConfig) -> anyhow::Result<()> {
    let Some(var) = config.store.required_env_var() else {
        return Ok(());
    };

    if env::var(var).is_ok() {
        return Ok(());
    }

    dotenvy::dotenv()
        .with_context(|| format!("Missing env var {} and failed to load .env file", var))?;

    anyhow::ensure!(
        env::var(var).is_ok(),
        "Missing required env var after loading .env: {}",
        var
    );

    Ok(())
}

async fn open_store(config: &StoreConfig) -> anyhow::Result<Box<dyn RecordStore>> {
    match config {
        StoreConfig::Memory => {
            tracing::warn!("Using in-memory store, records will not be persisted");
            Ok(Box::new(MemoryStore::new()))
        }
        StoreConfig::Postgres {
            database_url_env_var,
            pool_size,
            migrations_dir,
        } => {
            let url = env::var(database_url_env_var)
                .with_context(|| format!("{} is not set", database_url_env_var))?;
            let store = PgRecordStore::connect(&url, *pool_size)
                .await
                .context("failed to connect to database")?;
            store
                .run_migrations(Path::new(migrations_dir))
                .await
                .context("failed to run migrations")?;
            Ok(Box::new(store))
        }
    }
}

async fn ingest_source(
    store: &dyn RecordStore,
    source: &SourceConfig,
    batch_size: usize,
) -> anyhow::Result<()> {
    tracing::info!("Ingesting source {} from {}", source.name, source.events_path.display());

    let file = File::open(&source.events_path)
        .await
        .with_context(|| format!("failed to open {}", source.events_path.display()))?;

    let stats = ingest_lines(BufReader::new(file), store, batch_size)
        .await
        .with_context(|| format!("ingestion of source {} failed", source.name))?;

    tracing::info!(
        source = %source.name,
        events = stats.events,
        batches = stats.batches,
        out_of_order = stats.out_of_order,
        skipped = stats.skipped,
        "Source ingested"
    );
    Ok(())
}
