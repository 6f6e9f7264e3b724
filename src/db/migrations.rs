use std::collections::HashSet;
use std::path::Path;

use deadpool_postgres::Pool;

use super::error::DbError;

/// Apply every `.sql` file in `dir` not yet recorded in `_migrations`,
/// in file-name order, each in its own transaction.
pub async fn run(pool: &Pool, dir: &Path) -> Result<(), DbError> {
    let client = pool.get().await?;

    client
        .execute(
            "CREATE TABLE IF NOT EXISTS _migrations (
                id SERIAL PRIMARY KEY,
                name VARCHAR(255) NOT NULL UNIQUE,
                applied_at TIMESTAMP WITH TIME ZONE DEFAULT NOW()
            )",
            &[],
        )
        .await?;

    let rows = client.query("SELECT name FROM _migrations", &[]).await?;
    let applied: HashSet<String> = rows.iter().map(|row| row.get(0)).collect();

    if !dir.exists() {
        tracing::info!(dir = %dir.display(), "No migrations directory found, skipping migrations");
        return Ok(());
    }

    for (name, path) in pending_migrations(dir, &applied)? {
        let sql = std::fs::read_to_string(&path)?;

        let mut client = pool.get().await?;
        let tx = client.transaction().await?;

        tx.batch_execute(&sql)
            .await
            .map_err(|source| DbError::Migration {
                name: name.clone(),
                source,
            })?;

        tx.execute("INSERT INTO _migrations (name) VALUES ($1)", &[&name])
            .await?;

        tx.commit().await?;

        tracing::info!("Applied migration: {}", name);
    }

    tracing::info!("All migrations up to date");
    Ok(())
}

fn pending_migrations(
    dir: &Path,
    applied: &HashSet<String>,
) -> Result<Vec<(String, std::path::PathBuf)>, DbError> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|x| x == "sql"))
        .collect();

    entries.sort_by_key(|e| e.file_name());

    Ok(entries
        .into_iter()
        .map(|e| (e.file_name().to_string_lossy().to_string(), e.path()))
        .filter(|(name, _)| !applied.contains(name))
        .collect())
}
