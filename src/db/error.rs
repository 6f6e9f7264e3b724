use thiserror::Error;

/// Failure talking to PostgreSQL or preparing a statement for it.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Invalid connection string: {0}")]
    ConnectionString(String),

    #[error("Failed to build connection pool: {0}")]
    Build(#[from] deadpool_postgres::BuildError),

    #[error("Pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error("{}", describe_pg_error(.0))]
    Postgres(#[from] tokio_postgres::Error),

    #[error("Migration {name} failed: {}", describe_pg_error(.source))]
    Migration {
        name: String,
        #[source]
        source: tokio_postgres::Error,
    },

    #[error("Failed to read migrations: {0}")]
    Io(#[from] std::io::Error),

    /// BIGINT columns are signed; block numbers and timestamps above
    /// `i64::MAX` cannot be stored without losing their ordering.
    #[error("Value {0} does not fit a BIGINT column")]
    BigIntOverflow(u64),
}

fn describe_pg_error(e: &tokio_postgres::Error) -> String {
    let Some(db_err) = e.as_db_error() else {
        return format!("PostgreSQL error: {}", e);
    };

    let mut msg = format!(
        "PostgreSQL error [{}]: {}",
        db_err.code().code(),
        db_err.message()
    );
    for (label, value) in [("Detail", db_err.detail()), ("Table", db_err.table())] {
        if let Some(value) = value {
            msg.push_str(&format!("\n  {}: {}", label, value));
        }
    }
    msg
}
