use std::path::Path;

use bytes::BytesMut;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod, Runtime};
use tokio_postgres::types::ToSql;
use tokio_postgres::NoTls;

use super::error::DbError;
use super::types::{DbOperation, DbValue};

pub struct DbPool {
    pool: Pool,
}

impl DbPool {
    pub async fn new(database_url: &str, max_size: usize) -> Result<Self, DbError> {
        let config = database_url
            .parse::<tokio_postgres::Config>()
            .map_err(|e| DbError::ConnectionString(e.to_string()))?;

        let manager_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };

        let manager = Manager::from_config(config, NoTls, manager_config);

        let pool = Pool::builder(manager)
            .max_size(max_size)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(DbError::Build)?;

        let _conn = pool.get().await?;
        tracing::info!(max_size, "Database connection pool created successfully");

        Ok(Self { pool })
    }

    /// Execute all operations in one transaction; either every operation
    /// lands or none does.
    pub async fn execute_transaction(&self, operations: Vec<DbOperation>) -> Result<(), DbError> {
        if operations.is_empty() {
            return Ok(());
        }

        let mut client = self.pool.get().await?;
        let transaction = client.transaction().await?;

        for op in operations {
            let (sql, params) = build_sql(&op)?;

            let params_refs: Vec<&(dyn ToSql + Sync)> =
                params.iter().map(|p| p as &(dyn ToSql + Sync)).collect();

            if let Err(e) = transaction.execute(&sql, &params_refs[..]).await {
                let db_err: DbError = e.into();
                tracing::error!("SQL execution failed\n  SQL: {}\n  Error: {}", sql, db_err);
                return Err(db_err);
            }
        }

        transaction.commit().await?;
        Ok(())
    }

    pub async fn run_migrations(&self, dir: &Path) -> Result<(), DbError> {
        super::migrations::run(&self.pool, dir).await
    }

    pub async fn query(
        &self,
        query: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<tokio_postgres::Row>, DbError> {
        let client = self.pool.get().await?;
        let rows = client.query(query, params).await?;
        Ok(rows)
    }
}

#[derive(Debug, PartialEq)]
enum SqlParam {
    Int64(i64),
    Text(String),
    Bytes(Vec<u8>),
}

impl ToSql for SqlParam {
    fn to_sql(
        &self,
        ty: &tokio_postgres::types::Type,
        out: &mut BytesMut,
    ) -> Result<tokio_postgres::types::IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match self {
            SqlParam::Int64(v) => v.to_sql(ty, out),
            SqlParam::Text(v) => v.to_sql(ty, out),
            SqlParam::Bytes(v) => v.to_sql(ty, out),
        }
    }

    fn accepts(ty: &tokio_postgres::types::Type) -> bool {
        <i64 as ToSql>::accepts(ty)
            || <String as ToSql>::accepts(ty)
            || <Vec<u8> as ToSql>::accepts(ty)
    }

    tokio_postgres::types::to_sql_checked!();
}

fn convert_db_value(value: &DbValue) -> Result<SqlParam, DbError> {
    Ok(match value {
        DbValue::Uint64(v) => {
            SqlParam::Int64(i64::try_from(*v).map_err(|_| DbError::BigIntOverflow(*v))?)
        }
        DbValue::VarChar(v) => SqlParam::Text(v.clone()),
        DbValue::Bytes(v) => SqlParam::Bytes(v.clone()),
        DbValue::Bytes32(v) => SqlParam::Bytes(v.to_vec()),
    })
}

fn convert_values_to_params(values: &[DbValue]) -> Result<Vec<SqlParam>, DbError> {
    values.iter().map(convert_db_value).collect()
}

fn build_sql(op: &DbOperation) -> Result<(String, Vec<SqlParam>), DbError> {
    match op {
        DbOperation::Upsert {
            table,
            columns,
            values,
            conflict_columns,
            update_columns,
        } => build_upsert_sql(table, columns, values, conflict_columns, update_columns),
    }
}

/// Wrap a column name in double quotes to handle reserved keywords.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name)
}

fn quote_cols(columns: &[String]) -> String {
    columns.iter().map(|c| quote_ident(c)).collect::<Vec<_>>().join(", ")
}

fn build_upsert_sql(
    table: &str,
    columns: &[String],
    values: &[DbValue],
    conflict_columns: &[String],
    update_columns: &[String],
) -> Result<(String, Vec<SqlParam>), DbError> {
    let cols = quote_cols(columns);
    let placeholders: Vec<String> = (1..=values.len()).map(|i| format!("${}", i)).collect();
    let placeholders_str = placeholders.join(", ");

    let conflict_cols = quote_cols(conflict_columns);
    let updates: Vec<String> = update_columns
        .iter()
        .map(|c| format!("{} = EXCLUDED.{}", quote_ident(c), quote_ident(c)))
        .collect();
    let updates_str = updates.join(", ");

    let sql = if update_columns.is_empty() {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT ({}) DO NOTHING",
            table, cols, placeholders_str, conflict_cols
        )
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT ({}) DO UPDATE SET {}",
            table, cols, placeholders_str, conflict_cols, updates_str
        )
    };

    let params = convert_values_to_params(values)?;
    Ok((sql, params))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_upsert_sql_overwrites_on_conflict() {
        let op = DbOperation::Upsert {
            table: "records".to_string(),
            columns: cols(&["id", "kind", "block_number"]),
            values: vec![
                DbValue::Bytes(vec![1, 2]),
                DbValue::VarChar("Staked".to_string()),
                DbValue::Uint64(42),
            ],
            conflict_columns: cols(&["id"]),
            update_columns: cols(&["kind", "block_number"]),
        };

        let (sql, params) = build_sql(&op).unwrap();
        assert_eq!(
            sql,
            "INSERT INTO records (\"id\", \"kind\", \"block_number\") VALUES ($1, $2, $3) \
             ON CONFLICT (\"id\") DO UPDATE SET \"kind\" = EXCLUDED.\"kind\", \
             \"block_number\" = EXCLUDED.\"block_number\""
        );
        assert_eq!(
            params,
            vec![
                SqlParam::Bytes(vec![1, 2]),
                SqlParam::Text("Staked".to_string()),
                SqlParam::Int64(42),
            ]
        );
    }

    #[test]
    fn test_upsert_without_update_columns_does_nothing() {
        let (sql, _) = build_upsert_sql(
            "records",
            &cols(&["id"]),
            &[DbValue::Bytes32([7u8; 32])],
            &cols(&["id"]),
            &[],
        )
        .unwrap();
        assert!(sql.ends_with("ON CONFLICT (\"id\") DO NOTHING"));
    }

    #[test]
    fn test_block_number_above_bigint_is_rejected() {
        let op = DbOperation::Upsert {
            table: "records".to_string(),
            columns: cols(&["id", "block_number"]),
            values: vec![DbValue::Bytes(vec![1]), DbValue::Uint64(u64::MAX)],
            conflict_columns: cols(&["id"]),
            update_columns: cols(&["block_number"]),
        };

        assert!(matches!(
            build_sql(&op),
            Err(DbError::BigIntOverflow(v)) if v == u64::MAX
        ));

        let (_, params) = build_upsert_sql(
            "records",
            &cols(&["block_number"]),
            &[DbValue::Uint64(i64::MAX as u64)],
            &cols(&["block_number"]),
            &[],
        )
        .unwrap();
        assert_eq!(params, vec![SqlParam::Int64(i64::MAX)]);
    }
}
