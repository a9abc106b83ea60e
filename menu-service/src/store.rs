//! SQLite-backed record store.
//!
//! The pool is opened once at startup and shared by every request through
//! [`AppState`](crate::state::AppState). Rows are decoded generically into
//! JSON records so the service does not need to know the full table schema.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use common::config::AppConfig;
use common::errors::{AppError, AppResult};
use common::models::Record;
use common::utils::{BindValue, SelectQuery};
use serde_json::Value;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Database, Row, Sqlite, SqlitePool, TypeInfo, ValueRef};

/// Read access to restaurant and dish rows.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every row matching `query`.
    async fn fetch_all(&self, query: &SelectQuery) -> AppResult<Vec<Record>>;

    /// The first row matching `query`, if any.
    async fn fetch_optional(&self, query: &SelectQuery) -> AppResult<Option<Record>>;

    /// Round-trips a trivial statement to check the database is reachable.
    async fn ping(&self) -> AppResult<()>;
}

/// [`RecordStore`] over an `sqlx` SQLite pool.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens the database at `config.database_url`.
    ///
    /// The file must already exist; the schema is owned elsewhere.
    pub async fn connect(config: &AppConfig) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(|e| AppError::DatabaseConnection(e.to_string()))?
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect_with(options)
            .await
            .map_err(|e| AppError::DatabaseConnection(e.to_string()))?;

        tracing::info!(
            url = %config.database_url,
            max_connections = config.max_connections,
            "SQLite pool opened"
        );
        Ok(Self { pool })
    }

    /// Wraps an already opened pool.
    #[cfg(test)]
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn fetch_all(&self, query: &SelectQuery) -> AppResult<Vec<Record>> {
        let sql = query.to_sql();
        tracing::debug!(%sql, params = query.params().len(), "fetch_all");

        let rows = bind(&sql, query).fetch_all(&self.pool).await?;
        rows.iter().map(row_to_record).collect()
    }

    async fn fetch_optional(&self, query: &SelectQuery) -> AppResult<Option<Record>> {
        let sql = query.to_sql();
        tracing::debug!(%sql, params = query.params().len(), "fetch_optional");

        let row = bind(&sql, query).fetch_optional(&self.pool).await?;
        row.as_ref().map(row_to_record).transpose()
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Prepares `sql` with the query's values bound in placeholder order.
fn bind<'q>(
    sql: &'q str,
    query: &'q SelectQuery,
) -> Query<'q, Sqlite, <Sqlite as Database>::Arguments<'q>> {
    query
        .params()
        .into_iter()
        .fold(sqlx::query(sql), |statement, value| match value {
            BindValue::Integer(v) => statement.bind(*v),
            BindValue::Text(v) => statement.bind(v.as_str()),
        })
}

/// Converts a row into a JSON object keyed by column name.
///
/// Values follow the SQLite storage class of each cell rather than the
/// declared column type.
fn row_to_record(row: &SqliteRow) -> AppResult<Record> {
    let mut record = Record::with_capacity(row.columns().len());

    for column in row.columns() {
        let idx = column.ordinal();
        let raw = row.try_get_raw(idx)?;

        let value = if raw.is_null() {
            Value::Null
        } else {
            match raw.type_info().name() {
                "INTEGER" => Value::from(row.try_get::<i64, _>(idx)?),
                "REAL" => real_to_json(row.try_get::<f64, _>(idx)?),
                "BLOB" => Value::from(row.try_get::<Vec<u8>, _>(idx)?),
                _ => Value::from(row.try_get::<String, _>(idx)?),
            }
        };

        record.insert(column.name().to_string(), value);
    }

    Ok(record)
}

/// Whole-number reals are written as integers (`4`, not `4.0`).
fn real_to_json(value: f64) -> Value {
    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound.
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}
