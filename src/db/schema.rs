//! Store initialization: connection pool, pragmas and the `items` table.

use crate::error::StoreError;
use sqlx::sqlite::{SqliteConnection, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use tracing::info;

/// Open the SQLite store at `db_path` and make sure the schema exists.
///
/// The file is created on first start. Any failure here is fatal to startup.
pub async fn init_db(db_path: &str, max_connections: u32) -> Result<SqlitePool, StoreError> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Init(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .after_connect(|conn, _meta| Box::pin(async move { configure_pragmas_conn(conn).await }))
        .connect(&format!("sqlite:{}?mode=rwc", db_path))
        .await
        .map_err(|e| StoreError::Init(e.to_string()))?;

    ensure_schema(&pool).await?;

    info!("Database initialized at {}", db_path);
    Ok(pool)
}

/// Create the `items` table if it does not exist. Safe to run on every start.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), StoreError> {
    let schema_sql = include_str!("schema.sql");

    for statement in schema_sql.split(';') {
        let trimmed = statement.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed)
                .execute(pool)
                .await
                .map_err(|e| StoreError::Init(e.to_string()))?;
        }
    }

    info!("Schema ready");
    Ok(())
}

async fn configure_pragmas_conn(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    use sqlx::Row;

    // journal_mode reports the mode actually in effect
    let row = sqlx::query("PRAGMA journal_mode = WAL")
        .fetch_one(&mut *conn)
        .await?;
    let journal_mode: String = row.get(0);
    info!("SQLite journal_mode set to: {}", journal_mode);

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&mut *conn)
        .await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(&mut *conn)
        .await?;

    Ok(())
}
