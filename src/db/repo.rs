//! Repository layer for item persistence.
//!
//! Every operation is a single parameterized statement against the pool.
//! Nothing is cached and nothing is retried.

use crate::domain::{Item, ItemPayload};
use crate::error::StoreError;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use tracing::debug;

/// Repository for item operations.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    /// Read every item in store order.
    ///
    /// Row order is whatever SQLite returns; callers must not rely on it.
    ///
    /// # Errors
    /// `Query` if the statement fails, `Decode` if any row does not map onto
    /// an [`Item`]. No partial result is returned in either case.
    pub async fn list_items(&self) -> Result<Vec<Item>, StoreError> {
        let rows = sqlx::query("SELECT id, name, price FROM items")
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::from_read)?;

        let items = rows
            .iter()
            .map(item_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = items.len(), "listed items");
        Ok(items)
    }

    /// Insert a new item. The store assigns the id, which is not returned.
    ///
    /// # Errors
    /// Returns `Write` if the insert fails.
    pub async fn create_item(&self, item: &ItemPayload) -> Result<(), StoreError> {
        let result = sqlx::query("INSERT INTO items (name, price) VALUES (?, ?)")
            .bind(item.name.as_str())
            .bind(item.price)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;

        debug!(id = result.last_insert_rowid(), "item created");
        Ok(())
    }

    /// Overwrite name and price of the item with `id`.
    ///
    /// A missing id affects zero rows and still succeeds.
    ///
    /// # Errors
    /// Returns `Write` if the update fails.
    pub async fn update_item(&self, id: i64, item: &ItemPayload) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE items SET name = ?, price = ? WHERE id = ?")
            .bind(item.name.as_str())
            .bind(item.price)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;

        debug!(id, rows = result.rows_affected(), "item updated");
        Ok(())
    }

    /// Hard-delete the item with `id`. A missing id is not an error.
    ///
    /// # Errors
    /// Returns `Write` if the delete fails.
    pub async fn delete_item(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;

        debug!(id, rows = result.rows_affected(), "item deleted");
        Ok(())
    }

    /// Round-trip a trivial statement to confirm the store is reachable.
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(StoreError::from_read)?;
        Ok(())
    }
}

fn item_from_row(row: &SqliteRow) -> Result<Item, StoreError> {
    let id: i64 = row.try_get("id").map_err(StoreError::from_read)?;
    // Both columns are nullable in the table but not in `Item`.
    let name: Option<String> = row.try_get("name").map_err(StoreError::from_read)?;
    let price: Option<i64> = row.try_get("price").map_err(StoreError::from_read)?;

    match (name, price) {
        (Some(name), Some(price)) => Ok(Item { id, name, price }),
        (None, _) => Err(StoreError::Decode(format!("item {} has NULL name", id))),
        (_, None) => Err(StoreError::Decode(format!("item {} has NULL price", id))),
    }
}
