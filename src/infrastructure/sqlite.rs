//! SQLite store implementation.
//!
//! Uses `sqlx` with a connection pool. The schema is created at startup
//! so a fresh database file is usable immediately.
//!
//! # Table Schema
//!
//! ```sql
//! CREATE TABLE clients (
//!     id          INTEGER PRIMARY KEY,
//!     name        TEXT NOT NULL,
//!     description TEXT NOT NULL,
//!     status      TEXT NOT NULL,
//!     priority    INTEGER NOT NULL
//! );
//! ```
//!
//! Snapshot order is produced in SQL: lanes in workflow order (backlog,
//! in-progress, complete), then priority, then id as the tie-break for
//! boards that were seeded with duplicate priorities.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};

use crate::domain::{Client, ClientId, Lane, Rank};

use super::store::{ClientStore, StoreError};

/// Schema applied on connect.
const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS clients (
    id          INTEGER PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT NOT NULL,
    status      TEXT NOT NULL,
    priority    INTEGER NOT NULL
)";

/// Shared ORDER BY clause: workflow lane order, then rank, then id.
const SNAPSHOT_ORDER: &str = "ORDER BY CASE status
        WHEN 'backlog' THEN 0
        WHEN 'in-progress' THEN 1
        ELSE 2
    END, priority, id";

// =============================================================================
// SQLite Client Store
// =============================================================================

/// SQLite implementation of [`ClientStore`].
#[derive(Debug, Clone)]
pub struct SqliteClientStore {
    /// Connection pool.
    pool: SqlitePool,
}

impl SqliteClientStore {
    /// Opens (and if necessary creates) the database at `url` and
    /// ensures the schema exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the URL does not parse, the
    /// pool cannot connect, or the schema statement fails.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(database_error)?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(database_error)?;

        sqlx::query(SCHEMA)
            .execute(&pool)
            .await
            .map_err(database_error)?;

        Ok(Self { pool })
    }

    /// Wraps an existing pool. The schema must already exist.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl ClientStore for SqliteClientStore {
    async fn list_ordered(&self) -> Result<Vec<Client>, StoreError> {
        let query = format!(
            "SELECT id, name, description, status, priority FROM clients {SNAPSHOT_ORDER}"
        );
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.iter().map(row_to_client).collect()
    }

    async fn list_by_lane(&self, lane: Lane) -> Result<Vec<Client>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, name, description, status, priority FROM clients
             WHERE status = ?1 ORDER BY priority, id",
        )
        .bind(lane.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(row_to_client).collect()
    }

    async fn find(&self, id: ClientId) -> Result<Option<Client>, StoreError> {
        let row = sqlx::query(
            "SELECT id, name, description, status, priority FROM clients WHERE id = ?1",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref().map(row_to_client).transpose()
    }

    async fn insert(&self, client: &Client) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO clients (id, name, description, status, priority)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(client.id.get())
        .bind(&client.name)
        .bind(&client.description)
        .bind(client.lane.as_str())
        .bind(client.rank.get())
        .execute(&self.pool)
        .await
        .map(|_| ())
        .map_err(|error| match error {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::Rejected(db.message().to_string())
            }
            other => database_error(other),
        })
    }

    async fn replace_all(&self, snapshot: &[Client]) -> Result<(), StoreError> {
        let mut transaction = self.pool.begin().await.map_err(database_error)?;

        for client in snapshot {
            sqlx::query("UPDATE clients SET status = ?1, priority = ?2 WHERE id = ?3")
                .bind(client.lane.as_str())
                .bind(client.rank.get())
                .bind(client.id.get())
                .execute(&mut *transaction)
                .await
                .map_err(database_error)?;
        }

        transaction.commit().await.map_err(database_error)
    }
}

// =============================================================================
// Row Mapping
// =============================================================================

fn database_error(error: sqlx::Error) -> StoreError {
    StoreError::Database(error.to_string())
}

/// Maps a row to a [`Client`]. A status outside the three lane names
/// means the table was written by something else and is reported as a
/// database error, not a caller error.
fn row_to_client(row: &SqliteRow) -> Result<Client, StoreError> {
    let id: i64 = row.try_get("id").map_err(database_error)?;
    let name: String = row.try_get("name").map_err(database_error)?;
    let description: String = row.try_get("description").map_err(database_error)?;
    let status: String = row.try_get("status").map_err(database_error)?;
    let priority: i64 = row.try_get("priority").map_err(database_error)?;

    let lane = Lane::parse(&status)
        .map_err(|_| StoreError::Database(format!("row {id} holds unknown status {status:?}")))?;

    Ok(Client {
        id: ClientId::new(id),
        name,
        description,
        lane,
        rank: Rank::new(priority),
    })
}

// =============================================================================
// Tests
// =============================================================================
