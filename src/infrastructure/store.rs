//! Client store abstraction and configuration.
//!
//! The store is a durable table of client records keyed by id. Two
//! implementations exist: SQLite for durability and an in-memory map
//! for tests; the backend is selected at startup from the environment.

use std::env;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Client, ClientId, Lane};

use super::{InMemoryClientStore, SqliteClientStore};

// =============================================================================
// Store Error
// =============================================================================

/// Errors that can occur during store operations.
#[derive(Debug, Error, Clone)]
pub enum StoreError {
    /// The store rejected a write because of a constraint violation,
    /// e.g. inserting a duplicate id. A caller error.
    #[error("store rejected the write: {0}")]
    Rejected(String),

    /// An unexpected database failure. An infrastructure error.
    #[error("database error: {0}")]
    Database(String),
}

// =============================================================================
// Client Store
// =============================================================================

/// Durable keyed table of client records.
///
/// `list_ordered` defines the snapshot order every mutation works from:
/// all clients sorted by (lane, rank) ascending, lanes in workflow
/// order. Writes of a full snapshot go through `replace_all`, which
/// must apply every row or none.
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Returns every client, ordered by (lane, rank) ascending.
    async fn list_ordered(&self) -> Result<Vec<Client>, StoreError>;

    /// Returns the clients of one lane, ordered by rank ascending.
    async fn list_by_lane(&self, lane: Lane) -> Result<Vec<Client>, StoreError>;

    /// Looks up a single client by id.
    async fn find(&self, id: ClientId) -> Result<Option<Client>, StoreError>;

    /// Inserts a new client with its fields exactly as given.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Rejected`] if a client with the same id
    /// already exists.
    async fn insert(&self, client: &Client) -> Result<(), StoreError>;

    /// Persists the lane and rank of every record in `snapshot`,
    /// atomically.
    ///
    /// The write does not diff: every row is written whether it changed
    /// or not, inside one transaction (or equivalent), so a lane never
    /// becomes observable in a half-renumbered state.
    async fn replace_all(&self, snapshot: &[Client]) -> Result<(), StoreError>;
}

// =============================================================================
// Configuration
// =============================================================================

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreMode {
    /// SQLite storage for durable use.
    #[default]
    Sqlite,
    /// In-memory storage for tests and development.
    InMemory,
}

impl FromStr for StoreMode {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            _ => Err(ConfigurationError::InvalidStoreMode(value.to_string())),
        }
    }
}

/// Errors raised while reading the store configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// `STORE_MODE` held an unrecognized value.
    #[error("invalid STORE_MODE: {0:?} (expected \"sqlite\" or \"in_memory\")")]
    InvalidStoreMode(String),
}

/// Store configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Selected backend.
    pub mode: StoreMode,
    /// SQLite connection URL.
    pub database_url: String,
}

/// Default SQLite URL; `mode=rwc` creates the file on first run.
const DEFAULT_DATABASE_URL: &str = "sqlite://clients.db?mode=rwc";

impl StoreConfig {
    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `STORE_MODE`: `sqlite` (default) | `in_memory`
    /// - `DATABASE_URL`: SQLite connection URL
    ///   (default: `sqlite://clients.db?mode=rwc`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if `STORE_MODE` holds an
    /// unrecognized value.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        let mode = match env::var("STORE_MODE") {
            Ok(value) => value.parse()?,
            Err(env::VarError::NotPresent) => StoreMode::default(),
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigurationError::InvalidStoreMode(
                    "<non-UTF-8 value>".to_string(),
                ));
            }
        };

        let database_url = env::var("DATABASE_URL")
            .ok()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        Ok(Self { mode, database_url })
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            mode: StoreMode::default(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

/// Initializes the configured store backend.
///
/// # Errors
///
/// Returns [`StoreError`] if the SQLite pool cannot be opened or the
/// schema cannot be created.
pub async fn init_store(config: &StoreConfig) -> Result<Arc<dyn ClientStore>, StoreError> {
    match config.mode {
        StoreMode::Sqlite => {
            let store = SqliteClientStore::connect(&config.database_url).await?;
            Ok(Arc::new(store))
        }
        StoreMode::InMemory => Ok(Arc::new(InMemoryClientStore::new())),
    }
}

// =============================================================================
// Tests
// =============================================================================
