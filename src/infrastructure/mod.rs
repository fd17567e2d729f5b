//! Infrastructure module for persistence.
//!
//! This module contains the client store abstraction, its SQLite and
//! in-memory implementations, and the environment-driven store
//! configuration.

pub mod in_memory;
pub mod sqlite;
pub mod store;

pub use in_memory::InMemoryClientStore;
pub use sqlite::SqliteClientStore;
pub use store::{ClientStore, ConfigurationError, StoreConfig, StoreError, StoreMode, init_store};
