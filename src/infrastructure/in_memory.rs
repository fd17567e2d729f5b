//! In-memory store implementation.
//!
//! Backed by a `BTreeMap` behind an async `RwLock`. Used by tests and
//! `STORE_MODE=in_memory` development runs; behavior mirrors the SQLite
//! store, including the snapshot ordering and the duplicate-id
//! rejection message shape.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{Client, ClientId, Lane};

use super::store::{ClientStore, StoreError};

/// In-memory implementation of [`ClientStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryClientStore {
    /// Records keyed by id; `BTreeMap` gives a deterministic id
    /// tie-break when ranks collide.
    clients: Arc<RwLock<BTreeMap<i64, Client>>>,
}

impl InMemoryClientStore {
    /// Creates a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `clients`, replacing earlier
    /// entries on id collision.
    #[must_use]
    pub fn seeded(clients: impl IntoIterator<Item = Client>) -> Self {
        let map: BTreeMap<i64, Client> = clients
            .into_iter()
            .map(|client| (client.id.get(), client))
            .collect();
        Self {
            clients: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl ClientStore for InMemoryClientStore {
    async fn list_ordered(&self) -> Result<Vec<Client>, StoreError> {
        let guard = self.clients.read().await;
        let mut snapshot: Vec<Client> = guard.values().cloned().collect();
        // Stable sort over id-ordered input: (lane, rank) ties fall
        // back to id order, matching the SQLite query.
        snapshot.sort_by_key(|client| (client.lane, client.rank));
        Ok(snapshot)
    }

    async fn list_by_lane(&self, lane: Lane) -> Result<Vec<Client>, StoreError> {
        let mut snapshot = self.list_ordered().await?;
        snapshot.retain(|client| client.lane == lane);
        Ok(snapshot)
    }

    async fn find(&self, id: ClientId) -> Result<Option<Client>, StoreError> {
        let guard = self.clients.read().await;
        Ok(guard.get(&id.get()).cloned())
    }

    async fn insert(&self, client: &Client) -> Result<(), StoreError> {
        let mut guard = self.clients.write().await;
        if guard.contains_key(&client.id.get()) {
            return Err(StoreError::Rejected(format!(
                "UNIQUE constraint failed: clients.id ({})",
                client.id
            )));
        }
        guard.insert(client.id.get(), client.clone());
        Ok(())
    }

    async fn replace_all(&self, snapshot: &[Client]) -> Result<(), StoreError> {
        // One write guard for the whole swap: readers never observe a
        // half-renumbered lane.
        let mut guard = self.clients.write().await;
        for client in snapshot {
            guard.insert(client.id.get(), client.clone());
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
