//! Common test helpers for integration tests.
//!
//! # Note
//!
//! The `#![allow(dead_code)]` attribute is necessary because Rust
//! compiles each integration test file as a separate crate; helpers
//! used by only one test file would otherwise warn in the others.

#![allow(dead_code)]

use std::sync::Arc;

use client_lanes_api::api::AppState;
use client_lanes_api::domain::{Client, ClientId, Lane, Rank};
use client_lanes_api::infrastructure::InMemoryClientStore;

/// Builds a client record with a generated name.
pub fn client(id: i64, lane: Lane, rank: i64) -> Client {
    Client::new(
        ClientId::new(id),
        format!("client-{id}"),
        format!("description of client {id}"),
        lane,
        Rank::new(rank),
    )
}

/// Creates an `AppState` over an in-memory store seeded with `clients`.
pub fn seeded_state(clients: Vec<Client>) -> AppState {
    AppState::new(Arc::new(InMemoryClientStore::seeded(clients)))
}

/// The three-lane board used by most endpoint tests:
/// backlog A(1) B(2) C(3), in-progress D(1), complete empty.
pub fn standard_board() -> Vec<Client> {
    vec![
        client(1, Lane::Backlog, 1),
        client(2, Lane::Backlog, 2),
        client(3, Lane::Backlog, 3),
        client(4, Lane::InProgress, 1),
    ]
}
