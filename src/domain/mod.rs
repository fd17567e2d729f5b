//! Domain module for client lane management.
//!
//! This module contains the client domain model, input validation,
//! and the lane reorder engine.

pub mod client;
pub mod reorder;

pub use client::{Client, ClientId, Lane, Rank, ValidateError};
pub use reorder::reorder;
