//! Client Lanes API Library
//!
//! An HTTP API for managing clients organized into three ordered
//! workflow lanes (backlog, in-progress, complete). The core is the
//! lane reorder engine in [`domain::reorder`], which keeps every lane's
//! ranks contiguous across moves.

pub mod api;
pub mod domain;
pub mod infrastructure;
