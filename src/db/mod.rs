//! Database module for SQLite operations.
//!
//! This module provides:
//! - Store initialization and the `items` schema
//! - SQLite pragma configuration
//! - Repository layer for item operations

pub mod repo;
pub mod schema;

pub use repo::Repository;
pub use schema::{ensure_schema, init_db};
