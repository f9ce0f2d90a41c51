//! SQLite storage implementation for the bucket list tracker.
//!
//! This crate provides the SQLite-backed persistence collaborator using
//! Diesel ORM. It implements the `StateStoreTrait` defined in
//! `bucketlist-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The state section repository
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist. The core crate is storage-agnostic and works with the trait.
//!
//! ```text
//!   core (goal store)
//!          │
//!          ▼
//!  storage-sqlite (this crate)
//!          │
//!          ▼
//!      SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod state;

// Re-export database utilities
pub use db::{
    backup_database, create_pool, get_connection, get_db_path, init, run_migrations,
    DbConnection, DbPool,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use state::SqliteStateStore;

// Re-export from bucketlist-core for convenience
pub use bucketlist_core::errors::{DatabaseError, Error, Result};
