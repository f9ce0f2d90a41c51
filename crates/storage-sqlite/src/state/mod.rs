//! SQLite storage implementation for the application state blob.

mod model;
mod repository;

pub use model::AppStateSectionDB;
pub use repository::SqliteStateStore;

// Re-export trait from core for convenience
pub use bucketlist_core::state::StateStoreTrait;
