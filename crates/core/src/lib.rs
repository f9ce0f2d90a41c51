//! Bucket List Core - Domain entities, the goal store, and persistence traits.
//!
//! This crate contains the data layer of the bucket list tracker: goals,
//! categories and vision board items, the derived statistics over them, and
//! the migrations that bring stored state up to the current schema. It is
//! storage-agnostic and defines the `StateStoreTrait` that is implemented
//! here (in-memory, JSON file) and by the `storage-sqlite` crate.

pub mod categories;
pub mod constants;
pub mod errors;
pub mod goals;
pub mod state;
pub mod store;
pub mod vision_board;

pub use store::GoalStore;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
