//! Application state persistence: the blob, its bucket list section, the
//! section migrations and the stock persistence collaborators.

mod file_store;
mod memory_store;
pub mod migrations;
mod state_model;
mod state_traits;

pub use file_store::JsonFileStateStore;
pub use memory_store::InMemoryStateStore;
pub use migrations::{load_section, store_section, LoadedSection, CURRENT_SCHEMA_VERSION};
pub use state_model::{AppBlob, BucketListState};
pub use state_traits::StateStoreTrait;
