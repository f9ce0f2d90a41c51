//! Persistence collaborator trait.

use super::AppBlob;
use crate::errors::Result;

/// Whole-blob persistence for the application state.
///
/// Implementations load and save the complete blob; there is no partial
/// update protocol. A store that has never been written loads as an empty
/// blob.
pub trait StateStoreTrait: Send + Sync {
    /// Reads the complete application state.
    fn load(&self) -> Result<AppBlob>;

    /// Replaces the complete application state.
    fn save(&self, blob: &AppBlob) -> Result<()>;
}
