//! In-memory persistence collaborator.

use std::sync::RwLock;

use super::{AppBlob, StateStoreTrait};
use crate::errors::{Error, Result};

/// Keeps the application state blob in process memory.
#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    blob: RwLock<AppBlob>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing blob, e.g. one exported from another store.
    pub fn with_blob(blob: AppBlob) -> Self {
        InMemoryStateStore {
            blob: RwLock::new(blob),
        }
    }
}

impl StateStoreTrait for InMemoryStateStore {
    fn load(&self) -> Result<AppBlob> {
        let blob = self
            .blob
            .read()
            .map_err(|_| Error::Unexpected("in-memory state lock poisoned".to_string()))?;
        Ok(blob.clone())
    }

    fn save(&self, blob: &AppBlob) -> Result<()> {
        let mut current = self
            .blob
            .write()
            .map_err(|_| Error::Unexpected("in-memory state lock poisoned".to_string()))?;
        *current = blob.clone();
        Ok(())
    }
}
