use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use log::{debug, error};
use uuid::Uuid;

use crate::errors::{Error, Result};
use crate::state::{
    load_section, store_section, AppBlob, BucketListState, LoadedSection, StateStoreTrait,
};

/// Outcome of a store mutation: the value handed back to the caller and
/// whether the section changed and has to be written back.
pub(crate) struct Mutation<T> {
    value: T,
    persist: bool,
}

impl<T> Mutation<T> {
    pub(crate) fn save(value: T) -> Self {
        Mutation {
            value,
            persist: true,
        }
    }

    pub(crate) fn skip(value: T) -> Self {
        Mutation {
            value,
            persist: false,
        }
    }
}

/// Owns the categories, goals and vision board of the bucket list.
///
/// Every operation is a full read-modify-write of the state blob through the
/// injected persistence collaborator. Operations on one store instance are
/// serialized by a single-writer lock; writers in other processes sharing
/// the same persistence remain last-write-wins.
pub struct GoalStore {
    state_store: Arc<dyn StateStoreTrait>,
    write_lock: Mutex<()>,
}

impl GoalStore {
    pub fn new(state_store: Arc<dyn StateStoreTrait>) -> Self {
        GoalStore {
            state_store,
            write_lock: Mutex::new(()),
        }
    }

    pub(crate) fn new_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Runs `f` against the current section. A section that had to be
    /// initialized or upgraded is written back before `f` sees it.
    pub(crate) fn read<T>(&self, f: impl FnOnce(&BucketListState) -> T) -> Result<T> {
        let _guard = self.lock()?;
        let (mut blob, loaded) = self.load()?;
        if loaded.upgraded {
            self.save(&mut blob, &loaded.state)?;
        }
        Ok(f(&loaded.state))
    }

    /// Runs `f` against the current section and persists the result when `f`
    /// reports a change.
    pub(crate) fn mutate<T>(
        &self,
        f: impl FnOnce(&mut BucketListState, DateTime<Utc>) -> Mutation<T>,
    ) -> Result<T> {
        let _guard = self.lock()?;
        let (mut blob, loaded) = self.load()?;
        let LoadedSection {
            mut state,
            upgraded,
        } = loaded;

        let Mutation { value, persist } = f(&mut state, Utc::now());
        if persist || upgraded {
            self.save(&mut blob, &state)?;
        }
        Ok(value)
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| Error::Unexpected("goal store lock poisoned".to_string()))
    }

    fn load(&self) -> Result<(AppBlob, LoadedSection)> {
        let blob = self.state_store.load()?;
        let loaded = load_section(&blob, Utc::now())?;
        Ok((blob, loaded))
    }

    fn save(&self, blob: &mut AppBlob, state: &BucketListState) -> Result<()> {
        store_section(blob, state)?;
        self.state_store.save(blob).map_err(|e| {
            error!("Failed to persist bucket list state: {}", e);
            e
        })?;
        debug!(
            "Persisted bucket list state ({} categories, {} goals, {} vision board items)",
            state.categories.len(),
            state.goals.len(),
            state.vision_board.len()
        );
        Ok(())
    }
}
