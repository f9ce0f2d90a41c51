use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use log::debug;
use std::sync::Arc;

use super::model::AppStateSectionDB;
use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::app_state;
use bucketlist_core::errors::Result;
use bucketlist_core::state::{AppBlob, StateStoreTrait};

/// Persists the application state blob in SQLite, one row per top-level
/// section.
pub struct SqliteStateStore {
    pool: Arc<DbPool>,
}

impl SqliteStateStore {
    pub fn new(pool: Arc<DbPool>) -> Self {
        SqliteStateStore { pool }
    }
}

impl StateStoreTrait for SqliteStateStore {
    fn load(&self) -> Result<AppBlob> {
        let mut conn = get_connection(&self.pool)?;
        let rows = app_state::table
            .select(AppStateSectionDB::as_select())
            .order(app_state::section_key.asc())
            .load::<AppStateSectionDB>(&mut conn)
            .map_err(StorageError::from)?;

        let mut blob = AppBlob::new();
        for row in rows {
            let value: serde_json::Value = serde_json::from_str(&row.section_value)?;
            blob.insert(row.section_key, value);
        }
        Ok(blob)
    }

    fn save(&self, blob: &AppBlob) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        let rows = blob
            .iter()
            .map(|(key, value)| -> std::result::Result<_, StorageError> {
                Ok(AppStateSectionDB {
                    section_key: key.clone(),
                    section_value: serde_json::to_string(value)?,
                    updated_at: updated_at.clone(),
                })
            })
            .collect::<std::result::Result<Vec<_>, StorageError>>()?;
        let keys: Vec<String> = blob.keys().cloned().collect();

        let mut conn = get_connection(&self.pool)?;
        conn.immediate_transaction::<_, StorageError, _>(|conn: &mut SqliteConnection| {
            diesel::delete(app_state::table.filter(app_state::section_key.ne_all(keys)))
                .execute(conn)?;
            for row in &rows {
                diesel::replace_into(app_state::table)
                    .values(row)
                    .execute(conn)?;
            }
            Ok(())
        })?;

        debug!("Saved {} state sections", rows.len());
        Ok(())
    }
}
