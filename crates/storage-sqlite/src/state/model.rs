//! Database model for application state sections.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// One top-level section of the application state blob, stored as JSON text.
#[derive(Queryable, Insertable, Selectable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::app_state)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct AppStateSectionDB {
    pub section_key: String,
    pub section_value: String,
    pub updated_at: String,
}
