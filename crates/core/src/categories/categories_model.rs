//! Category domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CATEGORIES;

/// Domain model representing a goal category.
///
/// Seeded categories carry no timestamps; user-created ones record
/// `created_at`, and `updated_at` is stamped on every update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial update for a category. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub name: Option<String>,
}

impl Category {
    /// The six categories a fresh bucket list starts with.
    pub fn defaults() -> Vec<Category> {
        DEFAULT_CATEGORIES
            .iter()
            .map(|(id, name)| Category {
                id: (*id).to_string(),
                name: (*name).to_string(),
                created_at: None,
                updated_at: None,
            })
            .collect()
    }

    pub(crate) fn apply(&mut self, update: CategoryUpdate, now: DateTime<Utc>) {
        if let Some(name) = update.name {
            self.name = name;
        }
        self.updated_at = Some(now);
    }
}
