//! Persisted state models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::migrations::CURRENT_SCHEMA_VERSION;
use crate::categories::Category;
use crate::goals::Goal;
use crate::vision_board::VisionBoardItem;

/// The whole application state as handed to and from the persistence
/// collaborator: top-level section name to section contents.
///
/// The goal store only ever touches the bucket list section; every other
/// section is written back exactly as it was loaded.
pub type AppBlob = Map<String, Value>;

/// Strongly-typed contents of the bucket list section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BucketListState {
    pub schema_version: u32,
    pub categories: Vec<Category>,
    pub goals: Vec<Goal>,
    pub vision_board: Vec<VisionBoardItem>,
}

impl Default for BucketListState {
    fn default() -> Self {
        BucketListState {
            schema_version: CURRENT_SCHEMA_VERSION,
            categories: Category::defaults(),
            goals: Vec::new(),
            vision_board: Vec::new(),
        }
    }
}
