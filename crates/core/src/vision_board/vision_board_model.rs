//! Vision board domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_VISION_COLOR, DEFAULT_VISION_ICON};

/// A card on the vision board. Independent of goals and categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisionBoardItem {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Hex color, e.g. `#6366f1`.
    pub color: String,
    /// Symbolic icon id understood by the UI.
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Input model for adding a vision board item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewVisionBoardItem {
    pub title: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// Partial update for a vision board item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisionBoardItemUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl VisionBoardItem {
    pub(crate) fn from_new(id: String, item: NewVisionBoardItem, now: DateTime<Utc>) -> Self {
        VisionBoardItem {
            id,
            title: item.title,
            description: item.description.unwrap_or_default(),
            color: item
                .color
                .unwrap_or_else(|| DEFAULT_VISION_COLOR.to_string()),
            icon: item.icon.unwrap_or_else(|| DEFAULT_VISION_ICON.to_string()),
            created_at: Some(now),
            updated_at: None,
        }
    }

    pub(crate) fn apply(&mut self, update: VisionBoardItemUpdate, now: DateTime<Utc>) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(color) = update.color {
            self.color = color;
        }
        if let Some(icon) = update.icon {
            self.icon = icon;
        }
        self.updated_at = Some(now);
    }
}
