//! Bucket list section migrations.
//!
//! Stored sections are upgraded to the current schema once, when they are
//! loaded, instead of every accessor backfilling missing fields on its own.
//! Each migration works on the raw JSON section so it can repair data the
//! typed models would refuse to decode.

use chrono::{DateTime, SecondsFormat, Utc};
use log::info;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use super::{AppBlob, BucketListState};
use crate::categories::Category;
use crate::constants::{
    BUCKET_LIST_SECTION_KEY, DEFAULT_GOAL_CURRENT_VALUE, DEFAULT_GOAL_PROGRESS,
    DEFAULT_GOAL_TARGET_VALUE, DEFAULT_VISION_COLOR, DEFAULT_VISION_ICON,
};
use crate::errors::{Error, Result, ValidationError};

/// Schema version written by this build.
pub const CURRENT_SCHEMA_VERSION: u32 = 3;

const SCHEMA_VERSION_KEY: &str = "schemaVersion";

/// Migration definitions, in ascending version order.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "Initialize section and seed default categories",
        up: migrate_v1_initialize,
    },
    Migration {
        version: 2,
        description: "Backfill goal and vision board fields",
        up: migrate_v2_backfill,
    },
    Migration {
        version: 3,
        description: "Recompute completed milestone counts",
        up: migrate_v3_milestone_counts,
    },
];

type Section = Map<String, Value>;

/// A section migration
pub struct Migration {
    /// Version the section is at after this migration
    pub version: u32,
    /// Description
    pub description: &'static str,
    up: fn(&mut Section, DateTime<Utc>) -> Result<()>,
}

/// Result of reading the bucket list section out of a blob.
#[derive(Debug, Clone)]
pub struct LoadedSection {
    pub state: BucketListState,
    /// True when the stored section was missing or older than
    /// `CURRENT_SCHEMA_VERSION` and should be written back.
    pub upgraded: bool,
}

/// Extracts the bucket list section from `blob`, upgrading it if needed.
pub fn load_section(blob: &AppBlob, now: DateTime<Utc>) -> Result<LoadedSection> {
    let mut section = match blob.get(BUCKET_LIST_SECTION_KEY) {
        None | Some(Value::Null) => Section::new(),
        Some(Value::Object(map)) => map.clone(),
        Some(other) => {
            return Err(malformed(format!(
                "'{}' must be an object, found {}",
                BUCKET_LIST_SECTION_KEY,
                type_name(other)
            )))
        }
    };

    let stored_version = schema_version(&section)?;
    if stored_version > CURRENT_SCHEMA_VERSION {
        return Err(Error::Migration(format!(
            "stored schema version {} is newer than supported version {}",
            stored_version, CURRENT_SCHEMA_VERSION
        )));
    }

    let mut upgraded = false;
    for migration in MIGRATIONS.iter().filter(|m| m.version > stored_version) {
        info!(
            "Applying bucket list migration v{}: {}",
            migration.version, migration.description
        );
        (migration.up)(&mut section, now)?;
        upgraded = true;
    }
    section.insert(SCHEMA_VERSION_KEY.to_string(), json!(CURRENT_SCHEMA_VERSION));

    let state: BucketListState = serde_json::from_value(Value::Object(section))?;
    Ok(LoadedSection { state, upgraded })
}

/// Writes `state` into the bucket list section of `blob`.
pub fn store_section(blob: &mut AppBlob, state: &BucketListState) -> Result<()> {
    blob.insert(
        BUCKET_LIST_SECTION_KEY.to_string(),
        serde_json::to_value(state)?,
    );
    Ok(())
}

fn schema_version(section: &Section) -> Result<u32> {
    match section.get(SCHEMA_VERSION_KEY) {
        None | Some(Value::Null) => Ok(0),
        Some(value) => value
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| malformed(format!("invalid {}: {}", SCHEMA_VERSION_KEY, value))),
    }
}

fn migrate_v1_initialize(section: &mut Section, _now: DateTime<Utc>) -> Result<()> {
    // An existing empty list means the user deleted every category.
    if matches!(section.get("categories"), None | Some(Value::Null)) {
        section.insert(
            "categories".to_string(),
            serde_json::to_value(Category::defaults())?,
        );
    }
    ensure_array(section, "categories")?;
    ensure_array(section, "goals")?;
    ensure_array(section, "visionBoard")?;
    Ok(())
}

fn migrate_v2_backfill(section: &mut Section, now: DateTime<Utc>) -> Result<()> {
    let timestamp = json!(now.to_rfc3339_opts(SecondsFormat::Millis, true));

    for category in records_mut(section, "categories")? {
        backfill_id(category);
        backfill(category, "name", json!(""));
    }

    for goal in records_mut(section, "goals")? {
        backfill_id(goal);
        backfill(goal, "title", json!(""));
        backfill(goal, "description", json!(""));
        backfill(goal, "category", json!(""));
        backfill(goal, "progressType", json!("simple"));
        backfill(goal, "progress", json!(DEFAULT_GOAL_PROGRESS));
        backfill(goal, "currentValue", json!(DEFAULT_GOAL_CURRENT_VALUE));
        backfill(goal, "targetValue", json!(DEFAULT_GOAL_TARGET_VALUE));
        backfill(goal, "milestones", json!([]));
        backfill(goal, "priority", json!("medium"));
        backfill(goal, "completed", json!(false));

        // Older records stored fractional slider values.
        if let Some(progress) = goal.get("progress").and_then(Value::as_f64) {
            goal.insert("progress".to_string(), json!(progress.round() as i64));
        }

        let blank_target_date = match goal.get("targetDate") {
            Some(Value::String(date)) => date.trim().is_empty(),
            None => true,
            _ => false,
        };
        if blank_target_date {
            goal.insert("targetDate".to_string(), Value::Null);
        }

        if let Some(Value::Array(milestones)) = goal.get_mut("milestones") {
            for milestone in milestones.iter_mut().filter_map(Value::as_object_mut) {
                backfill(milestone, "text", json!(""));
                backfill(milestone, "completed", json!(false));
            }
        }

        if !matches!(goal.get("integrations"), Some(Value::Object(_))) {
            goal.insert(
                "integrations".to_string(),
                json!({ "habitIds": [], "financeGoalId": null }),
            );
        }
        if let Some(Value::Object(integrations)) = goal.get_mut("integrations") {
            backfill(integrations, "habitIds", json!([]));
            integrations
                .entry("financeGoalId".to_string())
                .or_insert(Value::Null);
        }

        backfill(goal, "createdAt", timestamp.clone());
        let created_at = goal.get("createdAt").cloned().unwrap_or(Value::Null);
        backfill(goal, "modifiedAt", created_at);
    }

    for item in records_mut(section, "visionBoard")? {
        backfill_id(item);
        backfill(item, "title", json!(""));
        backfill(item, "description", json!(""));
        backfill(item, "color", json!(DEFAULT_VISION_COLOR));
        backfill(item, "icon", json!(DEFAULT_VISION_ICON));
    }

    Ok(())
}

fn migrate_v3_milestone_counts(section: &mut Section, _now: DateTime<Utc>) -> Result<()> {
    for goal in records_mut(section, "goals")? {
        let completed = goal
            .get("milestones")
            .and_then(Value::as_array)
            .map(|milestones| {
                milestones
                    .iter()
                    .filter(|m| m.get("completed").and_then(Value::as_bool).unwrap_or(false))
                    .count()
            })
            .unwrap_or(0);
        goal.insert("completedMilestones".to_string(), json!(completed));
    }
    Ok(())
}

fn ensure_array(section: &mut Section, key: &str) -> Result<()> {
    match section.get(key) {
        None | Some(Value::Null) => {
            section.insert(key.to_string(), json!([]));
            Ok(())
        }
        Some(Value::Array(_)) => Ok(()),
        Some(other) => Err(malformed(format!(
            "'{}' must be a list, found {}",
            key,
            type_name(other)
        ))),
    }
}

fn records_mut<'a>(section: &'a mut Section, key: &str) -> Result<Vec<&'a mut Section>> {
    let Some(Value::Array(records)) = section.get_mut(key) else {
        return Err(malformed(format!("'{}' must be a list", key)));
    };
    records
        .iter_mut()
        .map(|record| match record {
            Value::Object(map) => Ok(map),
            other => Err(malformed(format!(
                "'{}' entries must be objects, found {}",
                key,
                type_name(other)
            ))),
        })
        .collect()
}

/// Inserts `default` when `key` is absent or null.
fn backfill(record: &mut Section, key: &str, default: Value) {
    if matches!(record.get(key), None | Some(Value::Null)) {
        record.insert(key.to_string(), default);
    }
}

fn backfill_id(record: &mut Section) {
    let missing = match record.get("id") {
        Some(Value::String(id)) => id.is_empty(),
        _ => true,
    };
    if missing {
        record.insert("id".to_string(), json!(Uuid::new_v4().to_string()));
    }
}

fn malformed(message: String) -> Error {
    Error::Validation(ValidationError::MalformedState(message))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::{Priority, ProgressType};

    fn blob_with(section: Value) -> AppBlob {
        let mut blob = AppBlob::new();
        blob.insert(BUCKET_LIST_SECTION_KEY.to_string(), section);
        blob
    }

    #[test]
    fn test_missing_section_is_initialized_with_defaults() {
        let loaded = load_section(&AppBlob::new(), Utc::now()).unwrap();

        assert!(loaded.upgraded);
        assert_eq!(loaded.state.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(loaded.state.categories.len(), 6);
        assert_eq!(loaded.state.categories[0].id, "travel");
        assert!(loaded.state.goals.is_empty());
        assert!(loaded.state.vision_board.is_empty());
    }

    #[test]
    fn test_empty_category_list_is_not_reseeded() {
        let blob = blob_with(json!({ "categories": [] }));
        let loaded = load_section(&blob, Utc::now()).unwrap();

        assert!(loaded.state.categories.is_empty());
    }

    #[test]
    fn test_current_section_is_not_upgraded() {
        let mut blob = AppBlob::new();
        store_section(&mut blob, &BucketListState::default()).unwrap();

        let loaded = load_section(&blob, Utc::now()).unwrap();
        assert!(!loaded.upgraded);
        assert_eq!(loaded.state, BucketListState::default());
    }

    #[test]
    fn test_legacy_goal_is_backfilled() {
        let blob = blob_with(json!({
            "categories": [{ "id": "travel", "name": "Travel" }],
            "goals": [{
                "id": "legacy-1",
                "title": "See the northern lights",
                "progress": 42.6,
                "targetDate": "",
                "milestones": [
                    { "text": "Book flights", "completed": true },
                    { "text": "Pack" }
                ],
                "completedMilestones": 0
            }]
        }));

        let loaded = load_section(&blob, Utc::now()).unwrap();
        let goal = &loaded.state.goals[0];

        assert_eq!(goal.id, "legacy-1");
        assert_eq!(goal.progress_type, ProgressType::Simple);
        assert_eq!(goal.progress, 43);
        assert_eq!(goal.target_value, 100.0);
        assert_eq!(goal.priority, Priority::Medium);
        assert_eq!(goal.target_date, None);
        assert_eq!(goal.completed_milestones, 1);
        assert!(!goal.milestones[1].completed);
        assert!(goal.integrations.habit_ids.is_empty());
        assert_eq!(goal.created_at, goal.modified_at);
    }

    #[test]
    fn test_records_without_ids_get_one() {
        let blob = blob_with(json!({
            "visionBoard": [{ "title": "Beach house" }]
        }));

        let loaded = load_section(&blob, Utc::now()).unwrap();
        let item = &loaded.state.vision_board[0];

        assert!(!item.id.is_empty());
        assert_eq!(item.color, DEFAULT_VISION_COLOR);
        assert_eq!(item.icon, DEFAULT_VISION_ICON);
    }

    #[test]
    fn test_newer_schema_is_rejected() {
        let blob = blob_with(json!({ "schemaVersion": CURRENT_SCHEMA_VERSION + 1 }));

        match load_section(&blob, Utc::now()) {
            Err(Error::Migration(_)) => {}
            other => panic!("expected migration error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_object_section_is_malformed() {
        let blob = blob_with(json!([1, 2, 3]));

        match load_section(&blob, Utc::now()) {
            Err(Error::Validation(ValidationError::MalformedState(_))) => {}
            other => panic!("expected malformed state, got {:?}", other),
        }
    }

    #[test]
    fn test_migrations_are_ordered() {
        let versions: Vec<u32> = MIGRATIONS.iter().map(|m| m.version).collect();
        let mut sorted = versions.clone();
        sorted.sort_unstable();

        assert_eq!(versions, sorted);
        assert_eq!(versions.last().copied(), Some(CURRENT_SCHEMA_VERSION));
    }
}
