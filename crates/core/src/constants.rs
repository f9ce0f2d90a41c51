/// Key of the bucket list section inside the shared application state blob.
pub const BUCKET_LIST_SECTION_KEY: &str = "bucketList";

/// Category filter value that matches every goal.
pub const ALL_CATEGORIES: &str = "all";

/// Status filter values recognized by `get_goals_by_status`; anything else
/// matches every goal.
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_ACTIVE: &str = "active";

/// Goal field defaults applied on create and when backfilling stored goals.
pub const DEFAULT_GOAL_PROGRESS: i32 = 0;
pub const DEFAULT_GOAL_CURRENT_VALUE: f64 = 0.0;
pub const DEFAULT_GOAL_TARGET_VALUE: f64 = 100.0;

/// Vision board item appearance defaults.
pub const DEFAULT_VISION_COLOR: &str = "#6366f1";
pub const DEFAULT_VISION_ICON: &str = "star";

/// Categories seeded the first time the bucket list section is read.
/// Ids are fixed so goals created against them survive a reseed elsewhere.
pub const DEFAULT_CATEGORIES: [(&str, &str); 6] = [
    ("travel", "Travel"),
    ("adventure", "Adventure"),
    ("career", "Career"),
    ("learning", "Learning"),
    ("health", "Health & Fitness"),
    ("personal", "Personal Growth"),
];
