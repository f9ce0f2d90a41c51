//! Goals domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_GOAL_CURRENT_VALUE, DEFAULT_GOAL_PROGRESS, DEFAULT_GOAL_TARGET_VALUE, STATUS_ACTIVE,
    STATUS_COMPLETED,
};

/// How progress on a goal is tracked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressType {
    /// Done or not done, nothing in between.
    #[default]
    Simple,
    /// `progress` holds a 0-100 percentage.
    Percentage,
    /// `current_value` counts towards `target_value`.
    Counter,
    /// Progress is the share of completed milestones.
    Milestone,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

/// Links to records owned by other parts of the app. Carried through
/// untouched; the goal store never fills these in itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalIntegrations {
    #[serde(default)]
    pub habit_ids: Vec<String>,
    #[serde(default)]
    pub finance_goal_id: Option<String>,
}

/// Domain model representing a bucket list goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Id of the owning category, or empty when uncategorized.
    pub category: String,
    pub progress_type: ProgressType,
    pub progress: i32,
    pub current_value: f64,
    pub target_value: f64,
    pub milestones: Vec<Milestone>,
    /// Always equal to the number of completed entries in `milestones`.
    pub completed_milestones: usize,
    pub target_date: Option<String>,
    pub priority: Priority,
    pub completed: bool,
    pub integrations: GoalIntegrations,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Input model for creating a new goal. Every omitted field gets its default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewGoal {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub progress_type: Option<ProgressType>,
    pub progress: Option<i32>,
    pub current_value: Option<f64>,
    pub target_value: Option<f64>,
    pub milestones: Option<Vec<Milestone>>,
    pub target_date: Option<String>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
    pub integrations: Option<GoalIntegrations>,
}

/// Partial update for a goal, shallow-merged over the stored record.
///
/// `id`, `created_at` and `completed_milestones` are not patchable; the
/// latter is always derived from `milestones`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GoalUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub progress_type: Option<ProgressType>,
    pub progress: Option<i32>,
    pub current_value: Option<f64>,
    pub target_value: Option<f64>,
    pub milestones: Option<Vec<Milestone>>,
    /// `Some(None)` clears the target date; `None` leaves it alone.
    #[serde(
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_date: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
    pub integrations: Option<GoalIntegrations>,
}

/// Filter for `get_goals_by_status`. Parsing is total: anything that is not
/// `completed` or `active` means every goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalStatusFilter {
    Completed,
    Active,
    All,
}

impl From<&str> for GoalStatusFilter {
    fn from(status: &str) -> Self {
        match status {
            STATUS_COMPLETED => GoalStatusFilter::Completed,
            STATUS_ACTIVE => GoalStatusFilter::Active,
            _ => GoalStatusFilter::All,
        }
    }
}

impl GoalStatusFilter {
    pub fn matches(&self, goal: &Goal) -> bool {
        match self {
            GoalStatusFilter::Completed => goal.completed,
            GoalStatusFilter::Active => !goal.completed,
            GoalStatusFilter::All => true,
        }
    }
}

/// Aggregate statistics over every goal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_goals: usize,
    pub completed_goals: usize,
    pub in_progress_goals: usize,
    /// Mean completion percentage of the goals that report progress,
    /// rounded half-up. Zero when no goal reports any.
    pub avg_completion_rate: u32,
}

pub(crate) fn count_completed(milestones: &[Milestone]) -> usize {
    milestones.iter().filter(|m| m.completed).count()
}

impl Goal {
    /// Builds a goal from creation input, filling every omitted field.
    pub(crate) fn from_new(id: String, new_goal: NewGoal, now: DateTime<Utc>) -> Self {
        let milestones = new_goal.milestones.unwrap_or_default();
        Goal {
            id,
            title: new_goal.title.unwrap_or_default(),
            description: new_goal.description.unwrap_or_default(),
            category: new_goal.category.unwrap_or_default(),
            progress_type: new_goal.progress_type.unwrap_or_default(),
            progress: new_goal.progress.unwrap_or(DEFAULT_GOAL_PROGRESS),
            current_value: new_goal.current_value.unwrap_or(DEFAULT_GOAL_CURRENT_VALUE),
            target_value: new_goal.target_value.unwrap_or(DEFAULT_GOAL_TARGET_VALUE),
            completed_milestones: count_completed(&milestones),
            milestones,
            target_date: new_goal.target_date,
            priority: new_goal.priority.unwrap_or_default(),
            completed: new_goal.completed.unwrap_or(false),
            integrations: new_goal.integrations.unwrap_or_default(),
            created_at: now,
            modified_at: now,
        }
    }

    /// Shallow-merges `update` over this goal and stamps `modified_at`.
    pub(crate) fn apply(&mut self, update: GoalUpdate, now: DateTime<Utc>) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(progress_type) = update.progress_type {
            self.progress_type = progress_type;
        }
        if let Some(progress) = update.progress {
            self.progress = progress;
        }
        if let Some(current_value) = update.current_value {
            self.current_value = current_value;
        }
        if let Some(target_value) = update.target_value {
            self.target_value = target_value;
        }
        if let Some(milestones) = update.milestones {
            self.completed_milestones = count_completed(&milestones);
            self.milestones = milestones;
        }
        if let Some(target_date) = update.target_date {
            self.target_date = target_date;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(completed) = update.completed {
            self.completed = completed;
        }
        if let Some(integrations) = update.integrations {
            self.integrations = integrations;
        }
        self.modified_at = now;
    }

    /// Completion percentage this goal contributes to the summary average,
    /// or `None` when it reports no progress at all.
    pub fn progress_contribution(&self) -> Option<f64> {
        match self.progress_type {
            ProgressType::Percentage => return Some(f64::from(self.progress)),
            ProgressType::Counter if self.target_value > 0.0 => {
                return Some(self.current_value / self.target_value * 100.0)
            }
            ProgressType::Milestone if !self.milestones.is_empty() => {
                let done = count_completed(&self.milestones) as f64;
                return Some(done / self.milestones.len() as f64 * 100.0);
            }
            _ => {}
        }

        if self.completed {
            Some(100.0)
        } else {
            None
        }
    }
}
