use crate::errors::Result;
use crate::goals::{Goal, GoalUpdate, NewGoal, SummaryStats};

/// Trait for goal operations
pub trait GoalServiceTrait: Send + Sync {
    fn get_goals(&self) -> Result<Vec<Goal>>;

    fn get_goal(&self, id: &str) -> Result<Option<Goal>>;

    fn create_goal(&self, new_goal: NewGoal) -> Result<Goal>;

    /// Returns `None` when no goal has `id`.
    fn update_goal(&self, id: &str, update: GoalUpdate) -> Result<Option<Goal>>;

    /// Returns whether a goal was removed.
    fn delete_goal(&self, id: &str) -> Result<bool>;

    /// `"all"` returns every goal; anything else is an exact category id match.
    fn get_goals_by_category(&self, category: &str) -> Result<Vec<Goal>>;

    /// `"completed"` or `"active"` filter on completion; anything else
    /// returns every goal.
    fn get_goals_by_status(&self, status: &str) -> Result<Vec<Goal>>;

    fn get_summary_stats(&self) -> Result<SummaryStats>;
}
