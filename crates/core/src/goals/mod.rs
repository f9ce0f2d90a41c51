//! Goals module - domain models, service, statistics, and traits.

mod goals_model;
mod goals_service;
mod goals_stats;
mod goals_traits;

pub use goals_model::{
    Goal, GoalIntegrations, GoalStatusFilter, GoalUpdate, Milestone, NewGoal, Priority,
    ProgressType, SummaryStats,
};
pub use goals_stats::summarize;
pub use goals_traits::GoalServiceTrait;
