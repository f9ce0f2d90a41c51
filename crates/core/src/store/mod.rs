//! The goal store: CRUD and statistics over the bucket list section.

mod goal_store;

pub(crate) use goal_store::Mutation;
pub use goal_store::GoalStore;
