use log::debug;

use crate::constants::ALL_CATEGORIES;
use crate::errors::Result;
use crate::goals::goals_stats::summarize;
use crate::goals::goals_traits::GoalServiceTrait;
use crate::goals::{Goal, GoalStatusFilter, GoalUpdate, NewGoal, SummaryStats};
use crate::store::{GoalStore, Mutation};

impl GoalServiceTrait for GoalStore {
    fn get_goals(&self) -> Result<Vec<Goal>> {
        self.read(|state| state.goals.clone())
    }

    fn get_goal(&self, id: &str) -> Result<Option<Goal>> {
        self.read(|state| state.goals.iter().find(|g| g.id == id).cloned())
    }

    fn create_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        self.mutate(|state, now| {
            let goal = Goal::from_new(GoalStore::new_id(), new_goal, now);
            debug!("Creating goal {} ({:?})", goal.id, goal.progress_type);
            state.goals.push(goal.clone());
            Mutation::save(goal)
        })
    }

    fn update_goal(&self, id: &str, update: GoalUpdate) -> Result<Option<Goal>> {
        self.mutate(|state, now| match state.goals.iter_mut().find(|g| g.id == id) {
            Some(goal) => {
                goal.apply(update, now);
                debug!("Updated goal {}", id);
                Mutation::save(Some(goal.clone()))
            }
            None => Mutation::skip(None),
        })
    }

    fn delete_goal(&self, id: &str) -> Result<bool> {
        self.mutate(|state, _now| {
            let before = state.goals.len();
            state.goals.retain(|g| g.id != id);
            if state.goals.len() == before {
                Mutation::skip(false)
            } else {
                debug!("Deleted goal {}", id);
                Mutation::save(true)
            }
        })
    }

    fn get_goals_by_category(&self, category: &str) -> Result<Vec<Goal>> {
        self.read(|state| {
            if category == ALL_CATEGORIES {
                return state.goals.clone();
            }
            state
                .goals
                .iter()
                .filter(|g| g.category == category)
                .cloned()
                .collect()
        })
    }

    fn get_goals_by_status(&self, status: &str) -> Result<Vec<Goal>> {
        let filter = GoalStatusFilter::from(status);
        self.read(|state| {
            state
                .goals
                .iter()
                .filter(|g| filter.matches(g))
                .cloned()
                .collect()
        })
    }

    fn get_summary_stats(&self) -> Result<SummaryStats> {
        self.read(|state| summarize(&state.goals))
    }
}
