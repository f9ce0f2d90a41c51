use log::debug;

use crate::categories::categories_traits::CategoryServiceTrait;
use crate::categories::{Category, CategoryUpdate};
use crate::errors::Result;
use crate::store::{GoalStore, Mutation};

impl CategoryServiceTrait for GoalStore {
    fn get_categories(&self) -> Result<Vec<Category>> {
        self.read(|state| state.categories.clone())
    }

    fn get_category(&self, id: &str) -> Result<Option<Category>> {
        self.read(|state| state.categories.iter().find(|c| c.id == id).cloned())
    }

    fn create_category(&self, name: String) -> Result<Category> {
        self.mutate(|state, now| {
            let category = Category {
                id: GoalStore::new_id(),
                name,
                created_at: Some(now),
                updated_at: None,
            };
            debug!("Creating category {} ({})", category.id, category.name);
            state.categories.push(category.clone());
            Mutation::save(category)
        })
    }

    fn update_category(&self, id: &str, update: CategoryUpdate) -> Result<Option<Category>> {
        self.mutate(|state, now| {
            match state.categories.iter_mut().find(|c| c.id == id) {
                Some(category) => {
                    category.apply(update, now);
                    debug!("Updated category {}", id);
                    Mutation::save(Some(category.clone()))
                }
                None => Mutation::skip(None),
            }
        })
    }

    fn delete_category(&self, id: &str) -> Result<bool> {
        self.mutate(|state, now| {
            let before = state.categories.len();
            state.categories.retain(|c| c.id != id);
            if state.categories.len() == before {
                return Mutation::skip(false);
            }

            let mut detached = 0;
            for goal in state.goals.iter_mut().filter(|g| g.category == id) {
                goal.category.clear();
                goal.modified_at = now;
                detached += 1;
            }
            debug!(
                "Deleted category {} and detached it from {} goals",
                id, detached
            );
            Mutation::save(true)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::{GoalServiceTrait, NewGoal};
    use crate::state::InMemoryStateStore;
    use std::sync::Arc;

    fn store() -> GoalStore {
        GoalStore::new(Arc::new(InMemoryStateStore::new()))
    }

    fn goal_in(store: &GoalStore, category: &str) -> String {
        store
            .create_goal(NewGoal {
                title: Some(format!("goal in {}", category)),
                category: Some(category.to_string()),
                ..Default::default()
            })
            .unwrap()
            .id
    }

    #[test]
    fn test_defaults_seeded_on_first_read() {
        let store = store();
        let categories = store.get_categories().unwrap();

        let ids: Vec<&str> = categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["travel", "adventure", "career", "learning", "health", "personal"]
        );
    }

    #[test]
    fn test_create_and_update_category() {
        let store = store();
        let created = store.create_category("Music".to_string()).unwrap();
        assert!(created.created_at.is_some());
        assert!(created.updated_at.is_none());
        assert_eq!(store.get_categories().unwrap().len(), 7);

        let updated = store
            .update_category(
                &created.id,
                CategoryUpdate {
                    name: Some("Music & Arts".to_string()),
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Music & Arts");
        assert!(updated.updated_at.is_some());
        assert_eq!(store.get_category(&created.id).unwrap(), Some(updated));
    }

    #[test]
    fn test_update_missing_category_returns_none() {
        let store = store();
        let result = store
            .update_category("missing", CategoryUpdate::default())
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_delete_category_detaches_goals() {
        let store = store();
        let travel_a = goal_in(&store, "travel");
        let travel_b = goal_in(&store, "travel");
        let career = goal_in(&store, "career");

        assert!(store.delete_category("travel").unwrap());

        for id in [travel_a, travel_b] {
            let goal = store.get_goal(&id).unwrap().unwrap();
            assert_eq!(goal.category, "");
        }
        assert_eq!(store.get_goal(&career).unwrap().unwrap().category, "career");
        assert_eq!(store.get_goals().unwrap().len(), 3);
        assert!(store.get_category("travel").unwrap().is_none());
    }

    #[test]
    fn test_delete_missing_category_changes_nothing() {
        let store = store();
        let before = store.get_categories().unwrap();

        assert!(!store.delete_category("missing").unwrap());
        assert_eq!(store.get_categories().unwrap(), before);
    }
}
