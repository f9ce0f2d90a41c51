//! Property-based integration tests for the goal store.
//!
//! These tests verify that the derived fields and cross-collection rules
//! hold across random inputs, using the `proptest` crate for random test
//! case generation.

use std::sync::Arc;

use bucketlist_core::categories::CategoryServiceTrait;
use bucketlist_core::goals::{
    summarize, GoalServiceTrait, GoalUpdate, Milestone, NewGoal, Priority, ProgressType,
};
use bucketlist_core::state::InMemoryStateStore;
use bucketlist_core::GoalStore;
use proptest::prelude::*;

// =============================================================================
// Generators
// =============================================================================

fn arb_progress_type() -> impl Strategy<Value = ProgressType> {
    prop_oneof![
        Just(ProgressType::Simple),
        Just(ProgressType::Percentage),
        Just(ProgressType::Counter),
        Just(ProgressType::Milestone),
    ]
}

fn arb_priority() -> impl Strategy<Value = Priority> {
    prop_oneof![Just(Priority::Low), Just(Priority::Medium), Just(Priority::High)]
}

fn arb_milestones(max: usize) -> impl Strategy<Value = Vec<Milestone>> {
    proptest::collection::vec(
        ("[a-z]{1,12}", any::<bool>()).prop_map(|(text, completed)| Milestone { text, completed }),
        0..=max,
    )
}

/// Generates goal input with every field populated.
fn arb_new_goal() -> impl Strategy<Value = NewGoal> {
    (
        "[a-z ]{0,20}",                                  // title
        prop_oneof![Just(""), Just("travel"), Just("career"), Just("health")],
        arb_progress_type(),
        0i32..=100,                                      // progress
        0.0f64..500.0,                                   // current_value
        prop_oneof![Just(0.0f64), 1.0f64..500.0],        // target_value
        arb_milestones(8),
        arb_priority(),
        any::<bool>(),                                   // completed
    )
        .prop_map(
            |(
                title,
                category,
                progress_type,
                progress,
                current_value,
                target_value,
                milestones,
                priority,
                completed,
            )| NewGoal {
                title: Some(title),
                category: Some(category.to_string()),
                progress_type: Some(progress_type),
                progress: Some(progress),
                current_value: Some(current_value),
                target_value: Some(target_value),
                milestones: Some(milestones),
                priority: Some(priority),
                completed: Some(completed),
                ..Default::default()
            },
        )
}

fn store() -> GoalStore {
    GoalStore::new(Arc::new(InMemoryStateStore::new()))
}

fn completed_count(milestones: &[Milestone]) -> usize {
    milestones.iter().filter(|m| m.completed).count()
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The derived milestone count matches the milestones after create and
    /// after every update that replaces them.
    #[test]
    fn prop_completed_milestones_is_derived(
        new_goal in arb_new_goal(),
        replacements in proptest::collection::vec(arb_milestones(8), 1..5)
    ) {
        let store = store();
        let goal = store.create_goal(new_goal).unwrap();
        prop_assert_eq!(goal.completed_milestones, completed_count(&goal.milestones));

        for milestones in replacements {
            let updated = store
                .update_goal(&goal.id, GoalUpdate {
                    milestones: Some(milestones.clone()),
                    ..Default::default()
                })
                .unwrap()
                .unwrap();
            prop_assert_eq!(updated.completed_milestones, completed_count(&milestones));

            let stored = store.get_goal(&goal.id).unwrap().unwrap();
            prop_assert_eq!(stored, updated);
        }
    }

    /// Counts in the summary always add up, and the average stays within
    /// the range the contributing goals allow.
    #[test]
    fn prop_summary_counts_are_consistent(
        goals in proptest::collection::vec(arb_new_goal(), 0..20)
    ) {
        let store = store();
        for new_goal in goals {
            store.create_goal(new_goal).unwrap();
        }

        let all = store.get_goals().unwrap();
        let stats = store.get_summary_stats().unwrap();

        prop_assert_eq!(stats, summarize(&all));
        prop_assert_eq!(stats.total_goals, all.len());
        prop_assert_eq!(stats.completed_goals + stats.in_progress_goals, stats.total_goals);
        prop_assert_eq!(
            stats.completed_goals,
            store.get_goals_by_status("completed").unwrap().len()
        );

        let contributions: Vec<f64> = all.iter().filter_map(|g| g.progress_contribution()).collect();
        if contributions.is_empty() {
            prop_assert_eq!(stats.avg_completion_rate, 0);
        } else {
            let max = contributions.iter().cloned().fold(f64::MIN, f64::max);
            prop_assert!(f64::from(stats.avg_completion_rate) <= max.round() + 1.0);
        }
    }

    /// Deleting a category clears exactly the goals that referenced it and
    /// never removes a goal.
    #[test]
    fn prop_category_delete_only_detaches_its_goals(
        goals in proptest::collection::vec(arb_new_goal(), 1..15)
    ) {
        let store = store();
        for new_goal in goals {
            store.create_goal(new_goal).unwrap();
        }
        let before = store.get_goals().unwrap();

        prop_assert!(store.delete_category("travel").unwrap());
        let after = store.get_goals().unwrap();

        prop_assert_eq!(after.len(), before.len());
        for (old, new) in before.iter().zip(after.iter()) {
            prop_assert_eq!(&old.id, &new.id);
            if old.category == "travel" {
                prop_assert_eq!(new.category.as_str(), "");
            } else {
                prop_assert_eq!(&new.category, &old.category);
            }
        }
        prop_assert!(store.get_goals_by_category("travel").unwrap().is_empty());
    }
}
