use log::debug;

use crate::errors::Result;
use crate::store::{GoalStore, Mutation};
use crate::vision_board::vision_board_traits::VisionBoardServiceTrait;
use crate::vision_board::{NewVisionBoardItem, VisionBoardItem, VisionBoardItemUpdate};

impl VisionBoardServiceTrait for GoalStore {
    fn get_vision_board_items(&self) -> Result<Vec<VisionBoardItem>> {
        self.read(|state| state.vision_board.clone())
    }

    fn get_vision_board_item(&self, id: &str) -> Result<Option<VisionBoardItem>> {
        self.read(|state| state.vision_board.iter().find(|i| i.id == id).cloned())
    }

    fn add_vision_board_item(&self, item: NewVisionBoardItem) -> Result<VisionBoardItem> {
        self.mutate(|state, now| {
            let item = VisionBoardItem::from_new(GoalStore::new_id(), item, now);
            debug!("Adding vision board item {}", item.id);
            state.vision_board.push(item.clone());
            Mutation::save(item)
        })
    }

    fn update_vision_board_item(
        &self,
        id: &str,
        update: VisionBoardItemUpdate,
    ) -> Result<Option<VisionBoardItem>> {
        self.mutate(
            |state, now| match state.vision_board.iter_mut().find(|i| i.id == id) {
                Some(item) => {
                    item.apply(update, now);
                    debug!("Updated vision board item {}", id);
                    Mutation::save(Some(item.clone()))
                }
                None => Mutation::skip(None),
            },
        )
    }

    fn delete_vision_board_item(&self, id: &str) -> Result<bool> {
        self.mutate(|state, _now| {
            let before = state.vision_board.len();
            state.vision_board.retain(|i| i.id != id);
            if state.vision_board.len() == before {
                Mutation::skip(false)
            } else {
                debug!("Deleted vision board item {}", id);
                Mutation::save(true)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_VISION_COLOR, DEFAULT_VISION_ICON};
    use crate::state::InMemoryStateStore;
    use std::sync::Arc;

    fn store() -> GoalStore {
        GoalStore::new(Arc::new(InMemoryStateStore::new()))
    }

    #[test]
    fn test_add_applies_appearance_defaults() {
        let store = store();
        let item = store
            .add_vision_board_item(NewVisionBoardItem {
                title: "Cabin in the woods".to_string(),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(item.color, DEFAULT_VISION_COLOR);
        assert_eq!(item.icon, DEFAULT_VISION_ICON);
        assert_eq!(item.description, "");
        assert!(item.created_at.is_some());
        assert_eq!(store.get_vision_board_items().unwrap(), vec![item]);
    }

    #[test]
    fn test_update_and_delete_item() {
        let store = store();
        let item = store
            .add_vision_board_item(NewVisionBoardItem {
                title: "Garden".to_string(),
                color: Some("#22c55e".to_string()),
                icon: Some("leaf".to_string()),
                ..Default::default()
            })
            .unwrap();

        let updated = store
            .update_vision_board_item(
                &item.id,
                VisionBoardItemUpdate {
                    description: Some("Raised beds".to_string()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.description, "Raised beds");
        assert_eq!(updated.color, "#22c55e");
        assert!(updated.updated_at.is_some());

        assert!(store.delete_vision_board_item(&item.id).unwrap());
        assert!(store.get_vision_board_item(&item.id).unwrap().is_none());
    }

    #[test]
    fn test_missing_item_sentinels() {
        let store = store();
        store
            .add_vision_board_item(NewVisionBoardItem {
                title: "Keep me".to_string(),
                ..Default::default()
            })
            .unwrap();

        assert!(store
            .update_vision_board_item("missing", VisionBoardItemUpdate::default())
            .unwrap()
            .is_none());
        assert!(!store.delete_vision_board_item("missing").unwrap());
        assert_eq!(store.get_vision_board_items().unwrap().len(), 1);
    }
}
