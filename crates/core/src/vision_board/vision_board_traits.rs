use crate::errors::Result;
use crate::vision_board::{NewVisionBoardItem, VisionBoardItem, VisionBoardItemUpdate};

/// Trait for vision board operations
pub trait VisionBoardServiceTrait: Send + Sync {
    fn get_vision_board_items(&self) -> Result<Vec<VisionBoardItem>>;

    fn get_vision_board_item(&self, id: &str) -> Result<Option<VisionBoardItem>>;

    fn add_vision_board_item(&self, item: NewVisionBoardItem) -> Result<VisionBoardItem>;

    /// Returns `None` when no item has `id`.
    fn update_vision_board_item(
        &self,
        id: &str,
        update: VisionBoardItemUpdate,
    ) -> Result<Option<VisionBoardItem>>;

    /// Returns whether an item was removed.
    fn delete_vision_board_item(&self, id: &str) -> Result<bool>;
}
