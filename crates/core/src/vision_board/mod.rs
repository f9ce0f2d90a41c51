//! Vision board module - domain models, service, and traits.

mod vision_board_model;
mod vision_board_service;
mod vision_board_traits;

pub use vision_board_model::{NewVisionBoardItem, VisionBoardItem, VisionBoardItemUpdate};
pub use vision_board_traits::VisionBoardServiceTrait;
