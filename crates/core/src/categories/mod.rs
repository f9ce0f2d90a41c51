//! Categories module - domain models, service, and traits.

mod categories_model;
mod categories_service;
mod categories_traits;

pub use categories_model::{Category, CategoryUpdate};
pub use categories_traits::CategoryServiceTrait;
