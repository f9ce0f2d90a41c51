use crate::categories::{Category, CategoryUpdate};
use crate::errors::Result;

/// Trait for category operations
pub trait CategoryServiceTrait: Send + Sync {
    /// All categories, seeding the defaults on first access.
    fn get_categories(&self) -> Result<Vec<Category>>;

    fn get_category(&self, id: &str) -> Result<Option<Category>>;

    fn create_category(&self, name: String) -> Result<Category>;

    /// Returns `None` when no category has `id`.
    fn update_category(&self, id: &str, update: CategoryUpdate) -> Result<Option<Category>>;

    /// Removes the category and clears it from every goal that referenced
    /// it. Goals themselves are never deleted. Returns whether a category
    /// was removed.
    fn delete_category(&self, id: &str) -> Result<bool>;
}
