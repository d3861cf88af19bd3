//! Errors raised around the pure list core: store lookups and persistence.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Pantry item not found: {0}")]
    PantryItemNotFound(String),

    #[error("Shopping list item not found: {0}")]
    ItemNotFound(String),

    #[error("Saved meal plan not found: {0}")]
    PlanNotFound(String),

    #[error("Favourite recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("Supermarket layout not found: {0}")]
    LayoutNotFound(String),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
