pub mod builder;
pub mod export;
pub mod session;
pub mod sorter;

pub use builder::build_shopping_list;
pub use export::export_shopping_list_csv;
pub use session::{ShoppingSession, ToggleOutcome};
pub use sorter::{apply_custom_order, resolve_layout, sort_items, ItemGroup, ViewMode};
