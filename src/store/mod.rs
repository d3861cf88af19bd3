pub mod household;
pub mod json_store;
pub mod pantry_csv;
pub mod state;

pub use household::{HouseholdData, MergeSummary, Pantry, PantryStore};
pub use json_store::JsonStore;
pub use pantry_csv::load_pantry_csv;
pub use state::ListState;
