use std::time::Duration;
use tracing::{info, warn};

use crate::error::StoreError;
use crate::models::{Meal, SavedMealPlan, ShoppingItem};
use crate::shopping_list::build_shopping_list;
use crate::store::{ListState, PantryStore};

/// Result of checking or unchecking a shopping list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Checked,
    Unchecked,
    /// A staple or pantry entry was bought: its pantry item no longer needs
    /// restocking and the entry has left the list.
    Restocked { pantry_id: String },
}

/// Binds the list selections to the pantry for one round of checking items
/// off. The list is rebuilt from its sources on every call.
pub struct ShoppingSession<'a, S: PantryStore> {
    pantry: &'a mut S,
    state: &'a mut ListState,
    plans: Vec<SavedMealPlan>,
    recipes: Vec<Meal>,
    feedback_delay: Duration,
}

impl<'a, S: PantryStore> ShoppingSession<'a, S> {
    pub fn new(
        pantry: &'a mut S,
        state: &'a mut ListState,
        plans: Vec<SavedMealPlan>,
        recipes: Vec<Meal>,
        feedback_delay: Duration,
    ) -> Self {
        Self {
            pantry,
            state,
            plans,
            recipes,
            feedback_delay,
        }
    }

    pub fn items(&self) -> Vec<ShoppingItem> {
        let mut items = build_shopping_list(self.pantry.pantry_items(), &self.plans, &self.recipes);
        self.state.apply_checked(&mut items);
        items
    }

    /// Checks or unchecks an entry.
    ///
    /// Checking a staple or pantry entry clears the restock flag on its pantry
    /// item, shows the entry as checked for the feedback delay, then drops it
    /// from the checked set; the next rebuild no longer contains it. If the
    /// pantry update fails the entry goes back to unchecked.
    pub async fn toggle_item(&mut self, item_id: &str) -> Result<ToggleOutcome, StoreError> {
        let item = self
            .items()
            .into_iter()
            .find(|i| i.id == item_id)
            .ok_or_else(|| StoreError::ItemNotFound(item_id.to_string()))?;

        if item.checked {
            self.state.checked_item_ids.remove(item_id);
            return Ok(ToggleOutcome::Unchecked);
        }

        self.state.checked_item_ids.insert(item_id.to_string());

        if !item.source.is_pantry_backed() {
            return Ok(ToggleOutcome::Checked);
        }

        let pantry_id = pantry_id_of(&item);
        if let Err(e) = self.pantry.clear_restock(&pantry_id) {
            warn!("Could not clear restock flag for '{}': {}", item.name, e);
            self.state.checked_item_ids.remove(item_id);
            return Err(e);
        }
        if !self.feedback_delay.is_zero() {
            tokio::time::sleep(self.feedback_delay).await;
        }
        self.state.checked_item_ids.remove(item_id);
        info!("Restocked '{}' ({})", item.name, item.source.label());
        Ok(ToggleOutcome::Restocked { pantry_id })
    }
}

/// Staple and pantry entries are keyed `<source>-<pantry id>`.
fn pantry_id_of(item: &ShoppingItem) -> String {
    let prefix = format!("{}-", item.source.label());
    item.id.strip_prefix(&prefix).unwrap_or(&item.id).to_string()
}
