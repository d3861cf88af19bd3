use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::ShoppingItem;
use crate::shopping_list::ViewMode;

/// User selections that shape the shopping list across sessions. Everything
/// the list builder does not derive from the source collections lives here.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ListState {
    pub selected_plan_ids: BTreeSet<String>,
    pub selected_recipe_ids: BTreeSet<String>,
    pub checked_item_ids: BTreeSet<String>,
    pub custom_item_order: Vec<String>,
    pub selected_layout_id: Option<String>,
    pub view_mode: ViewMode,
}

/// Flips membership of `id`; returns whether it is now present.
fn toggle(set: &mut BTreeSet<String>, id: &str) -> bool {
    if set.remove(id) {
        false
    } else {
        set.insert(id.to_string());
        true
    }
}

impl ListState {
    pub fn toggle_plan(&mut self, plan_id: &str) -> bool {
        toggle(&mut self.selected_plan_ids, plan_id)
    }

    pub fn toggle_recipe(&mut self, recipe_id: &str) -> bool {
        toggle(&mut self.selected_recipe_ids, recipe_id)
    }

    pub fn toggle_checked(&mut self, item_id: &str) -> bool {
        toggle(&mut self.checked_item_ids, item_id)
    }

    pub fn is_checked(&self, item_id: &str) -> bool {
        self.checked_item_ids.contains(item_id)
    }

    pub fn apply_checked(&self, items: &mut [ShoppingItem]) {
        for item in items.iter_mut() {
            item.checked = self.is_checked(&item.id);
        }
    }

    /// Drops checked ids and custom order entries that no longer refer to an
    /// item of the current list.
    pub fn prune(&mut self, items: &[ShoppingItem]) {
        let live: BTreeSet<&str> = items.iter().map(|i| i.id.as_str()).collect();
        self.checked_item_ids.retain(|id| live.contains(id.as_str()));
        self.custom_item_order.retain(|id| live.contains(id.as_str()));
    }
}
