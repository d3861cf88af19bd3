use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::item_parser::base_name;
use crate::models::{Meal, PantryItem, SavedMealPlan, ShoppingItem, SupermarketLayout};
use crate::shopping_list::{
    build_shopping_list, resolve_layout, sort_items, ItemGroup, ShoppingSession, ViewMode,
};
use crate::store::ListState;

/// Pantry collaborator of the shopping list: supplies items and accepts
/// restock-flag updates.
pub trait PantryStore {
    fn pantry_items(&self) -> &[PantryItem];
    fn clear_restock(&mut self, pantry_id: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Pantry {
    pub items: Vec<PantryItem>,
}

impl PantryStore for Pantry {
    fn pantry_items(&self) -> &[PantryItem] {
        &self.items
    }

    fn clear_restock(&mut self, pantry_id: &str) -> Result<(), StoreError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == pantry_id)
            .ok_or_else(|| StoreError::PantryItemNotFound(pantry_id.to_string()))?;
        item.needs_restock = false;
        debug!("Cleared restock flag on pantry item '{}'", item.name);
        Ok(())
    }
}

/// Counts reported by [`HouseholdData::merge_pantry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeSummary {
    pub added: usize,
    pub updated: usize,
}

/// Everything one household persists: the three source collections, the
/// supermarket layouts and the list selections.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct HouseholdData {
    pub pantry: Pantry,
    pub saved_plans: Vec<SavedMealPlan>,
    pub favorites: Vec<Meal>,
    pub layouts: Vec<SupermarketLayout>,
    pub state: ListState,
}

impl HouseholdData {
    /// Selected plans in document order.
    pub fn selected_plans(&self) -> Vec<SavedMealPlan> {
        self.saved_plans
            .iter()
            .filter(|p| self.state.selected_plan_ids.contains(&p.id))
            .cloned()
            .collect()
    }

    /// Selected favourite recipes in document order.
    pub fn selected_recipes(&self) -> Vec<Meal> {
        self.favorites
            .iter()
            .filter(|m| self.state.selected_recipe_ids.contains(&m.id))
            .cloned()
            .collect()
    }

    pub fn shopping_list(&self) -> Vec<ShoppingItem> {
        let mut items = build_shopping_list(
            self.pantry.pantry_items(),
            &self.selected_plans(),
            &self.selected_recipes(),
        );
        self.state.apply_checked(&mut items);
        items
    }

    /// Builds the list and projects it. `mode` and `layout_id` fall back to
    /// the persisted selections when not given.
    pub fn grouped_list(&self, mode: Option<ViewMode>, layout_id: Option<&str>) -> Vec<ItemGroup> {
        let mode = mode.unwrap_or(self.state.view_mode);
        let layout_id = layout_id.or(self.state.selected_layout_id.as_deref());
        let layout = resolve_layout(&self.layouts, layout_id);
        sort_items(self.shopping_list(), mode, layout, &self.state.custom_item_order)
    }

    pub fn session(&mut self, feedback_delay: Duration) -> ShoppingSession<'_, Pantry> {
        let plans = self.selected_plans();
        let recipes = self.selected_recipes();
        ShoppingSession::new(&mut self.pantry, &mut self.state, plans, recipes, feedback_delay)
    }

    pub fn toggle_plan(&mut self, plan_id: &str) -> Result<bool, StoreError> {
        if !self.saved_plans.iter().any(|p| p.id == plan_id) {
            return Err(StoreError::PlanNotFound(plan_id.to_string()));
        }
        let selected = self.state.toggle_plan(plan_id);
        let items = self.shopping_list();
        self.state.prune(&items);
        Ok(selected)
    }

    pub fn toggle_recipe(&mut self, recipe_id: &str) -> Result<bool, StoreError> {
        if !self.favorites.iter().any(|m| m.id == recipe_id) {
            return Err(StoreError::RecipeNotFound(recipe_id.to_string()));
        }
        let selected = self.state.toggle_recipe(recipe_id);
        let items = self.shopping_list();
        self.state.prune(&items);
        Ok(selected)
    }

    /// Stores a drag-and-drop order. Every id must be on the current list.
    pub fn set_custom_order(&mut self, item_ids: Vec<String>) -> Result<(), StoreError> {
        let items = self.shopping_list();
        if let Some(unknown) = item_ids.iter().find(|id| !items.iter().any(|i| &i.id == *id)) {
            return Err(StoreError::ItemNotFound(unknown.clone()));
        }
        self.state.custom_item_order = item_ids;
        Ok(())
    }

    pub fn select_layout(&mut self, layout_id: Option<&str>) -> Result<(), StoreError> {
        if let Some(id) = layout_id {
            self.layout(id)?;
        }
        self.state.selected_layout_id = layout_id.map(str::to_string);
        Ok(())
    }

    pub fn layout(&self, layout_id: &str) -> Result<&SupermarketLayout, StoreError> {
        self.layouts
            .iter()
            .find(|l| l.id == layout_id)
            .ok_or_else(|| StoreError::LayoutNotFound(layout_id.to_string()))
    }

    pub fn add_layout(
        &mut self,
        name: &str,
        category_order: Vec<String>,
        is_default: bool,
    ) -> &SupermarketLayout {
        let id = uuid::Uuid::new_v4().to_string();
        if is_default {
            self.layouts.iter_mut().for_each(|l| l.is_default = false);
        }
        info!("Adding supermarket layout '{}' ({} categories)", name, category_order.len());
        self.layouts.push(SupermarketLayout {
            id,
            name: name.trim().to_string(),
            category_order,
            is_default,
        });
        &self.layouts[self.layouts.len() - 1]
    }

    /// Marks one layout as the default; at most one layout carries the flag.
    pub fn set_default_layout(&mut self, layout_id: &str) -> Result<(), StoreError> {
        self.layout(layout_id)?;
        for layout in self.layouts.iter_mut() {
            layout.is_default = layout.id == layout_id;
        }
        Ok(())
    }

    pub fn remove_layout(&mut self, layout_id: &str) -> Result<SupermarketLayout, StoreError> {
        let index = self
            .layouts
            .iter()
            .position(|l| l.id == layout_id)
            .ok_or_else(|| StoreError::LayoutNotFound(layout_id.to_string()))?;
        if self.state.selected_layout_id.as_deref() == Some(layout_id) {
            self.state.selected_layout_id = None;
        }
        Ok(self.layouts.remove(index))
    }

    /// Merges imported pantry items by base name: known items get their
    /// quantity and flags replaced, new ones are appended.
    pub fn merge_pantry(&mut self, imported: Vec<PantryItem>) -> MergeSummary {
        let mut summary = MergeSummary::default();
        for incoming in imported {
            let key = base_name(&incoming.name);
            match self.pantry.items.iter_mut().find(|i| base_name(&i.name) == key) {
                Some(existing) => {
                    existing.quantity = incoming.quantity;
                    existing.unit = incoming.unit;
                    existing.is_staple = incoming.is_staple;
                    existing.needs_restock = incoming.needs_restock;
                    if incoming.category.is_some() {
                        existing.category = incoming.category;
                    }
                    summary.updated += 1;
                }
                None => {
                    self.pantry.items.push(incoming);
                    summary.added += 1;
                }
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, ShoppingCategory};

    fn household() -> HouseholdData {
        HouseholdData {
            pantry: Pantry {
                items: vec![
                    PantryItem {
                        id: "p1".to_string(),
                        name: "Milk".to_string(),
                        is_staple: true,
                        needs_restock: true,
                        ..Default::default()
                    },
                    PantryItem {
                        id: "p2".to_string(),
                        name: "Rice (2 kg)".to_string(),
                        ..Default::default()
                    },
                ],
            },
            saved_plans: vec![SavedMealPlan {
                id: "plan1".to_string(),
                name: "Week 1".to_string(),
                shopping_list: vec![ShoppingCategory {
                    category_name: "Produce".to_string(),
                    items: vec![Ingredient {
                        name: "Carrots".to_string(),
                        quantity: "4".to_string(),
                        unit: "pieces".to_string(),
                        checked: false,
                    }],
                }],
            }],
            favorites: vec![Meal {
                id: "m1".to_string(),
                name: "Risotto".to_string(),
                ingredients: vec!["300 g rice".to_string(), "1 onion".to_string()],
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_shopping_list_follows_selections() {
        let mut data = household();
        assert_eq!(data.shopping_list().len(), 1);

        assert!(data.toggle_plan("plan1").unwrap());
        assert!(data.toggle_recipe("m1").unwrap());
        let names: Vec<String> = data.shopping_list().into_iter().map(|i| i.name).collect();
        // "300 g rice" is covered by the stocked pantry rice.
        assert_eq!(names, vec!["Milk", "Carrots", "1 onion"]);
    }

    #[test]
    fn test_toggle_unknown_plan_is_an_error() {
        let mut data = household();
        assert!(matches!(data.toggle_plan("nope"), Err(StoreError::PlanNotFound(_))));
        assert!(matches!(data.toggle_recipe("nope"), Err(StoreError::RecipeNotFound(_))));
    }

    #[test]
    fn test_deselecting_plan_prunes_checked_items() {
        let mut data = household();
        data.toggle_plan("plan1").unwrap();
        data.state.toggle_checked("plan-plan1-carrots");
        data.toggle_plan("plan1").unwrap();
        assert!(data.state.checked_item_ids.is_empty());
    }

    #[test]
    fn test_checked_state_applied_to_list() {
        let mut data = household();
        data.state.toggle_checked("staple-p1");
        assert!(data.shopping_list()[0].checked);
    }

    #[test]
    fn test_custom_order_rejects_unknown_items() {
        let mut data = household();
        assert!(matches!(
            data.set_custom_order(vec!["nope".to_string()]),
            Err(StoreError::ItemNotFound(_))
        ));
        data.set_custom_order(vec!["staple-p1".to_string()]).unwrap();
        assert_eq!(data.state.custom_item_order, vec!["staple-p1".to_string()]);
    }

    #[test]
    fn test_single_default_layout() {
        let mut data = household();
        let first = data
            .add_layout("Corner shop", vec!["Dairy & Eggs".to_string()], true)
            .id
            .clone();
        let second = data.add_layout("Big store", vec!["Produce".to_string()], true).id.clone();
        assert_eq!(data.layouts.iter().filter(|l| l.is_default).count(), 1);
        assert!(data.layout(&second).unwrap().is_default);

        data.set_default_layout(&first).unwrap();
        assert!(data.layout(&first).unwrap().is_default);
        assert!(!data.layout(&second).unwrap().is_default);
    }

    #[test]
    fn test_remove_selected_layout_clears_selection() {
        let mut data = household();
        let id = data.add_layout("Corner shop", vec![], false).id.clone();
        data.select_layout(Some(&id)).unwrap();
        data.remove_layout(&id).unwrap();
        assert!(data.state.selected_layout_id.is_none());
        assert!(matches!(data.remove_layout(&id), Err(StoreError::LayoutNotFound(_))));
    }

    #[test]
    fn test_grouped_list_uses_default_layout() {
        let mut data = household();
        data.toggle_plan("plan1").unwrap();
        let order = vec!["Dairy & Eggs".to_string(), "Produce".to_string()];
        data.add_layout("Dairy first", order, true);
        let groups = data.grouped_list(Some(ViewMode::Supermarket), None);
        let titles: Vec<&str> = groups.iter().filter_map(|g| g.title.as_deref()).collect();
        assert_eq!(titles, vec!["Dairy & Eggs", "Produce"]);
    }

    #[test]
    fn test_merge_pantry_by_base_name() {
        let mut data = household();
        let summary = data.merge_pantry(vec![
            PantryItem {
                id: "new1".to_string(),
                name: "rice".to_string(),
                needs_restock: true,
                ..Default::default()
            },
            PantryItem {
                id: "new2".to_string(),
                name: "Honey".to_string(),
                ..Default::default()
            },
        ]);
        assert_eq!(summary, MergeSummary { added: 1, updated: 1 });
        assert!(data.pantry.items[1].needs_restock);
        assert_eq!(data.pantry.items.len(), 3);
    }

    #[test]
    fn test_clear_restock_unknown_item() {
        let mut pantry = household().pantry;
        assert!(matches!(pantry.clear_restock("missing"), Err(StoreError::PantryItemNotFound(_))));
        pantry.clear_restock("p1").unwrap();
        assert!(!pantry.items[0].needs_restock);
    }
}
