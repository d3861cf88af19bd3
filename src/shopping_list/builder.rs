use std::collections::HashSet;

use crate::categorizer::suggest_category;
use crate::item_parser::{base_name, normalize_unit, parse_item_name, parse_quantity};
use crate::models::{ItemSource, Meal, PantryItem, SavedMealPlan, ShoppingItem};

/// Accumulates items keyed by base name; the first insert for a name wins.
struct ListAccumulator {
    seen: HashSet<String>,
    items: Vec<ShoppingItem>,
}

impl ListAccumulator {
    fn new() -> Self {
        Self {
            seen: HashSet::new(),
            items: Vec::new(),
        }
    }

    fn push(&mut self, key: String, item: ShoppingItem) {
        if self.seen.insert(key) {
            self.items.push(item);
        }
    }
}

fn pantry_entry(item: &PantryItem, source: ItemSource) -> ShoppingItem {
    let parsed = parse_item_name(&item.name);
    let id_prefix = source.label();
    ShoppingItem {
        id: format!("{}-{}", id_prefix, item.id),
        name: parsed.name,
        quantity: item.quantity.or(parsed.quantity),
        unit: item.unit.clone().or(parsed.unit),
        category: item
            .category
            .clone()
            .or_else(|| suggest_category(&item.name).map(str::to_string)),
        source,
        source_name: None,
        checked: false,
    }
}

/// Merges restock-flagged pantry items, selected plans' shopping lists and
/// selected recipes' ingredients into one list with unique base names.
///
/// Insertion order is staples, other restock items, plan ingredients, then
/// recipe ingredients; a later source never replaces an earlier one.
pub fn build_shopping_list(
    pantry: &[PantryItem],
    selected_plans: &[SavedMealPlan],
    selected_recipes: &[Meal],
) -> Vec<ShoppingItem> {
    let mut acc = ListAccumulator::new();

    for item in pantry.iter().filter(|i| i.is_staple && i.needs_restock) {
        acc.push(base_name(&item.name), pantry_entry(item, ItemSource::Staple));
    }

    for item in pantry.iter().filter(|i| !i.is_staple && i.needs_restock) {
        acc.push(base_name(&item.name), pantry_entry(item, ItemSource::Pantry));
    }

    // Items on hand that do not need restocking.
    let stocked: Vec<String> = pantry
        .iter()
        .filter(|i| !i.needs_restock)
        .map(|i| base_name(&i.name))
        .collect();

    for plan in selected_plans {
        for category in &plan.shopping_list {
            for ingredient in &category.items {
                let key = base_name(&ingredient.name);
                if stocked.contains(&key) {
                    continue;
                }
                let item = ShoppingItem {
                    id: format!("plan-{}-{}", plan.id, key),
                    name: ingredient.name.trim().to_string(),
                    quantity: parse_quantity(&ingredient.quantity),
                    unit: normalize_unit(&ingredient.unit),
                    category: suggest_category(&ingredient.name)
                        .map(str::to_string)
                        .or_else(|| {
                            Some(category.category_name.clone()).filter(|c| !c.trim().is_empty())
                        }),
                    source: ItemSource::Plan,
                    source_name: Some(plan.name.clone()),
                    checked: false,
                };
                acc.push(key, item);
            }
        }
    }

    for recipe in selected_recipes {
        for (index, text) in recipe.ingredients.iter().enumerate() {
            let lowered = text.to_lowercase();
            // Substring containment: a short pantry name such as "egg" also
            // covers "eggplant".
            let on_hand = stocked
                .iter()
                .any(|name| !name.is_empty() && lowered.contains(name.as_str()));
            if on_hand {
                continue;
            }
            let item = ShoppingItem {
                id: format!("recipe-{}-{}", recipe.id, index),
                name: text.trim().to_string(),
                quantity: None,
                unit: None,
                category: suggest_category(text).map(str::to_string),
                source: ItemSource::Recipe,
                source_name: Some(recipe.name.clone()),
                checked: false,
            };
            acc.push(base_name(text), item);
        }
    }

    acc.items
}
