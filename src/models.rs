use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PantryItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default)]
    pub is_staple: bool,
    #[serde(default)]
    pub needs_restock: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// One line of a saved plan's shopping list.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: String,
    pub quantity: String,
    pub unit: String,
    #[serde(default)]
    pub checked: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingCategory {
    pub category_name: String,
    pub items: Vec<Ingredient>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedMealPlan {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub shopping_list: Vec<ShoppingCategory>,
}

/// A favourite recipe. Ingredients are free text ("2 cloves garlic, minced").
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SupermarketLayout {
    pub id: String,
    pub name: String,
    pub category_order: Vec<String>,
    #[serde(default)]
    pub is_default: bool,
}

/// Where a shopping list entry came from.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ItemSource {
    Plan,
    Staple,
    Recipe,
    Pantry,
}

impl ItemSource {
    /// Staple and pantry entries map back to a pantry item whose restock flag
    /// is cleared when the entry is checked off.
    pub fn is_pantry_backed(self) -> bool {
        match self {
            ItemSource::Staple | ItemSource::Pantry => true,
            ItemSource::Plan | ItemSource::Recipe => false,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ItemSource::Plan => "plan",
            ItemSource::Staple => "staple",
            ItemSource::Recipe => "recipe",
            ItemSource::Pantry => "pantry",
        }
    }
}

/// Derived entry of the shopping list. Never persisted; rebuilt from the
/// source collections on every change.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub source: ItemSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    pub checked: bool,
}
