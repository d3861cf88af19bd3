use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::categorizer::{category_rank, DEFAULT_CATEGORY_ORDER, UNCATEGORIZED};
use crate::models::{ShoppingItem, SupermarketLayout};

/// How the shopping list is projected for display.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    List,
    Category,
    Supermarket,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ItemGroup {
    /// `None` for the single group of [`ViewMode::List`].
    pub title: Option<String>,
    pub items: Vec<ShoppingItem>,
}

/// Picks the selected layout, else the one flagged default, else none.
pub fn resolve_layout<'a>(
    layouts: &'a [SupermarketLayout],
    selected_id: Option<&str>,
) -> Option<&'a SupermarketLayout> {
    selected_id
        .and_then(|id| layouts.iter().find(|l| l.id == id))
        .or_else(|| layouts.iter().find(|l| l.is_default))
}

/// Reorders items by a user-arranged list of ids. Listed ids come first in
/// the listed order; the rest follow in their original order.
pub fn apply_custom_order(items: Vec<ShoppingItem>, custom_order: &[String]) -> Vec<ShoppingItem> {
    if custom_order.is_empty() {
        return items;
    }
    let mut ranked: Vec<(usize, ShoppingItem)> = items
        .into_iter()
        .map(|item| {
            let rank = custom_order
                .iter()
                .position(|id| *id == item.id)
                .unwrap_or(custom_order.len());
            (rank, item)
        })
        .collect();
    // sort_by_key is stable, so unlisted items keep their relative order.
    ranked.sort_by_key(|(rank, _)| *rank);
    ranked.into_iter().map(|(_, item)| item).collect()
}

fn group_by_category<S: AsRef<str>>(items: Vec<ShoppingItem>, order: &[S]) -> Vec<ItemGroup> {
    let mut groups: Vec<(String, Vec<ShoppingItem>)> = Vec::new();
    for item in items {
        // Uncategorised items share the bucket of an explicit "Other" category.
        let key = item
            .category
            .clone()
            .unwrap_or_else(|| UNCATEGORIZED.to_string());
        match groups.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&key)) {
            Some((_, bucket)) => bucket.push(item),
            None => groups.push((key, vec![item])),
        }
    }

    groups.sort_by_key(|(key, _)| category_rank(Some(key.as_str()), order));

    groups
        .into_iter()
        .map(|(key, items)| ItemGroup {
            title: Some(key),
            items,
        })
        .collect()
}

/// Projects the built list into display groups.
///
/// Category groups are ordered by the layout's category order in
/// [`ViewMode::Supermarket`] (default order when no layout is given) and by
/// [`DEFAULT_CATEGORY_ORDER`] in [`ViewMode::Category`]. Categories outside
/// the order go last, in first-seen order.
pub fn sort_items(
    items: Vec<ShoppingItem>,
    mode: ViewMode,
    layout: Option<&SupermarketLayout>,
    custom_order: &[String],
) -> Vec<ItemGroup> {
    match mode {
        ViewMode::List => vec![ItemGroup {
            title: None,
            items: apply_custom_order(items, custom_order),
        }],
        ViewMode::Category => group_by_category(items, DEFAULT_CATEGORY_ORDER),
        ViewMode::Supermarket => match layout {
            Some(layout) => group_by_category(items, layout.category_order.as_slice()),
            None => group_by_category(items, DEFAULT_CATEGORY_ORDER),
        },
    }
}
