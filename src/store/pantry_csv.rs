use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::path::Path;

use crate::item_parser::{normalize_unit, parse_item_name, parse_quantity};
use crate::models::PantryItem;

// Expected column headers. Only NAME_COL is required.
const NAME_COL: &str = "name";
const QUANTITY_COL: &str = "quantity";
const UNIT_COL: &str = "unit";
const STAPLE_COL: &str = "staple";
const RESTOCK_COL: &str = "needs_restock";
const CATEGORY_COL: &str = "category";

fn parse_flag(s: &str) -> bool {
    matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "y" | "x")
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

/// Reads pantry items from a CSV export. A quantity embedded in the name
/// (`"Flour (2 kg)"`) is used when the quantity column is absent or blank.
pub fn load_pantry_csv(csv_path: &Path) -> Result<Vec<PantryItem>> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open pantry CSV file at {:?}", csv_path))?;
    let mut rdr = ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(file);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));

    let name_idx =
        column(NAME_COL).ok_or_else(|| anyhow::anyhow!("Column '{}' not found", NAME_COL))?;
    let quantity_idx = column(QUANTITY_COL);
    let unit_idx = column(UNIT_COL);
    let staple_idx = column(STAPLE_COL);
    let restock_idx = column(RESTOCK_COL);
    let category_idx = column(CATEGORY_COL);

    let mut items = Vec::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record = result
            .with_context(|| format!("Failed to read record at row index {}", row_index))?;
        let field = |idx: Option<usize>| idx.and_then(|i| record.get(i)).and_then(non_empty);

        let Some(raw_name) = field(Some(name_idx)) else {
            continue;
        };
        let parsed = parse_item_name(raw_name);

        items.push(PantryItem {
            id: uuid::Uuid::new_v4().to_string(),
            name: parsed.name,
            quantity: field(quantity_idx).and_then(parse_quantity).or(parsed.quantity),
            unit: field(unit_idx).and_then(normalize_unit).or(parsed.unit),
            is_staple: field(staple_idx).is_some_and(parse_flag),
            needs_restock: field(restock_idx).is_some_and(parse_flag),
            category: field(category_idx).map(str::to_string),
        });
    }

    if items.is_empty() {
        return Err(anyhow::anyhow!("No pantry items found in {:?}", csv_path));
    }

    Ok(items)
}
