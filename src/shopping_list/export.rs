use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::shopping_list::ItemGroup;

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    group: &'a str,
    name: &'a str,
    quantity: Option<f64>,
    unit: Option<&'a str>,
    source: &'static str,
    source_name: Option<&'a str>,
    checked: bool,
}

/// Writes the projected list to CSV, one row per item in display order.
/// Returns the number of rows written.
pub fn export_shopping_list_csv(groups: &[ItemGroup], csv_path: &Path) -> Result<usize> {
    let mut writer = csv::Writer::from_path(csv_path)
        .with_context(|| format!("Failed to create CSV file at {:?}", csv_path))?;

    let mut rows = 0;
    for group in groups {
        for item in &group.items {
            writer.serialize(ExportRow {
                group: group.title.as_deref().unwrap_or(""),
                name: &item.name,
                quantity: item.quantity,
                unit: item.unit.as_deref(),
                source: item.source.label(),
                source_name: item.source_name.as_deref(),
                checked: item.checked,
            })?;
            rows += 1;
        }
    }
    writer.flush().context("Failed to flush CSV writer")?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemSource, ShoppingItem};

    #[test]
    fn test_export_writes_header_and_rows() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("list.csv");
        let groups = vec![ItemGroup {
            title: Some("Produce".to_string()),
            items: vec![ShoppingItem {
                id: "plan-w1-leeks".to_string(),
                name: "Leeks".to_string(),
                quantity: Some(2.0),
                unit: None,
                category: Some("Produce".to_string()),
                source: ItemSource::Plan,
                source_name: Some("Week 1".to_string()),
                checked: false,
            }],
        }];

        assert_eq!(export_shopping_list_csv(&groups, &path)?, 1);

        let content = std::fs::read_to_string(&path)?;
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("group,name,quantity,unit,source,source_name,checked"));
        assert_eq!(lines.next(), Some("Produce,Leeks,2.0,,plan,Week 1,false"));
        Ok(())
    }
}
