use std::fmt::Write as _;
use std::path::Path;
use std::str::FromStr;
use tokio::fs;
use tracing::info;

use crate::error::{PlannerError, Result};
use crate::grocery_aggregator::{GroceryList, IngredientStatus};

pub const EXTRAS_SECTION: &str = "Extras";
pub const EMPTY_LIST_MESSAGE: &str = "No ingredients found. Plan some meals or add extras first.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Text,
    Csv,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!("unknown export format '{}' (expected text or csv)", other)),
        }
    }
}

fn checkbox(item: &IngredientStatus) -> &'static str {
    if item.checked {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Plain-text shopping list grouped by category, with checkbox markers.
pub fn render_text_report(list: &GroceryList) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Grocery List");
    let _ = writeln!(out, "============");

    if list.is_empty() {
        let _ = writeln!(out, "\n{}", EMPTY_LIST_MESSAGE);
        return out;
    }

    let sections = list
        .categories
        .iter()
        .map(|(name, items)| (name.as_str(), items.as_slice()))
        .chain((!list.extras.is_empty()).then_some((EXTRAS_SECTION, list.extras.as_slice())));

    for (section, items) in sections {
        let _ = writeln!(out, "\n{}", section);
        let _ = writeln!(out, "{}", "-".repeat(section.chars().count()));
        for item in items {
            let _ = writeln!(out, "{} {}", checkbox(item), item.name);
        }
    }

    let _ = writeln!(
        out,
        "\n{} of {} items checked off",
        list.checked_count(),
        list.item_count()
    );
    out
}

/// One row per item: `category,item,checked`. Extras use the `Extras` category.
pub fn render_csv(list: &GroceryList) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["category", "item", "checked"])?;

    let rows = list
        .categories
        .iter()
        .flat_map(|(category, items)| items.iter().map(move |item| (category.as_str(), item)))
        .chain(list.extras.iter().map(|item| (EXTRAS_SECTION, item)));

    for (category, item) in rows {
        let checked = if item.checked { "true" } else { "false" };
        writer.write_record([category, item.name.as_str(), checked])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PlannerError::Csv(csv::Error::from(e.into_error())))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub async fn export_to_file(list: &GroceryList, path: &Path, format: ExportFormat) -> Result<()> {
    let content = match format {
        ExportFormat::Text => render_text_report(list),
        ExportFormat::Csv => render_csv(list)?,
    };
    fs::write(path, content)
        .await
        .map_err(|e| PlannerError::io(path, e))?;
    info!(path = %path.display(), ?format, items = list.item_count(), "grocery list exported");
    Ok(())
}
