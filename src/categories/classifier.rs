use indexmap::IndexMap;
use tracing::debug;

use super::keyword_table::{KeywordTable, OTHER_CATEGORY};

/// User-chosen categories keyed by the exact ingredient text as entered.
pub type OverrideMap = IndexMap<String, String>;

/// Maps an ingredient to its shopping category.
///
/// An override for the exact (case-sensitive) ingredient text always wins.
/// Otherwise the lowercased text is checked for keyword substrings category by
/// category in table order, falling back to [`OTHER_CATEGORY`].
pub fn classify(ingredient: &str, overrides: &OverrideMap, table: &KeywordTable) -> String {
    if let Some(category) = overrides.get(ingredient) {
        debug!(ingredient, category = %category, "classified by override");
        return category.clone();
    }

    match table.match_keyword(ingredient) {
        Some((category, keyword)) => {
            debug!(ingredient, category, keyword, "classified by keyword");
            category.to_string()
        }
        None => {
            debug!(ingredient, "no keyword matched");
            OTHER_CATEGORY.to_string()
        }
    }
}
