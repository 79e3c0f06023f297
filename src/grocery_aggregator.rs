use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

use crate::categories::{classify, KeywordTable, OverrideMap};
use crate::planner::{MealPlan, RecipeStore};

/// Items already bought. Membership is by exact text.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct CheckedOff {
    items: IndexSet<String>,
}

impl CheckedOff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `item` and returns whether it is now checked.
    /// Any string is accepted, whether or not it is on the current list.
    pub fn toggle(&mut self, item: &str) -> bool {
        if self.items.shift_remove(item) {
            false
        } else {
            self.items.insert(item.to_string());
            true
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_checked(&self, item: &str) -> bool {
        self.items.contains(item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for CheckedOff {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct IngredientStatus {
    pub name: String,
    pub checked: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct GroceryList {
    /// Category → ingredients in first-seen order. Categories iterate alphabetically.
    pub categories: BTreeMap<String, Vec<IngredientStatus>>,
    /// Extras exactly as stored, never deduplicated.
    pub extras: Vec<IngredientStatus>,
}

impl GroceryList {
    /// True when no planned meal contributed an ingredient and there are no extras.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.extras.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum::<usize>() + self.extras.len()
    }

    pub fn checked_count(&self) -> usize {
        self.categories
            .values()
            .flatten()
            .chain(self.extras.iter())
            .filter(|item| item.checked)
            .count()
    }

    pub fn category(&self, name: &str) -> Option<&[IngredientStatus]> {
        self.categories.get(name).map(Vec::as_slice)
    }
}

/// Builds the week's grocery list.
///
/// Cells are visited Monday→Sunday, Breakfast→Dinner. Meal names that are not
/// saved recipes contribute nothing. Each distinct ingredient text appears once
/// in its category, at the position it was first seen.
pub fn build_grocery_list(
    recipes: &RecipeStore,
    plan: &MealPlan,
    extras: &[String],
    overrides: &OverrideMap,
    checked_off: &CheckedOff,
    table: &KeywordTable,
) -> GroceryList {
    // BTreeMap keeps categories alphabetical; IndexSet keeps first-seen order inside each.
    let mut by_category: BTreeMap<String, IndexSet<String>> = BTreeMap::new();
    let mut seen: HashSet<&str> = HashSet::new();

    // Walk only the cells that hold a meal, in week order.
    for (day, slot, meal) in plan.planned_meals() {
        // Free-text meals and deleted recipes have no ingredient breakdown.
        let Some(ingredients) = recipes.get(meal) else {
            debug!(%day, %slot, meal, "meal is not a saved recipe; no ingredients added");
            continue;
        };

        for ingredient in ingredients {
            // Classification is deterministic, so one seen-set covers every category.
            if !seen.insert(ingredient.as_str()) {
                continue;
            }
            let category = classify(ingredient, overrides, table);
            by_category
                .entry(category)
                .or_default()
                .insert(ingredient.clone());
        }
    }

    // Checked state is looked up fresh on every build, by exact text.
    let status = |name: &String| IngredientStatus {
        name: name.clone(),
        checked: checked_off.is_checked(name),
    };

    GroceryList {
        categories: by_category
            .into_iter()
            .map(|(category, items)| (category, items.iter().map(status).collect()))
            .collect(),
        // Extras are reported as stored: no dedup against themselves or recipe items.
        extras: extras.iter().map(status).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{Day, MealSlot};

    fn names(items: &[IngredientStatus]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    fn tacos_store() -> RecipeStore {
        RecipeStore::from_iter(vec![("Tacos", vec!["ground beef", "lettuce", "cheddar"])])
    }

    fn monday_tacos() -> MealPlan {
        let mut plan = MealPlan::new();
        plan.set(Day::Monday, MealSlot::Dinner, "Tacos");
        plan
    }

    #[test]
    fn test_tacos_scenario() {
        let list = build_grocery_list(
            &tacos_store(),
            &monday_tacos(),
            &[],
            &OverrideMap::new(),
            &CheckedOff::new(),
            &KeywordTable::default(),
        );

        assert_eq!(list.categories.len(), 3);
        assert_eq!(names(list.category("Meat & Protein").unwrap()), vec!["ground beef"]);
        assert_eq!(names(list.category("Produce").unwrap()), vec!["lettuce"]);
        assert_eq!(names(list.category("Dairy").unwrap()), vec!["cheddar"]);
        assert!(list.extras.is_empty());
        assert!(!list.is_empty());
    }

    #[test]
    fn test_override_moves_ingredient() {
        let mut overrides = OverrideMap::new();
        overrides.insert("lettuce".into(), "Other".into());

        let list = build_grocery_list(
            &tacos_store(),
            &monday_tacos(),
            &[],
            &overrides,
            &CheckedOff::new(),
            &KeywordTable::default(),
        );

        assert!(list.category("Produce").is_none());
        assert_eq!(names(list.category("Other").unwrap()), vec!["lettuce"]);
    }

    #[test]
    fn test_categories_sorted_alphabetically() {
        let list = build_grocery_list(
            &tacos_store(),
            &monday_tacos(),
            &[],
            &OverrideMap::new(),
            &CheckedOff::new(),
            &KeywordTable::default(),
        );
        let order: Vec<&str> = list.categories.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["Dairy", "Meat & Protein", "Produce"]);
    }

    #[test]
    fn test_first_seen_order_follows_week_traversal() {
        let recipes = RecipeStore::from_iter(vec![
            ("Salad", vec!["spinach", "kale"]),
            ("Slaw", vec!["cabbage", "spinach"]),
        ]);
        let mut plan = MealPlan::new();
        // Monday dinner is visited before Tuesday breakfast.
        plan.set(Day::Tuesday, MealSlot::Breakfast, "Salad");
        plan.set(Day::Monday, MealSlot::Dinner, "Slaw");

        let list = build_grocery_list(
            &recipes,
            &plan,
            &[],
            &OverrideMap::new(),
            &CheckedOff::new(),
            &KeywordTable::default(),
        );
        assert_eq!(
            names(list.category("Produce").unwrap()),
            vec!["cabbage", "spinach", "kale"]
        );
    }

    #[test]
    fn test_recipe_used_twice_contributes_once() {
        let mut plan = monday_tacos();
        plan.set(Day::Wednesday, MealSlot::Lunch, "Tacos");

        let list = build_grocery_list(
            &tacos_store(),
            &plan,
            &[],
            &OverrideMap::new(),
            &CheckedOff::new(),
            &KeywordTable::default(),
        );
        assert_eq!(list.item_count(), 3);
    }

    #[test]
    fn test_duplicates_within_recipe_collapse() {
        let recipes = RecipeStore::from_iter(vec![("Omelette", vec!["egg", "cheese", "egg"])]);
        let mut plan = MealPlan::new();
        plan.set(Day::Sunday, MealSlot::Breakfast, "Omelette");

        let list = build_grocery_list(
            &recipes,
            &plan,
            &[],
            &OverrideMap::new(),
            &CheckedOff::new(),
            &KeywordTable::default(),
        );
        assert_eq!(names(list.category("Meat & Protein").unwrap()), vec!["egg"]);
    }

    #[test]
    fn test_extras_kept_verbatim_with_checked_state() {
        let extras = vec!["1 tsp salt".to_string(), "lettuce".to_string(), "1 tsp salt".to_string()];
        let checked: CheckedOff = ["1 tsp salt"].into_iter().collect();

        let list = build_grocery_list(
            &tacos_store(),
            &monday_tacos(),
            &extras,
            &OverrideMap::new(),
            &checked,
            &KeywordTable::default(),
        );

        assert_eq!(names(&list.extras), vec!["1 tsp salt", "lettuce", "1 tsp salt"]);
        assert!(list.extras[0].checked);
        assert!(!list.extras[1].checked);
        assert!(list.extras[2].checked);
        // The extra "lettuce" does not remove the recipe's lettuce.
        assert_eq!(names(list.category("Produce").unwrap()), vec!["lettuce"]);
        assert_eq!(list.checked_count(), 2);
    }

    #[test]
    fn test_checked_flags_on_recipe_items() {
        let checked: CheckedOff = ["cheddar"].into_iter().collect();
        let list = build_grocery_list(
            &tacos_store(),
            &monday_tacos(),
            &[],
            &OverrideMap::new(),
            &checked,
            &KeywordTable::default(),
        );
        assert!(list.category("Dairy").unwrap()[0].checked);
        assert!(!list.category("Produce").unwrap()[0].checked);
    }

    #[test]
    fn test_unknown_recipe_contributes_nothing() {
        let mut plan = MealPlan::new();
        plan.set(Day::Thursday, MealSlot::Dinner, "Pasta Bake");

        let list = build_grocery_list(
            &tacos_store(),
            &plan,
            &[],
            &OverrideMap::new(),
            &CheckedOff::new(),
            &KeywordTable::default(),
        );
        assert!(list.is_empty());
        assert_eq!(list.item_count(), 0);
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut checked = CheckedOff::new();
        assert!(checked.toggle("milk"));
        assert!(checked.is_checked("milk"));
        assert!(!checked.toggle("milk"));
        assert!(checked.is_empty());
    }

    #[test]
    fn test_toggle_accepts_arbitrary_strings_and_clear_empties() {
        let mut checked = CheckedOff::new();
        checked.toggle("not on any list");
        checked.toggle("eggs");
        assert_eq!(checked.len(), 2);

        checked.clear();
        assert!(checked.is_empty());
        checked.clear();
        assert!(checked.is_empty());
    }
}
