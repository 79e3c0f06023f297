use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::categories::{KeywordTable, OverrideMap};
use crate::error::{PlannerError, Result};
use crate::grocery_aggregator::{build_grocery_list, CheckedOff, GroceryList};

use super::meal_plan::MealPlan;
use super::recipe_store::RecipeStore;

/// Everything the planner persists between runs.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct PlannerState {
    #[serde(default)]
    pub recipes: RecipeStore,
    #[serde(default)]
    pub meal_plan: MealPlan,
    #[serde(default)]
    pub extras: Vec<String>,
    #[serde(default)]
    pub checked_off: CheckedOff,
    #[serde(default)]
    pub category_overrides: OverrideMap,
}

/// Counts shown on the overview screen.
#[derive(Debug, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanSummary {
    pub saved_recipes: usize,
    pub meals_planned: usize,
    /// Ingredients of planned meals that resolve to a recipe, repeats included.
    pub ingredients: usize,
}

impl PlannerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_extra(&mut self, item: &str) -> Result<()> {
        let item = item.trim();
        if item.is_empty() {
            return Err(PlannerError::BlankName("Extra item"));
        }
        self.extras.push(item.to_string());
        Ok(())
    }

    pub fn remove_extra(&mut self, index: usize) -> Result<String> {
        if index >= self.extras.len() {
            return Err(PlannerError::IndexOutOfRange {
                index,
                len: self.extras.len(),
            });
        }
        Ok(self.extras.remove(index))
    }

    /// Stores an override for the exact ingredient text. The ingredient does
    /// not need to appear in any recipe.
    pub fn set_override(&mut self, ingredient: &str, category: &str, table: &KeywordTable) -> Result<()> {
        let category = category.trim();
        // The key itself is stored untouched so lookups stay exact.
        if ingredient.trim().is_empty() {
            return Err(PlannerError::BlankName("Ingredient"));
        }
        if category.is_empty() {
            return Err(PlannerError::BlankName("Category"));
        }
        if !table.contains_category(category) {
            warn!(ingredient, category, "override targets a category not in the keyword table");
        }
        debug!(ingredient, category, "setting category override");
        self.category_overrides
            .insert(ingredient.to_string(), category.to_string());
        Ok(())
    }

    pub fn remove_override(&mut self, ingredient: &str) -> Option<String> {
        self.category_overrides.shift_remove(ingredient)
    }

    pub fn toggle_checked(&mut self, item: &str) -> bool {
        self.checked_off.toggle(item)
    }

    pub fn clear_checked(&mut self) {
        self.checked_off.clear();
    }

    pub fn grocery_list(&self, table: &KeywordTable) -> GroceryList {
        build_grocery_list(
            &self.recipes,
            &self.meal_plan,
            &self.extras,
            &self.category_overrides,
            &self.checked_off,
            table,
        )
    }

    pub fn summary(&self) -> PlanSummary {
        let ingredients = self
            .meal_plan
            .planned_meals()
            .filter_map(|(_, _, meal)| self.recipes.get(meal))
            .map(<[String]>::len)
            .sum();

        PlanSummary {
            saved_recipes: self.recipes.len(),
            meals_planned: self.meal_plan.planned_count(),
            ingredients,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{Day, MealSlot};

    fn sample_state() -> PlannerState {
        let mut state = PlannerState::new();
        state
            .recipes
            .add("Tacos", vec!["ground beef".into(), "lettuce".into(), "cheddar".into()])
            .unwrap();
        state.meal_plan.set(Day::Monday, MealSlot::Dinner, "Tacos");
        state.meal_plan.set(Day::Tuesday, MealSlot::Dinner, "Tacos");
        state.meal_plan.set(Day::Wednesday, MealSlot::Lunch, "Leftovers");
        state
    }

    #[test]
    fn test_summary_counts() {
        let summary = sample_state().summary();
        assert_eq!(
            summary,
            PlanSummary {
                saved_recipes: 1,
                meals_planned: 3,
                ingredients: 6,
            }
        );
    }

    #[test]
    fn test_extras_crud() {
        let mut state = PlannerState::new();
        state.add_extra(" 1 tsp salt ").unwrap();
        state.add_extra("paper towels").unwrap();
        assert!(matches!(state.add_extra("  "), Err(PlannerError::BlankName(_))));
        assert_eq!(state.extras, vec!["1 tsp salt", "paper towels"]);

        assert_eq!(state.remove_extra(0).unwrap(), "1 tsp salt");
        assert!(matches!(
            state.remove_extra(5),
            Err(PlannerError::IndexOutOfRange { index: 5, len: 1 })
        ));
    }

    #[test]
    fn test_override_rejects_blank_ingredient_and_keeps_exact_key() {
        let table = KeywordTable::default();
        let mut state = PlannerState::new();
        assert!(matches!(
            state.set_override("   ", "Produce", &table),
            Err(PlannerError::BlankName("Ingredient"))
        ));
        assert!(state.category_overrides.is_empty());

        state.set_override(" lettuce", "Other", &table).unwrap();
        assert!(state.category_overrides.contains_key(" lettuce"));
        assert!(!state.category_overrides.contains_key("lettuce"));
    }

    #[test]
    fn test_override_for_unknown_ingredient_is_stored() {
        let table = KeywordTable::default();
        let mut state = sample_state();
        state.set_override("saffron", "Spices & Condiments", &table).unwrap();
        assert_eq!(
            state.category_overrides.get("saffron").map(String::as_str),
            Some("Spices & Condiments")
        );
        // No visible effect until the ingredient is used.
        let list = state.grocery_list(&table);
        assert_eq!(list.item_count(), 3);
    }

    #[test]
    fn test_override_and_remove_reflected_in_grocery_list() {
        let table = KeywordTable::default();
        let mut state = sample_state();
        state.set_override("lettuce", "Other", &table).unwrap();
        assert!(state.grocery_list(&table).category("Produce").is_none());

        assert_eq!(state.remove_override("lettuce"), Some("Other".to_string()));
        assert!(state.grocery_list(&table).category("Produce").is_some());
    }

    #[test]
    fn test_deleted_recipe_degrades_silently() {
        let table = KeywordTable::default();
        let mut state = sample_state();
        state.recipes.remove("Tacos").unwrap();

        assert_eq!(state.meal_plan.planned_count(), 3);
        assert!(state.grocery_list(&table).is_empty());
        assert_eq!(state.summary().ingredients, 0);
    }

    #[test]
    fn test_toggle_and_clear_checked() {
        let table = KeywordTable::default();
        let mut state = sample_state();
        assert!(state.toggle_checked("lettuce"));
        assert_eq!(state.grocery_list(&table).checked_count(), 1);

        state.clear_checked();
        assert_eq!(state.grocery_list(&table).checked_count(), 0);
    }
}
