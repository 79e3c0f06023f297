pub mod categories;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod grocery_aggregator;
pub mod logging;
pub mod persistence;
pub mod planner;

pub use categories::{classify, KeywordTable, OverrideMap, OTHER_CATEGORY};
pub use error::PlannerError;
pub use grocery_aggregator::{build_grocery_list, CheckedOff, GroceryList, IngredientStatus};
pub use planner::{Day, MealPlan, MealSlot, PlannerState, RecipeStore};
