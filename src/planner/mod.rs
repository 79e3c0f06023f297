pub mod meal_plan;
pub mod recipe_store;
pub mod state;

pub use meal_plan::{Day, MealPlan, MealSlot};
pub use recipe_store::{parse_ingredient_list, RecipeStore};
pub use state::{PlanSummary, PlannerState};
