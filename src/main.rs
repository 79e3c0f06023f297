use anyhow::{Context, Result};
use meal_planner::categories::{classify, KeywordTable, OTHER_CATEGORY};
use meal_planner::cli::{
    parse_args, CheckCommand, Command, ExtrasCommand, OverrideCommand, PlanCommand, RecipeCommand,
};
use meal_planner::config::AppConfig;
use meal_planner::export::{export_to_file, render_text_report};
use meal_planner::logging::init_logging;
use meal_planner::persistence::{load_state, save_state};
use meal_planner::planner::{parse_ingredient_list, Day, PlannerState};

// 1-based positions on the command line, 0-based in the store.
fn to_index(position: usize) -> Result<usize> {
    position
        .checked_sub(1)
        .context("positions start at 1")
}

fn print_plan(state: &PlannerState) {
    println!("{:<10} {:<20} {:<20} {:<20}", "Day", "Breakfast", "Lunch", "Dinner");
    for day in Day::ALL {
        let cells: Vec<&str> = state
            .meal_plan
            .iter()
            .filter(|(d, _, _)| *d == day)
            .map(|(_, _, meal)| meal.unwrap_or("Not Set"))
            .collect();
        println!("{:<10} {:<20} {:<20} {:<20}", day, cells[0], cells[1], cells[2]);
    }
}

fn print_recipe(state: &PlannerState, name: &str) -> Result<()> {
    let ingredients = state
        .recipes
        .get(name)
        .with_context(|| format!("Recipe '{}' not found", name))?;
    println!("{}:", name);
    for (idx, ingredient) in ingredients.iter().enumerate() {
        println!("  {}. {}", idx + 1, ingredient);
    }
    Ok(())
}

/// Applies a command. Returns true when the state changed and must be saved.
async fn run_command(command: Command, state: &mut PlannerState, table: &KeywordTable) -> Result<bool> {
    let changed = match command {
        Command::Recipe(cmd) => match cmd {
            RecipeCommand::Add { name, ingredients } => {
                let ingredients = parse_ingredient_list(&ingredients);
                state.recipes.add(&name, ingredients)?;
                println!("'{}' added successfully!", name.trim());
                true
            }
            RecipeCommand::Remove { name } => {
                state.recipes.remove(&name)?;
                println!("'{}' removed.", name);
                true
            }
            RecipeCommand::Rename { from, to } => {
                state.recipes.rename(&from, &to)?;
                println!("'{}' renamed to '{}'.", from, to.trim());
                true
            }
            RecipeCommand::Show { name } => {
                print_recipe(state, &name)?;
                false
            }
            RecipeCommand::List => {
                if state.recipes.is_empty() {
                    println!("No recipes saved yet.");
                }
                for name in state.recipes.names_sorted() {
                    println!("{}", name);
                }
                false
            }
            RecipeCommand::Search { filter } => {
                for name in state.recipes.search(&filter) {
                    println!("{}", name);
                }
                false
            }
            RecipeCommand::AddIngredient { recipe, ingredient } => {
                state.recipes.add_ingredient(&recipe, &ingredient)?;
                print_recipe(state, &recipe)?;
                true
            }
            RecipeCommand::RemoveIngredient { recipe, position } => {
                let removed = state.recipes.remove_ingredient(&recipe, to_index(position)?)?;
                println!("Removed '{}' from '{}'.", removed, recipe);
                true
            }
        },
        Command::Plan(cmd) => match cmd {
            PlanCommand::Show => {
                print_plan(state);
                false
            }
            PlanCommand::Set { day, slot, meal } => {
                state.meal_plan.set(day, slot, &meal);
                if !state.recipes.contains(meal.trim()) {
                    println!("Note: '{}' is not a saved recipe; it adds no ingredients.", meal.trim());
                }
                print_plan(state);
                true
            }
            PlanCommand::Clear { day, slot } => {
                state.meal_plan.clear_cell(day, slot);
                print_plan(state);
                true
            }
            PlanCommand::Reset => {
                state.meal_plan.clear_all();
                println!("Weekly plan cleared.");
                true
            }
        },
        Command::Extras(cmd) => match cmd {
            ExtrasCommand::Add { item } => {
                state.add_extra(&item)?;
                true
            }
            ExtrasCommand::Remove { position } => {
                let removed = state.remove_extra(to_index(position)?)?;
                println!("Removed '{}'.", removed);
                true
            }
            ExtrasCommand::List => {
                for (idx, item) in state.extras.iter().enumerate() {
                    println!("{}. {}", idx + 1, item);
                }
                false
            }
        },
        Command::Override(cmd) => match cmd {
            OverrideCommand::Set { ingredient, category } => {
                state.set_override(&ingredient, &category, table)?;
                println!("'{}' will be listed under {}.", ingredient, category.trim());
                true
            }
            OverrideCommand::Remove { ingredient } => {
                if state.remove_override(&ingredient).is_none() {
                    println!("No override set for '{}'.", ingredient);
                    false
                } else {
                    true
                }
            }
            OverrideCommand::List => {
                for (ingredient, category) in &state.category_overrides {
                    println!("{} -> {}", ingredient, category);
                }
                false
            }
        },
        Command::Classify { ingredient, explain } => {
            let category = classify(&ingredient, &state.category_overrides, table);
            println!("{}", category);
            if explain {
                if state.category_overrides.contains_key(&ingredient) {
                    println!("  (user override)");
                } else if let Some((_, keyword)) = table.match_keyword(&ingredient) {
                    println!("  (matched keyword '{}')", keyword);
                } else {
                    println!("  (no keyword matched; defaulted to {})", OTHER_CATEGORY);
                }
            }
            false
        }
        Command::Grocery => {
            print!("{}", render_text_report(&state.grocery_list(table)));
            false
        }
        Command::Check(cmd) => {
            match cmd {
                CheckCommand::Toggle { item } => {
                    let checked = state.toggle_checked(&item);
                    println!("{} '{}'", if checked { "Checked" } else { "Unchecked" }, item);
                }
                CheckCommand::Clear => {
                    state.clear_checked();
                    println!("All items unchecked.");
                }
            }
            true
        }
        Command::Export(args) => {
            let list = state.grocery_list(table);
            export_to_file(&list, &args.output, args.format)
                .await
                .with_context(|| format!("Failed to export grocery list to '{}'", args.output.display()))?;
            println!("Grocery list exported to {}", args.output.display());
            false
        }
        Command::Summary => {
            let summary = state.summary();
            println!("Saved recipes: {}", summary.saved_recipes);
            println!("Meals planned: {}", summary.meals_planned);
            println!("Ingredients:   {}", summary.ingredients);
            false
        }
    };
    Ok(changed)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = parse_args();
    init_logging(cli.verbose);

    let config = AppConfig::resolve(cli.data_file, cli.keywords_file);
    let table = config
        .keyword_table()
        .context("Failed to load keyword table")?;

    let mut state = load_state(config.data_file()).await;

    if run_command(cli.command, &mut state, &table).await? {
        save_state(config.data_file(), &state)
            .await
            .with_context(|| format!("Failed to save data to '{}'", config.data_file().display()))?;
    }

    Ok(())
}
