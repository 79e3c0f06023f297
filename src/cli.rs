use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::export::ExportFormat;
use crate::planner::{Day, MealSlot};

#[derive(Parser, Debug)]
#[command(author, version, about = "Weekly meal planner and grocery list", long_about = None)]
pub struct Cli {
    /// Path to the JSON data file (defaults to $MEAL_PLANNER_DATA or ./data.json)
    #[arg(short, long, global = true)]
    pub data_file: Option<PathBuf>,

    /// JSON keyword table to use instead of the built-in categories
    #[arg(short, long, global = true)]
    pub keywords_file: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage saved recipes
    #[command(subcommand)]
    Recipe(RecipeCommand),
    /// View or edit the weekly meal plan
    #[command(subcommand)]
    Plan(PlanCommand),
    /// Manage items bought outside of recipes
    #[command(subcommand)]
    Extras(ExtrasCommand),
    /// Pin ingredients to a category
    #[command(subcommand)]
    Override(OverrideCommand),
    /// Show which category an ingredient lands in
    Classify {
        ingredient: String,
        /// Also show which rule decided the category
        #[arg(long)]
        explain: bool,
    },
    /// Show the categorized grocery list for the week
    Grocery,
    /// Check items off the grocery list
    #[command(subcommand)]
    Check(CheckCommand),
    /// Write the grocery list to a file
    Export(ExportArgs),
    /// Show counts of recipes, planned meals and ingredients
    Summary,
}

#[derive(Subcommand, Debug)]
pub enum RecipeCommand {
    /// Add a recipe from a comma separated ingredient list
    Add { name: String, ingredients: String },
    Remove { name: String },
    Rename { from: String, to: String },
    Show { name: String },
    List,
    /// Case-insensitive search on recipe names
    Search { filter: String },
    AddIngredient { recipe: String, ingredient: String },
    /// Remove an ingredient by its 1-based position
    RemoveIngredient { recipe: String, position: usize },
}

#[derive(Subcommand, Debug)]
pub enum PlanCommand {
    Show,
    /// Assign a recipe or free-text meal to a slot
    Set {
        day: Day,
        slot: MealSlot,
        meal: String,
    },
    Clear { day: Day, slot: MealSlot },
    /// Clear the whole week
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum ExtrasCommand {
    Add { item: String },
    /// Remove an extra by its 1-based position
    Remove { position: usize },
    List,
}

#[derive(Subcommand, Debug)]
pub enum OverrideCommand {
    Set { ingredient: String, category: String },
    Remove { ingredient: String },
    List,
}

#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Check an item off, or un-check it if already checked
    Toggle { item: String },
    /// Un-check everything
    Clear,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file
    #[arg(short, long)]
    pub output: PathBuf,

    /// text or csv
    #[arg(short, long, default_value = "text")]
    pub format: ExportFormat,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
