use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{PlannerError, Result};

/// Saved recipes: name → ordered ingredient list, in insertion order.
#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct RecipeStore {
    recipes: IndexMap<String, Vec<String>>,
}

/// Splits a comma separated ingredient line, trimming each entry and dropping blanks.
pub fn parse_ingredient_list(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn validated_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PlannerError::BlankName("Recipe name"));
    }
    Ok(name.to_string())
}

impl RecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, ingredients: Vec<String>) -> Result<()> {
        let name = validated_name(name)?;
        if self.recipes.contains_key(&name) {
            return Err(PlannerError::RecipeExists(name));
        }
        self.recipes.insert(name, ingredients);
        Ok(())
    }

    /// Inserts or replaces a recipe. Returns the previous ingredient list, if any.
    pub fn upsert(&mut self, name: &str, ingredients: Vec<String>) -> Result<Option<Vec<String>>> {
        let name = validated_name(name)?;
        Ok(self.recipes.insert(name, ingredients))
    }

    /// Renames a recipe in place, keeping its position. Meal plan cells that
    /// used the old name are left alone.
    pub fn rename(&mut self, from: &str, to: &str) -> Result<()> {
        let to = validated_name(to)?;
        if from == to {
            return if self.recipes.contains_key(from) {
                Ok(())
            } else {
                Err(PlannerError::RecipeNotFound(from.to_string()))
            };
        }
        if self.recipes.contains_key(&to) {
            return Err(PlannerError::RecipeExists(to));
        }
        let index = self
            .recipes
            .get_index_of(from)
            .ok_or_else(|| PlannerError::RecipeNotFound(from.to_string()))?;

        let (_, ingredients) = self
            .recipes
            .shift_remove_index(index)
            .ok_or_else(|| PlannerError::RecipeNotFound(from.to_string()))?;
        self.recipes.shift_insert(index, to, ingredients);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Result<Vec<String>> {
        self.recipes
            .shift_remove(name)
            .ok_or_else(|| PlannerError::RecipeNotFound(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.recipes.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.recipes.contains_key(name)
    }

    pub fn add_ingredient(&mut self, recipe: &str, ingredient: &str) -> Result<()> {
        let ingredient = ingredient.trim();
        if ingredient.is_empty() {
            return Err(PlannerError::BlankName("Ingredient"));
        }
        self.ingredients_mut(recipe)?.push(ingredient.to_string());
        Ok(())
    }

    pub fn remove_ingredient(&mut self, recipe: &str, index: usize) -> Result<String> {
        let ingredients = self.ingredients_mut(recipe)?;
        if index >= ingredients.len() {
            return Err(PlannerError::IndexOutOfRange {
                index,
                len: ingredients.len(),
            });
        }
        Ok(ingredients.remove(index))
    }

    pub fn replace_ingredients(&mut self, recipe: &str, ingredients: Vec<String>) -> Result<()> {
        *self.ingredients_mut(recipe)? = ingredients;
        Ok(())
    }

    fn ingredients_mut(&mut self, recipe: &str) -> Result<&mut Vec<String>> {
        self.recipes
            .get_mut(recipe)
            .ok_or_else(|| PlannerError::RecipeNotFound(recipe.to_string()))
    }

    pub fn names_sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.recipes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Case-insensitive substring search over recipe names, sorted.
    pub fn search(&self, filter: &str) -> Vec<&str> {
        let filter = filter.to_lowercase();
        self.names_sorted()
            .into_iter()
            .filter(|name| name.to_lowercase().contains(&filter))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.recipes
            .iter()
            .map(|(name, ingredients)| (name.as_str(), ingredients.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, Vec<&'a str>)> for RecipeStore {
    fn from_iter<T: IntoIterator<Item = (&'a str, Vec<&'a str>)>>(iter: T) -> Self {
        Self {
            recipes: iter
                .into_iter()
                .map(|(name, ingredients)| {
                    (
                        name.to_string(),
                        ingredients.into_iter().map(str::to_string).collect(),
                    )
                })
                .collect(),
        }
    }
}

// Older data files sometimes wrapped a recipe's ingredient list in an extra
// list layer. Both shapes are accepted and flattened to a single list.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredIngredient {
    Single(String),
    Nested(Vec<String>),
}

impl<'de> Deserialize<'de> for RecipeStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw: IndexMap<String, Vec<StoredIngredient>> = IndexMap::deserialize(deserializer)?;
        let recipes = raw
            .into_iter()
            .map(|(name, stored)| {
                let ingredients = stored
                    .into_iter()
                    .flat_map(|item| match item {
                        StoredIngredient::Single(s) => vec![s],
                        StoredIngredient::Nested(list) => list,
                    })
                    .collect();
                (name, ingredients)
            })
            .collect();
        Ok(Self { recipes })
    }
}
