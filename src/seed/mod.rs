//! Built-in recipe catalog.
//!
//! The catalog is a YAML document compiled into the library. It is only used
//! to populate a library that has never been saved.

use crate::model::{Category, Direction, Ingredient, MainInformation, Recipe};
use serde::Deserialize;
use thiserror::Error;

const CATALOG: &str = include_str!("catalog.yaml");

/// Errors that can occur when reading the built-in catalog.
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Failed to parse built-in catalog: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Deserialize)]
struct SeedRecipe {
    name: String,
    description: String,
    category: Category,
    ingredients: Vec<Ingredient>,
    directions: Vec<SeedDirection>,
}

#[derive(Debug, Deserialize)]
struct SeedDirection {
    description: String,
    #[serde(default)]
    optional: bool,
}

impl From<SeedRecipe> for Recipe {
    fn from(seed: SeedRecipe) -> Self {
        Recipe::new(
            MainInformation::new(seed.name, seed.description, seed.category),
            seed.ingredients,
            seed.directions
                .into_iter()
                .map(|d| Direction::new(d.description, d.optional))
                .collect(),
        )
    }
}

/// Returns the built-in recipes in catalog order.
///
/// Every call produces recipes with fresh ids, none of them favorited.
pub fn catalog() -> Result<Vec<Recipe>, SeedError> {
    let seeds: Vec<SeedRecipe> = serde_yaml::from_str(CATALOG)?;
    Ok(seeds.into_iter().map(Recipe::from).collect())
}
