use super::direction::{self, Direction, NumberedDirection};
use super::ingredient::Ingredient;
use super::LabelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Spirit category a recipe is filed under.
///
/// Categories are persisted by their label; renaming one breaks existing files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Vodka,
    Tequila,
    Rum,
    Whiskey,
    Gin,
    Champagne,
}

impl Category {
    /// All categories in the order they are presented.
    pub const ALL: [Category; 6] = [
        Category::Vodka,
        Category::Tequila,
        Category::Rum,
        Category::Whiskey,
        Category::Gin,
        Category::Champagne,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Vodka => "Vodka",
            Category::Tequila => "Tequila",
            Category::Rum => "Rum",
            Category::Whiskey => "Whiskey",
            Category::Gin => "Gin",
            Category::Champagne => "Champagne",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.label() == s)
            .ok_or_else(|| LabelError::UnknownCategory(s.to_string()))
    }
}

/// Name, description and category of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainInformation {
    pub name: String,
    pub description: String,
    pub category: Category,
}

impl MainInformation {
    pub fn new(name: impl Into<String>, description: impl Into<String>, category: Category) -> Self {
        MainInformation {
            name: name.into(),
            description: description.into(),
            category,
        }
    }

    /// Returns true if both name and description are filled in.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && !self.description.is_empty()
    }
}

/// A cocktail recipe.
///
/// The `id` is assigned when the recipe is created and never changes; it is
/// the only thing used to tell two recipes apart inside a store.
///
/// # Examples
///
/// ```
/// use boozy::{Category, Direction, Ingredient, MainInformation, Recipe, Unit};
///
/// let recipe = Recipe::new(
///     MainInformation::new("Gimlet", "Gin and lime.", Category::Gin),
///     vec![Ingredient::new("Gin", "2", Unit::Ounces)],
///     vec![Direction::new("Shake with ice and strain", false)],
/// );
/// assert!(recipe.is_valid());
/// assert!(!recipe.is_favorite);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    id: Uuid,
    pub main_information: MainInformation,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub directions: Vec<Direction>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl Default for Recipe {
    fn default() -> Self {
        Recipe::draft(Category::Vodka)
    }
}

impl Recipe {
    /// Creates a recipe with a freshly generated id.
    pub fn new(
        main_information: MainInformation,
        ingredients: Vec<Ingredient>,
        directions: Vec<Direction>,
    ) -> Self {
        Recipe::with_id(Uuid::new_v4(), main_information, ingredients, directions)
    }

    /// Creates an empty recipe in `category`, the starting point of the
    /// "add cocktail" flow. Drafts are not valid until filled in.
    pub fn draft(category: Category) -> Self {
        Recipe::new(MainInformation::new("", "", category), Vec::new(), Vec::new())
    }

    pub(crate) fn with_id(
        id: Uuid,
        main_information: MainInformation,
        ingredients: Vec<Ingredient>,
        directions: Vec<Direction>,
    ) -> Self {
        Recipe {
            id,
            main_information,
            ingredients,
            directions,
            is_favorite: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.main_information.name
    }

    pub fn category(&self) -> Category {
        self.main_information.category
    }

    /// Returns true if the main information is complete and the recipe has
    /// at least one ingredient and one direction.
    pub fn is_valid(&self) -> bool {
        self.main_information.is_valid()
            && !self.ingredients.is_empty()
            && !self.directions.is_empty()
    }

    /// See [`crate::model::index_of_direction`].
    pub fn index_of_direction(&self, step: &Direction, exclude_optional: bool) -> Option<usize> {
        direction::index_of_direction(&self.directions, step, exclude_optional)
    }

    /// See [`crate::model::display_position`].
    pub fn display_position(&self, index: usize, exclude_optional: bool) -> Option<usize> {
        direction::display_position(&self.directions, index, exclude_optional)
    }

    /// See [`crate::model::numbered_directions`].
    pub fn numbered_directions(&self, hide_optional: bool) -> Vec<NumberedDirection> {
        direction::numbered_directions(&self.directions, hide_optional)
    }
}
