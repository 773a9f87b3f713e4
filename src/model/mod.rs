mod direction;
mod ingredient;
mod recipe;

pub use direction::{
    display_position, index_of_direction, numbered_directions, Direction, NumberedDirection,
};
pub use ingredient::{Ingredient, Unit};
pub use recipe::{Category, MainInformation, Recipe};

use thiserror::Error;

/// Errors raised when parsing the persisted text label of an enumeration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown unit: {0}")]
    UnknownUnit(String),
}
