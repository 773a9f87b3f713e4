use super::LabelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Quantities that read as "one of something" and keep the unit or name singular.
const SINGULAR_QUANTITIES: [&str; 4] = ["1", "1/2", "1/4", "3/4"];

/// Measuring unit of an ingredient.
///
/// Units are persisted by their plural label ("Ounces", "No units", ...).
/// The labels are part of the on-disk format and must not be renamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    Ounces,
    Grams,
    Cups,
    Tablespoons,
    Teaspoons,
    Dashes,
    Cubes,
    #[serde(rename = "No units")]
    NoUnits,
}

impl Unit {
    /// All units in picker order.
    pub const ALL: [Unit; 8] = [
        Unit::Ounces,
        Unit::Grams,
        Unit::Cups,
        Unit::Tablespoons,
        Unit::Teaspoons,
        Unit::Dashes,
        Unit::Cubes,
        Unit::NoUnits,
    ];

    /// Returns the persisted (plural) label.
    pub fn label(self) -> &'static str {
        match self {
            Unit::Ounces => "Ounces",
            Unit::Grams => "Grams",
            Unit::Cups => "Cups",
            Unit::Tablespoons => "Tablespoons",
            Unit::Teaspoons => "Teaspoons",
            Unit::Dashes => "Dashes",
            Unit::Cubes => "Cubes",
            Unit::NoUnits => "No units",
        }
    }

    /// Returns the label used after a singular quantity: the plural label
    /// without its last letter ("Ounce", "Dashe").
    pub fn singular_name(self) -> &'static str {
        let label = self.label();
        &label[..label.len() - 1]
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Unit {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::ALL
            .into_iter()
            .find(|unit| unit.label() == s)
            .ok_or_else(|| LabelError::UnknownUnit(s.to_string()))
    }
}

/// A single line of a recipe's ingredient list.
///
/// `quantity` is free text ("1", "1 1/2", "6-8") and may be empty when the
/// ingredient is added to taste.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub quantity: String,
    pub unit: Unit,
}

impl Default for Ingredient {
    fn default() -> Self {
        Ingredient::new("", "", Unit::NoUnits)
    }
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>, unit: Unit) -> Self {
        Ingredient {
            name: name.into(),
            quantity: quantity.into(),
            unit,
        }
    }

    /// Returns true if the quantity is one of the literal singular amounts.
    ///
    /// This is a plain string comparison: "1.0", " 1" or "6-8" are plural.
    pub fn is_singular(&self) -> bool {
        SINGULAR_QUANTITIES.contains(&self.quantity.as_str())
    }

    /// Formats the ingredient for display.
    ///
    /// - Without a unit the name gets a naive `s` suffix unless the quantity
    ///   is singular: "1 Cherry", "2 Cherrys".
    /// - With a unit, any singular quantity is rendered as "1" followed by
    ///   the unit's singular name ("1 Ounce Simple Syrup" for "1/2"),
    ///   anything else keeps its quantity and the plural label
    ///   ("2 Ounces Rye Whiskey").
    /// - An empty quantity drops the leading quantity segment.
    pub fn description(&self) -> String {
        let singular = self.is_singular();
        let rest = match self.unit {
            Unit::NoUnits if singular => self.name.clone(),
            Unit::NoUnits => format!("{}s", self.name),
            unit if singular => return format!("1 {} {}", unit.singular_name(), self.name),
            unit => format!("{} {}", unit.label(), self.name),
        };

        if self.quantity.is_empty() {
            rest
        } else {
            format!("{} {}", self.quantity, rest)
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}
