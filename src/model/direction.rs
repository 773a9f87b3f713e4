use serde::{Deserialize, Serialize};

/// Prefix shown in front of optional steps.
const OPTIONAL_PREFIX: &str = "(Optional)";

/// A single preparation step.
///
/// Optional steps are garnish or finishing steps that the reader may choose
/// to hide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Direction {
    pub description: String,
    #[serde(default)]
    pub is_optional: bool,
}

impl Direction {
    pub fn new(description: impl Into<String>, is_optional: bool) -> Self {
        Direction {
            description: description.into(),
            is_optional,
        }
    }
}

/// A direction prepared for display, with its step number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedDirection {
    /// One-indexed step number
    pub number: usize,
    /// Description, prefixed with "(Optional)" for optional steps
    pub text: String,
    pub is_optional: bool,
}

/// Returns the zero-indexed position of `direction` among `directions`.
///
/// When `exclude_optional` is set, optional steps are filtered out before
/// counting. Directions are matched by their description, so the first of
/// several steps with identical text wins.
pub fn index_of_direction(
    directions: &[Direction],
    direction: &Direction,
    exclude_optional: bool,
) -> Option<usize> {
    directions
        .iter()
        .filter(|d| !(exclude_optional && d.is_optional))
        .position(|d| d.description == direction.description)
}

/// Returns the zero-indexed display position of the step stored at `index`.
///
/// Unlike [`index_of_direction`] this works on the storage slot, so repeated
/// descriptions get distinct positions. Returns `None` if `index` is out of
/// range or points at an optional step that is being excluded.
pub fn display_position(
    directions: &[Direction],
    index: usize,
    exclude_optional: bool,
) -> Option<usize> {
    let target = directions.get(index)?;
    if exclude_optional && target.is_optional {
        return None;
    }

    Some(
        directions[..index]
            .iter()
            .filter(|d| !(exclude_optional && d.is_optional))
            .count(),
    )
}

/// Builds the numbered step list shown on a recipe's detail screen.
///
/// Hidden optional steps are skipped. Numbers come from
/// [`index_of_direction`], so duplicated step texts share a number.
pub fn numbered_directions(directions: &[Direction], hide_optional: bool) -> Vec<NumberedDirection> {
    directions
        .iter()
        .filter(|d| !(hide_optional && d.is_optional))
        .map(|direction| {
            let index = index_of_direction(directions, direction, hide_optional).unwrap_or(0);
            let text = if direction.is_optional {
                format!("{OPTIONAL_PREFIX}{}", direction.description)
            } else {
                direction.description.clone()
            };

            NumberedDirection {
                number: index + 1,
                text,
                is_optional: direction.is_optional,
            }
        })
        .collect()
}
