//! UniFFI bindings for the mobile front-ends (iOS, Android).
//!
//! This module provides FFI-safe types and functions for use with UniFFI.
//! Enumerations cross the boundary as their persisted labels and ids as
//! hyphenated UUID strings.

use crate::model::{
    Category, Direction, Ingredient, LabelError, MainInformation, NumberedDirection, Recipe, Unit,
};
use crate::preferences::{AppColor, DisplayPreferences, PreferencesError, PreferencesFile};
use crate::store::{LoadSource, RecipeStore, StoreConfig, StoreError};
use camino::Utf8PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::warn;
use uuid::Uuid;

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum BoozyError {
    #[error("Library not loaded: {message}")]
    NotLoaded { message: String },

    #[error("Library already loaded: {message}")]
    AlreadyLoaded { message: String },

    #[error("Recipe not found: {message}")]
    NotFound { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },
}

impl From<StoreError> for BoozyError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Io(e) => BoozyError::IoError {
                message: e.to_string(),
            },
            StoreError::NotFound(id) => BoozyError::NotFound {
                message: id.to_string(),
            },
            e @ (StoreError::Deserialize { .. } | StoreError::Serialize(_) | StoreError::Seed(_)) => {
                BoozyError::ParseError {
                    message: e.to_string(),
                }
            }
        }
    }
}

impl From<PreferencesError> for BoozyError {
    fn from(e: PreferencesError) -> Self {
        match e {
            PreferencesError::Io(e) => BoozyError::IoError {
                message: e.to_string(),
            },
            e @ (PreferencesError::Deserialize { .. } | PreferencesError::Serialize(_)) => {
                BoozyError::ParseError {
                    message: e.to_string(),
                }
            }
        }
    }
}

impl From<LabelError> for BoozyError {
    fn from(e: LabelError) -> Self {
        BoozyError::InvalidInput {
            message: e.to_string(),
        }
    }
}

fn parse_id(id: &str) -> Result<Uuid, BoozyError> {
    Uuid::parse_str(id).map_err(|e| BoozyError::InvalidInput {
        message: format!("Invalid recipe id {id:?}: {e}"),
    })
}

/// FFI-safe representation of an ingredient.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiIngredient {
    pub name: String,
    pub quantity: String,
    /// Unit label, e.g. "Ounces" or "No units"
    pub unit: String,
    /// Formatted description; ignored when passed into the library
    pub description: String,
}

impl From<&Ingredient> for FfiIngredient {
    fn from(i: &Ingredient) -> Self {
        FfiIngredient {
            name: i.name.clone(),
            quantity: i.quantity.clone(),
            unit: i.unit.label().to_string(),
            description: i.description(),
        }
    }
}

impl TryFrom<FfiIngredient> for Ingredient {
    type Error = BoozyError;

    fn try_from(i: FfiIngredient) -> Result<Self, Self::Error> {
        Ok(Ingredient::new(i.name, i.quantity, i.unit.parse::<Unit>()?))
    }
}

/// FFI-safe representation of a direction.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiDirection {
    pub description: String,
    pub is_optional: bool,
}

impl From<&Direction> for FfiDirection {
    fn from(d: &Direction) -> Self {
        FfiDirection {
            description: d.description.clone(),
            is_optional: d.is_optional,
        }
    }
}

impl From<FfiDirection> for Direction {
    fn from(d: FfiDirection) -> Self {
        Direction::new(d.description, d.is_optional)
    }
}

/// A direction with its display number.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiNumberedDirection {
    /// One-indexed step number
    pub number: u32,
    pub text: String,
    pub is_optional: bool,
}

impl From<NumberedDirection> for FfiNumberedDirection {
    fn from(d: NumberedDirection) -> Self {
        FfiNumberedDirection {
            number: d.number as u32,
            text: d.text,
            is_optional: d.is_optional,
        }
    }
}

/// FFI-safe representation of a recipe's main information.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiMainInformation {
    pub name: String,
    pub description: String,
    /// Category label, e.g. "Gin"
    pub category: String,
}

/// FFI-safe representation of a recipe.
///
/// This is the main type for representing recipes across the FFI boundary.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiRecipe {
    pub id: String,
    pub main_information: FfiMainInformation,
    pub ingredients: Vec<FfiIngredient>,
    pub directions: Vec<FfiDirection>,
    pub is_favorite: bool,
    /// Whether the recipe may be added; ignored when passed into the library
    pub is_valid: bool,
}

impl From<&Recipe> for FfiRecipe {
    fn from(r: &Recipe) -> Self {
        FfiRecipe {
            id: r.id().to_string(),
            main_information: FfiMainInformation {
                name: r.main_information.name.clone(),
                description: r.main_information.description.clone(),
                category: r.category().label().to_string(),
            },
            ingredients: r.ingredients.iter().map(FfiIngredient::from).collect(),
            directions: r.directions.iter().map(FfiDirection::from).collect(),
            is_favorite: r.is_favorite,
            is_valid: r.is_valid(),
        }
    }
}

impl TryFrom<FfiRecipe> for Recipe {
    type Error = BoozyError;

    fn try_from(r: FfiRecipe) -> Result<Self, Self::Error> {
        let main_information = MainInformation::new(
            r.main_information.name,
            r.main_information.description,
            r.main_information.category.parse::<Category>()?,
        );
        let ingredients = r
            .ingredients
            .into_iter()
            .map(Ingredient::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let directions = r.directions.into_iter().map(Direction::from).collect();

        let mut recipe = Recipe::with_id(parse_id(&r.id)?, main_information, ingredients, directions);
        recipe.is_favorite = r.is_favorite;
        Ok(recipe)
    }
}

/// An RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, uniffi::Record)]
pub struct FfiColor {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub opacity: f64,
}

impl From<AppColor> for FfiColor {
    fn from(c: AppColor) -> Self {
        FfiColor {
            red: c.red,
            green: c.green,
            blue: c.blue,
            opacity: c.opacity,
        }
    }
}

impl From<FfiColor> for AppColor {
    fn from(c: FfiColor) -> Self {
        AppColor::new(c.red, c.green, c.blue, c.opacity)
    }
}

/// FFI-safe representation of the display preferences.
#[derive(Debug, Clone, Copy, PartialEq, uniffi::Record)]
pub struct FfiDisplayPreferences {
    pub hide_optional_steps: bool,
    pub list_background_color: FfiColor,
    pub list_text_color: FfiColor,
}

impl From<DisplayPreferences> for FfiDisplayPreferences {
    fn from(p: DisplayPreferences) -> Self {
        FfiDisplayPreferences {
            hide_optional_steps: p.hide_optional_steps,
            list_background_color: p.list_background_color.into(),
            list_text_color: p.list_text_color.into(),
        }
    }
}

impl From<FfiDisplayPreferences> for DisplayPreferences {
    fn from(p: FfiDisplayPreferences) -> Self {
        DisplayPreferences {
            hide_optional_steps: p.hide_optional_steps,
            list_background_color: p.list_background_color.into(),
            list_text_color: p.list_text_color.into(),
        }
    }
}

/// Where the recipes came from on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiLoadSource {
    Persisted,
    Seed,
}

impl From<LoadSource> for FfiLoadSource {
    fn from(s: LoadSource) -> Self {
        match s {
            LoadSource::Persisted => FfiLoadSource::Persisted,
            LoadSource::Seed => FfiLoadSource::Seed,
        }
    }
}

/// The app-wide recipe library.
///
/// The host creates one instance at startup and shares it. It starts out
/// unloaded; [`RecipeLibrary::load`] must be called exactly once before any
/// other method. All calls are serialized through a single lock, so loads and
/// saves never overlap. Mutating calls save the library before returning.
#[derive(uniffi::Object)]
pub struct RecipeLibrary {
    config: StoreConfig,
    store: Mutex<Option<RecipeStore>>,
}

#[uniffi::export]
impl RecipeLibrary {
    /// Creates an unloaded library keeping its file in `data_dir`.
    #[uniffi::constructor]
    pub fn new(data_dir: String) -> Arc<Self> {
        Arc::new(RecipeLibrary {
            config: StoreConfig::in_dir(Utf8PathBuf::from(data_dir)),
            store: Mutex::new(None),
        })
    }

    /// Loads the library from disk, or from the built-in catalog on first run.
    pub fn load(&self) -> Result<FfiLoadSource, BoozyError> {
        let mut guard = self.lock();
        if guard.is_some() {
            return Err(BoozyError::AlreadyLoaded {
                message: self.config.path.to_string(),
            });
        }

        let (store, source) = RecipeStore::load(self.config.clone())?;
        *guard = Some(store);
        Ok(source.into())
    }

    pub fn is_loaded(&self) -> bool {
        self.lock().is_some()
    }

    /// Returns the recipes of a category, given by its label.
    pub fn recipes_by_category(&self, category: String) -> Result<Vec<FfiRecipe>, BoozyError> {
        let category = category.parse::<Category>()?;
        self.with_store(|store| {
            Ok(store
                .recipes_by_category(category)
                .iter()
                .map(FfiRecipe::from)
                .collect())
        })
    }

    pub fn favorite_recipes(&self) -> Result<Vec<FfiRecipe>, BoozyError> {
        self.with_store(|store| Ok(store.favorite_recipes().iter().map(FfiRecipe::from).collect()))
    }

    pub fn recipe(&self, id: String) -> Result<FfiRecipe, BoozyError> {
        let id = parse_id(&id)?;
        self.with_store(|store| {
            store
                .get(id)
                .map(FfiRecipe::from)
                .ok_or_else(|| StoreError::NotFound(id).into())
        })
    }

    /// Appends a recipe and saves the library.
    ///
    /// Validity is not checked here; the caller gates on `is_valid`. If the
    /// save fails the recipe is not kept, so the call can be retried.
    pub fn add(&self, recipe: FfiRecipe) -> Result<FfiRecipe, BoozyError> {
        let recipe = Recipe::try_from(recipe)?;
        self.with_store(|store| {
            let added = FfiRecipe::from(&recipe);
            store.edit_and_save(|store| {
                store.add(recipe);
                Ok(())
            })?;
            Ok(added)
        })
    }

    /// Replaces the recipe with the same id and saves the library.
    pub fn update(&self, recipe: FfiRecipe) -> Result<(), BoozyError> {
        let recipe = Recipe::try_from(recipe)?;
        self.with_store(|store| Ok(store.edit_and_save(|store| store.update(recipe))?))
    }

    /// Flips a recipe's favorite flag, saves, and returns the new value.
    pub fn toggle_favorite(&self, id: String) -> Result<bool, BoozyError> {
        let id = parse_id(&id)?;
        self.with_store(|store| Ok(store.edit_and_save(|store| store.toggle_favorite(id))?))
    }

    pub fn save(&self) -> Result<(), BoozyError> {
        self.with_store(|store| Ok(store.save()?))
    }

    /// Returns the numbered steps of a recipe as shown on its detail screen.
    pub fn numbered_directions(
        &self,
        id: String,
        hide_optional: bool,
    ) -> Result<Vec<FfiNumberedDirection>, BoozyError> {
        let id = parse_id(&id)?;
        self.with_store(|store| {
            let recipe = store.get(id).ok_or(StoreError::NotFound(id))?;
            Ok(recipe
                .numbered_directions(hide_optional)
                .into_iter()
                .map(FfiNumberedDirection::from)
                .collect())
        })
    }
}

impl RecipeLibrary {
    fn lock(&self) -> MutexGuard<'_, Option<RecipeStore>> {
        self.store.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            warn!("Recipe library lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn with_store<R>(
        &self,
        f: impl FnOnce(&mut RecipeStore) -> Result<R, BoozyError>,
    ) -> Result<R, BoozyError> {
        let mut guard = self.lock();
        let store = guard.as_mut().ok_or_else(|| BoozyError::NotLoaded {
            message: "load() must be called first".to_string(),
        })?;
        f(store)
    }
}

// ============================================================================
// Exported FFI Functions
// ============================================================================

/// Returns all category labels in display order.
#[uniffi::export]
pub fn categories() -> Vec<String> {
    Category::ALL.iter().map(|c| c.label().to_string()).collect()
}

/// Returns all unit labels in picker order.
#[uniffi::export]
pub fn units() -> Vec<String> {
    Unit::ALL.iter().map(|u| u.label().to_string()).collect()
}

/// Creates an empty recipe with a fresh id in the given category.
#[uniffi::export]
pub fn new_recipe(category: String) -> Result<FfiRecipe, BoozyError> {
    let category = category.parse::<Category>()?;
    Ok(FfiRecipe::from(&Recipe::draft(category)))
}

/// Formats an ingredient the way it is shown in ingredient lists.
#[uniffi::export]
pub fn describe_ingredient(ingredient: FfiIngredient) -> Result<String, BoozyError> {
    Ok(Ingredient::try_from(ingredient)?.description())
}

/// Reads the display preferences stored in `data_dir`.
#[uniffi::export]
pub fn load_preferences(data_dir: String) -> Result<FfiDisplayPreferences, BoozyError> {
    let preferences = PreferencesFile::in_dir(Utf8PathBuf::from(data_dir)).load()?;
    Ok(preferences.into())
}

/// Writes the display preferences into `data_dir`.
#[uniffi::export]
pub fn save_preferences(
    data_dir: String,
    preferences: FfiDisplayPreferences,
) -> Result<(), BoozyError> {
    PreferencesFile::in_dir(Utf8PathBuf::from(data_dir)).save(&preferences.into())?;
    Ok(())
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
