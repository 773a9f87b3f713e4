//! The recipe library.
//!
//! [`RecipeStore`] owns every recipe of the app. It is created once by
//! [`RecipeStore::load`], queried and edited through the methods below, and
//! written back with [`RecipeStore::save`] after each add, edit or favorite
//! toggle.

use crate::atomic::write_atomic;
use crate::model::{Category, Recipe};
use crate::seed::{self, SeedError};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

mod config;
pub use config::{StoreConfig, RECIPES_FILE_NAME};

/// Errors that can occur when loading, saving or editing the library.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access recipe file: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse recipe file {path}: {source}")]
    Deserialize {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize recipes: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to load built-in recipes: {0}")]
    Seed(#[from] SeedError),

    /// The caller asked for a recipe the store does not hold. This means the
    /// caller's view of the library is out of sync and should be treated as
    /// a bug.
    #[error("Recipe not found: {0}")]
    NotFound(Uuid),
}

/// Where the recipes of a freshly loaded store came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Read from the recipe file
    Persisted,
    /// No recipe file existed, the built-in catalog was used
    Seed,
}

/// The in-memory recipe collection and its backing file.
///
/// A store only exists in the loaded state: it is obtained from
/// [`RecipeStore::load`] (or [`RecipeStore::from_recipes`]), never built
/// empty. Recipes keep their insertion order.
#[derive(Debug)]
pub struct RecipeStore {
    config: StoreConfig,
    recipes: Vec<Recipe>,
}

impl RecipeStore {
    /// Loads the library from the configured file.
    ///
    /// If the file does not exist the store is filled from the built-in
    /// catalog. A file that exists but cannot be read or parsed is reported as
    /// an error and never replaced by the catalog.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if:
    /// - The file exists but cannot be read
    /// - The file contents are not a valid recipe list
    pub fn load(config: StoreConfig) -> Result<(Self, LoadSource), StoreError> {
        let (recipes, source) = match read_recipes(&config.path)? {
            Some(recipes) => (recipes, LoadSource::Persisted),
            None => {
                info!(path = %config.path, "No recipe file found, using built-in catalog");
                (seed::catalog()?, LoadSource::Seed)
            }
        };
        debug!(count = recipes.len(), ?source, "Loaded recipes");

        Ok((RecipeStore { config, recipes }, source))
    }

    /// Creates a store holding `recipes` without touching the disk.
    pub fn from_recipes(config: StoreConfig, recipes: Vec<Recipe>) -> Self {
        RecipeStore { config, recipes }
    }

    /// Returns all recipes in store order.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Returns the recipes filed under `category`, in store order.
    pub fn recipes_by_category(&self, category: Category) -> Vec<Recipe> {
        self.recipes
            .iter()
            .filter(|r| r.category() == category)
            .cloned()
            .collect()
    }

    /// Returns the favorited recipes, in store order.
    pub fn favorite_recipes(&self) -> Vec<Recipe> {
        self.recipes
            .iter()
            .filter(|r| r.is_favorite)
            .cloned()
            .collect()
    }

    /// Returns the position of the recipe with the given id.
    pub fn index_of(&self, id: Uuid) -> Option<usize> {
        self.recipes.iter().position(|r| r.id() == id)
    }

    pub fn get(&self, id: Uuid) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id() == id)
    }

    /// Returns a handle for editing a single recipe in place.
    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut Recipe> {
        self.recipes.iter_mut().find(|r| r.id() == id)
    }

    /// Appends `recipe` to the library.
    ///
    /// Neither validity nor id uniqueness is checked; ids are unique because
    /// they are generated, and validity is up to the caller.
    pub fn add(&mut self, recipe: Recipe) {
        debug!(id = %recipe.id(), name = recipe.name(), "Adding recipe");
        self.recipes.push(recipe);
    }

    /// Replaces the stored recipe that has the same id as `recipe`.
    pub fn update(&mut self, recipe: Recipe) -> Result<(), StoreError> {
        let slot = self
            .get_mut(recipe.id())
            .ok_or(StoreError::NotFound(recipe.id()))?;
        *slot = recipe;
        Ok(())
    }

    /// Flips the favorite flag of a recipe and returns the new value.
    pub fn toggle_favorite(&mut self, id: Uuid) -> Result<bool, StoreError> {
        let recipe = self.get_mut(id).ok_or(StoreError::NotFound(id))?;
        recipe.is_favorite = !recipe.is_favorite;
        Ok(recipe.is_favorite)
    }

    /// Applies `edit` and saves the library as one step.
    ///
    /// If either the edit or the save fails, the recipes are put back as they
    /// were before the call, so memory never runs ahead of the file.
    ///
    /// # Errors
    ///
    /// Returns the error of `edit` or of [`RecipeStore::save`].
    pub fn edit_and_save<R>(
        &mut self,
        edit: impl FnOnce(&mut Self) -> Result<R, StoreError>,
    ) -> Result<R, StoreError> {
        let snapshot = self.recipes.clone();
        let result = edit(self).and_then(|value| self.save().map(|()| value));
        if let Err(e) = &result {
            warn!(error = %e, "Edit not saved, restoring previous recipes");
            self.recipes = snapshot;
        }
        result
    }

    /// Writes the whole library to the configured file, replacing it
    /// atomically.
    pub fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(&self.recipes).map_err(StoreError::Serialize)?;
        write_atomic(&self.config.path, &json)?;
        debug!(path = %self.config.path, count = self.recipes.len(), "Saved recipes");
        Ok(())
    }
}

/// Reads the recipe file, returning `None` if it does not exist.
fn read_recipes(path: &Utf8Path) -> Result<Option<Vec<Recipe>>, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::Io(e)),
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| StoreError::Deserialize {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Direction, Ingredient, MainInformation, Unit};
    use indoc::indoc;
    use tempfile::TempDir;

    fn temp_config(temp_dir: &TempDir) -> StoreConfig {
        let dir = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).unwrap();
        StoreConfig::in_dir(dir)
    }

    fn create_test_recipe(name: &str, category: Category) -> Recipe {
        Recipe::new(
            MainInformation::new(name, format!("A test {name}."), category),
            vec![Ingredient::new("Spirit", "2", Unit::Ounces)],
            vec![
                Direction::new("Shake with ice", false),
                Direction::new("Garnish", true),
            ],
        )
    }

    fn sample_store(config: StoreConfig) -> RecipeStore {
        RecipeStore::from_recipes(
            config,
            vec![
                create_test_recipe("Screwdriver", Category::Vodka),
                create_test_recipe("Gimlet", Category::Gin),
                create_test_recipe("Mule", Category::Vodka),
                create_test_recipe("Mojito", Category::Rum),
            ],
        )
    }

    #[test]
    fn test_load_without_file_uses_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let (store, source) = RecipeStore::load(temp_config(&temp_dir)).unwrap();

        assert_eq!(source, LoadSource::Seed);
        assert_eq!(store.len(), 68);
        assert!(store.favorite_recipes().is_empty());

        let gin = store.recipes_by_category(Category::Gin);
        assert!(gin.iter().any(|r| r.name() == "Martini"));
        assert!(gin.iter().any(|r| r.name() == "Negroni"));
        assert!(gin.iter().all(|r| r.category() == Category::Gin));
    }

    #[test]
    fn test_load_does_not_write_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_config(&temp_dir);
        RecipeStore::load(config.clone()).unwrap();
        assert!(!config.path.exists());
    }

    #[test]
    fn test_recipes_by_category_keeps_order() {
        let temp_dir = TempDir::new().unwrap();
        let store = sample_store(temp_config(&temp_dir));

        let vodka: Vec<String> = store
            .recipes_by_category(Category::Vodka)
            .iter()
            .map(|r| r.name().to_string())
            .collect();
        assert_eq!(vodka, vec!["Screwdriver", "Mule"]);
        assert!(store.recipes_by_category(Category::Champagne).is_empty());
    }

    #[test]
    fn test_toggle_favorite() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = sample_store(temp_config(&temp_dir));
        let gimlet = store.recipes()[1].id();

        assert!(store.toggle_favorite(gimlet).unwrap());
        let favorites = store.favorite_recipes();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id(), gimlet);

        assert!(!store.toggle_favorite(gimlet).unwrap());
        assert!(store.favorite_recipes().is_empty());
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = sample_store(temp_config(&temp_dir));
        let stranger = create_test_recipe("Stranger", Category::Rum);

        assert_eq!(store.index_of(stranger.id()), None);
        assert!(matches!(
            store.toggle_favorite(stranger.id()),
            Err(StoreError::NotFound(id)) if id == stranger.id()
        ));
        assert!(matches!(store.update(stranger), Err(StoreError::NotFound(_))));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_update_and_get_mut_edit_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = sample_store(temp_config(&temp_dir));
        let mule = store.recipes()[2].id();

        let mut edited = store.get(mule).unwrap().clone();
        edited.main_information.name = "Moscow Mule".to_string();
        edited.ingredients.push(Ingredient::new("Ginger Beer", "4", Unit::Ounces));
        store.update(edited.clone()).unwrap();

        assert_eq!(store.index_of(mule), Some(2));
        assert_eq!(store.get(mule), Some(&edited));

        store
            .get_mut(mule)
            .unwrap()
            .directions
            .push(Direction::new("Serve in a copper mug", false));
        assert_eq!(store.get(mule).unwrap().directions.len(), 3);
    }

    #[test]
    fn test_add_then_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_config(&temp_dir);
        let (mut store, _) = RecipeStore::load(config.clone()).unwrap();

        let cape_codder = create_test_recipe("Cape Codder", Category::Vodka);
        store.add(cape_codder.clone());
        let vodka = store.recipes_by_category(Category::Vodka);
        assert_eq!(vodka.iter().filter(|r| r.id() == cape_codder.id()).count(), 1);
        store.save().unwrap();

        let (reloaded, source) = RecipeStore::load(config).unwrap();
        assert_eq!(source, LoadSource::Persisted);
        assert_eq!(reloaded.recipes(), store.recipes());
        assert_eq!(reloaded.get(cape_codder.id()), Some(&cape_codder));
    }

    #[test]
    fn test_save_round_trip_keeps_favorites_and_order() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_config(&temp_dir);
        let mut store = sample_store(config.clone());
        let mojito = store.recipes()[3].id();
        store.toggle_favorite(mojito).unwrap();
        store.save().unwrap();

        let (reloaded, _) = RecipeStore::load(config).unwrap();
        assert_eq!(reloaded.recipes(), store.recipes());
        assert_eq!(reloaded.favorite_recipes()[0].id(), mojito);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_config(&temp_dir);
        fs::write(&config.path, "[{\"id\": ").unwrap();

        let result = RecipeStore::load(config.clone());
        assert!(matches!(result, Err(StoreError::Deserialize { path, .. }) if path == config.path));
        assert_eq!(fs::read_to_string(&config.path).unwrap(), "[{\"id\": ");
    }

    #[test]
    fn test_load_reads_existing_document() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_config(&temp_dir);
        fs::write(
            &config.path,
            indoc! {r#"
                [
                  {
                    "id": "6F1C2B3A-4D5E-4F60-8A7B-9C0D1E2F3A4B",
                    "mainInformation": {"name": "Bellini", "description": "Peach and bubbles.", "category": "Champagne"},
                    "ingredients": [{"name": "Prosecco", "quantity": "4", "unit": "Ounces"}],
                    "directions": [{"description": "Top the puree with prosecco", "isOptional": false}],
                    "isFavorite": true
                  }
                ]"#},
        )
        .unwrap();

        let (store, source) = RecipeStore::load(config).unwrap();
        assert_eq!(source, LoadSource::Persisted);
        assert_eq!(store.len(), 1);
        assert_eq!(store.favorite_recipes()[0].name(), "Bellini");
        assert_eq!(store.recipes_by_category(Category::Champagne).len(), 1);
    }

    #[test]
    fn test_failed_save_keeps_memory_state() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "file").unwrap();
        let dir = Utf8PathBuf::from_path_buf(blocker).unwrap();

        let store = sample_store(StoreConfig::in_dir(dir));
        let before = store.recipes().to_vec();
        assert!(matches!(store.save(), Err(StoreError::Io(_))));
        assert_eq!(store.recipes(), before.as_slice());
    }

    #[test]
    fn test_edit_and_save_rolls_back_when_save_fails() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "file").unwrap();
        let dir = Utf8PathBuf::from_path_buf(blocker).unwrap();

        let mut store = sample_store(StoreConfig::in_dir(dir));
        let before = store.recipes().to_vec();
        let gimlet = before[1].id();
        let sidecar = create_test_recipe("Sidecar", Category::Whiskey);

        let result = store.edit_and_save(|store| {
            store.add(sidecar.clone());
            Ok(())
        });
        assert!(matches!(result, Err(StoreError::Io(_))));
        assert_eq!(store.index_of(sidecar.id()), None);

        let result = store.edit_and_save(|store| store.toggle_favorite(gimlet));
        assert!(matches!(result, Err(StoreError::Io(_))));
        assert!(store.favorite_recipes().is_empty());
        assert_eq!(store.recipes(), before.as_slice());
    }

    #[test]
    fn test_edit_and_save_rolls_back_failed_edit() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_config(&temp_dir);
        let mut store = sample_store(config.clone());
        let before = store.recipes().to_vec();
        let stranger = create_test_recipe("Stranger", Category::Rum);

        let result = store.edit_and_save(|store| {
            store.add(create_test_recipe("Paloma", Category::Tequila));
            store.update(stranger)
        });
        assert!(matches!(result, Err(StoreError::NotFound(_))));
        assert_eq!(store.recipes(), before.as_slice());
        assert!(!config.path.exists());
    }

    #[test]
    fn test_edit_and_save_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_config(&temp_dir);
        let mut store = sample_store(config.clone());
        let mojito = store.recipes()[3].id();

        assert!(store.edit_and_save(|store| store.toggle_favorite(mojito)).unwrap());

        let (reloaded, _) = RecipeStore::load(config).unwrap();
        assert_eq!(reloaded.favorite_recipes()[0].id(), mojito);
    }
}
