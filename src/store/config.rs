use camino::{Utf8Path, Utf8PathBuf};

/// File name of the recipe library inside the app's data directory.
pub const RECIPES_FILE_NAME: &str = "recipes.json";

/// Where a [`RecipeStore`](super::RecipeStore) keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path of the serialized recipe file
    pub path: Utf8PathBuf,
}

impl StoreConfig {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        StoreConfig { path: path.into() }
    }

    /// Uses [`RECIPES_FILE_NAME`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Utf8Path>) -> Self {
        StoreConfig::new(dir.as_ref().join(RECIPES_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_dir() {
        let config = StoreConfig::in_dir("/data/boozy");
        assert_eq!(config.path, Utf8PathBuf::from("/data/boozy/recipes.json"));
    }
}
