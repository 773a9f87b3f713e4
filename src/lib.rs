//! Cocktail recipe library for the Boozy mobile app.
//!
//! The crate owns the recipe collection (model, formatting, persistence and
//! the built-in catalog) and exposes it to Swift and Kotlin through UniFFI.

mod atomic;
pub mod ffi;
pub mod model;
pub mod preferences;
pub mod seed;
pub mod store;

pub use model::*;
pub use preferences::{AppColor, DisplayPreferences, PreferencesError, PreferencesFile};
pub use seed::catalog;
pub use store::{LoadSource, RecipeStore, StoreConfig, StoreError};

uniffi::setup_scaffolding!();
