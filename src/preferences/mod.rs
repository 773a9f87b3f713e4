//! Display preferences.
//!
//! These settings only change how recipes are rendered (hidden optional
//! steps, list colors). They never influence what the library returns.

use crate::atomic::write_atomic;
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use thiserror::Error;
use tracing::debug;

/// File name of the preferences document inside the app's data directory.
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Errors that can occur when reading or writing preferences.
#[derive(Error, Debug)]
pub enum PreferencesError {
    #[error("Failed to access preferences file: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse preferences file {path}: {source}")]
    Deserialize {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize preferences: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// An RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppColor {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub opacity: f64,
}

impl AppColor {
    /// Default list row background.
    pub const BACKGROUND: AppColor = AppColor {
        red: 1.0,
        green: 1.0,
        blue: 1.0,
        opacity: 1.0,
    };

    /// Default list text color.
    pub const FOREGROUND: AppColor = AppColor {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
        opacity: 1.0,
    };

    /// Creates a color, clamping every component into `0.0..=1.0`.
    pub fn new(red: f64, green: f64, blue: f64, opacity: f64) -> Self {
        AppColor {
            red: clamp_unit(red),
            green: clamp_unit(green),
            blue: clamp_unit(blue),
            opacity: clamp_unit(opacity),
        }
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// User-selected display options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayPreferences {
    pub hide_optional_steps: bool,
    pub list_background_color: AppColor,
    pub list_text_color: AppColor,
}

impl Default for DisplayPreferences {
    fn default() -> Self {
        DisplayPreferences {
            hide_optional_steps: false,
            list_background_color: AppColor::BACKGROUND,
            list_text_color: AppColor::FOREGROUND,
        }
    }
}

/// The JSON file holding [`DisplayPreferences`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferencesFile {
    path: Utf8PathBuf,
}

impl PreferencesFile {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        PreferencesFile { path: path.into() }
    }

    /// Uses [`PREFERENCES_FILE_NAME`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Utf8Path>) -> Self {
        PreferencesFile::new(dir.as_ref().join(PREFERENCES_FILE_NAME))
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Reads the preferences. A missing file yields the defaults, missing
    /// keys fall back to their default values.
    pub fn load(&self) -> Result<DisplayPreferences, PreferencesError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path, "No preferences file, using defaults");
                return Ok(DisplayPreferences::default());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content).map_err(|source| PreferencesError::Deserialize {
            path: self.path.clone(),
            source,
        })
    }

    pub fn save(&self, preferences: &DisplayPreferences) -> Result<(), PreferencesError> {
        let json = serde_json::to_vec_pretty(preferences).map_err(PreferencesError::Serialize)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }
}
