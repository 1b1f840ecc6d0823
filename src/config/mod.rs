//! Application configuration: the traveler's display locale and currency,
//! persisted as pretty JSON under the app data directory.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs::home_dir;
use serde::{Deserialize, Serialize};

use crate::currency::{Currency, Locale};
use crate::errors::TripError;

const APP_DIR_NAME: &str = ".valija_core";
const CONFIG_FILE: &str = "config.json";
const OVERRIDES_FILE: &str = "overrides.json";
const HOME_ENV: &str = "VALIJA_CORE_HOME";

/// Returns the application data directory, defaulting to `~/.valija_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Canonical location of the persisted override document.
pub fn overrides_file() -> PathBuf {
    app_data_dir().join(OVERRIDES_FILE)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub locale: Locale,
    pub display_currency: Currency,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locale: Locale::Spanish,
            display_currency: Currency::Usd,
        }
    }
}

/// Loads and saves the config file, creating the data directory as needed.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, TripError> {
        Self::from_base(app_data_dir())
    }

    /// Anchors the manager somewhere other than the default data directory.
    pub fn with_base_dir(base: impl Into<PathBuf>) -> Result<Self, TripError> {
        Self::from_base(base.into())
    }

    fn from_base(base: PathBuf) -> Result<Self, TripError> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    /// Reads the stored configuration, or the defaults when none exists yet.
    pub fn load(&self) -> Result<AppConfig, TripError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(AppConfig::default())
        }
    }

    pub fn save(&self, config: &AppConfig) -> Result<(), TripError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
