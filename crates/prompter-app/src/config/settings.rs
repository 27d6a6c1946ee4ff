//! Settings loading

use std::path::{Path, PathBuf};

use prompter_core::prelude::*;
use prompter_core::SAMPLE_TEXT;

use super::types::Settings;

/// Directory name under the platform config dir
pub const CONFIG_DIR: &str = "prompter";
pub const CONFIG_FILENAME: &str = "config.toml";

/// `<config dir>/prompter/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILENAME))
}

/// Load settings from `path`, or from [`default_config_path`] when `None`.
///
/// A missing file is normal and gives defaults. An unreadable or invalid file
/// also gives defaults, with a warning.
pub fn load_settings(path: Option<&Path>) -> Settings {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) => path,
            None => {
                debug!("No platform config directory, using default settings");
                return Settings::default();
            }
        },
    };

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Text to show at startup: the configured file, or the built-in sample
pub fn load_initial_text(settings: &Settings) -> String {
    let Some(path) = settings.display.initial_text_path.as_deref() else {
        return SAMPLE_TEXT.to_string();
    };

    match read_text_file(path) {
        Ok(text) => text,
        Err(e) => {
            warn!("{}; showing sample text", e);
            SAMPLE_TEXT.to_string()
        }
    }
}

/// Read a UTF-8 text file for display
pub fn read_text_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read {}: {}", path.display(), e)))
}
