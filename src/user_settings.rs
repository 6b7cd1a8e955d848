use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::config::DEFAULT_MARKUP_PERCENT;
use crate::currency::DEFAULT_SYMBOL;

const SETTINGS_FILE: &str = "margo_settings.json";

fn default_symbol() -> String {
    DEFAULT_SYMBOL.to_string()
}

fn default_markup() -> f64 {
    DEFAULT_MARKUP_PERCENT
}

fn default_currencies_file() -> Option<String> {
    None // None means use the embedded table
}

/// User settings that persist between sessions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSettings {
    /// Currency symbol preselected when the form opens
    #[serde(default = "default_symbol")]
    pub default_symbol: String,
    /// Markup percentage preset when the form opens
    #[serde(default = "default_markup")]
    pub default_markup: f64,
    /// Path to a user-supplied currency table, replacing the embedded one
    #[serde(default = "default_currencies_file")]
    pub currencies_file: Option<String>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            default_symbol: default_symbol(),
            default_markup: default_markup(),
            currencies_file: default_currencies_file(),
        }
    }
}

impl UserSettings {
    /// Get the settings file path
    fn settings_path() -> PathBuf {
        // Try to use the app data directory, fall back to current directory
        if let Some(config_dir) = dirs::config_dir() {
            let app_dir = config_dir.join("margo");
            if !app_dir.exists() {
                let _ = fs::create_dir_all(&app_dir);
            }
            app_dir.join(SETTINGS_FILE)
        } else {
            PathBuf::from(SETTINGS_FILE)
        }
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let path = Self::settings_path();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(settings) => {
                        tracing::info!("Loaded settings from {:?}", path);
                        return settings;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse settings file: {}", e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read settings file: {}", e);
                }
            }
        }
        tracing::info!("Using default settings");
        Self::default()
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::settings_path();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        tracing::info!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Get the settings file path for display
    pub fn settings_path_display() -> String {
        Self::settings_path().display().to_string()
    }

    /// Set or clear the currency table override (empty string clears it)
    pub fn set_currencies_file(&mut self, path: String) {
        if path.trim().is_empty() {
            self.currencies_file = None;
        } else {
            self.currencies_file = Some(path.trim().to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== UserSettings::default tests ====================

    #[test]
    fn test_user_settings_default_values() {
        let settings = UserSettings::default();
        assert_eq!(settings.default_symbol, "$");
        assert_eq!(settings.default_markup, 50.0);
        assert!(settings.currencies_file.is_none());
    }

    // ==================== serde tests ====================

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let settings: UserSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, UserSettings::default());
    }

    #[test]
    fn test_settings_round_trip() {
        let mut settings = UserSettings::default();
        settings.default_symbol = "€".to_string();
        settings.default_markup = 35.0;
        settings.currencies_file = Some("/tmp/currencies.csv".to_string());

        let json = serde_json::to_string(&settings).unwrap();
        let parsed: UserSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, settings);
    }

    // ==================== set_currencies_file tests ====================

    #[test]
    fn test_set_currencies_file_trims() {
        let mut settings = UserSettings::default();
        settings.set_currencies_file("  /data/table.csv  ".to_string());
        assert_eq!(settings.currencies_file.as_deref(), Some("/data/table.csv"));
    }

    #[test]
    fn test_set_currencies_file_empty_clears() {
        let mut settings = UserSettings::default();
        settings.currencies_file = Some("/data/table.csv".to_string());
        settings.set_currencies_file("   ".to_string());
        assert!(settings.currencies_file.is_none());
    }
}
