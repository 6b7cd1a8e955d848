use std::env;
use std::path::PathBuf;

use crate::currency::DEFAULT_SYMBOL;

/// Environment variable pointing at a currency table file to use instead of
/// the embedded one.
pub const CURRENCIES_ENV: &str = "MARGO_CURRENCIES";

/// Markup percentage the form opens with.
pub const DEFAULT_MARKUP_PERCENT: f64 = 50.0;

/// Application configuration resolved at startup. The GUI applies user
/// settings on top of this after launch.
#[derive(Debug, Clone)]
pub struct Config {
    /// Currency table file to load instead of the embedded table.
    pub currencies_path: Option<PathBuf>,
    /// Currency symbol selected before the user picks one.
    pub default_symbol: String,
    /// Markup percentage the form opens with.
    pub default_markup: f64,
}

impl Config {
    pub fn new() -> Self {
        Self {
            currencies_path: None,
            default_symbol: DEFAULT_SYMBOL.to_string(),
            default_markup: DEFAULT_MARKUP_PERCENT,
        }
    }

    /// Build a config from the process environment.
    pub fn from_env() -> Self {
        let mut config = Self::new();
        if let Ok(path) = env::var(CURRENCIES_ENV) {
            if !path.trim().is_empty() {
                config.currencies_path = Some(PathBuf::from(path.trim()));
            }
        }
        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
