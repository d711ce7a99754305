//! Runtime configuration resolved from the environment.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Resolution never fails; invalid values fall back to defaults with a warning.

use crate::logging::default_log_level;
use crate::model::life::{LifeExpectancy, DEFAULT_LIFE_EXPECTANCY};
use log::warn;
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "LIFEWEEKS_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "LIFEWEEKS_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "LIFEWEEKS_LOG_DIR";
pub const ENV_LIFE_EXPECTANCY: &str = "LIFEWEEKS_LIFE_EXPECTANCY";

const DB_FILE_NAME: &str = "lifeweeks.sqlite3";
const LOG_DIR_NAME: &str = "lifeweeks-logs";

/// Process-level settings shared by the CLI and FFI entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
    pub default_life_expectancy: LifeExpectancy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: std::env::temp_dir().join(LOG_DIR_NAME),
            default_life_expectancy: LifeExpectancy::default(),
        }
    }
}

impl AppConfig {
    /// Reads `LIFEWEEKS_*` variables over the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = non_blank(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = non_blank(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        if let Some(dir) = non_blank(ENV_LOG_DIR) {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(raw) = non_blank(ENV_LIFE_EXPECTANCY) {
            match LifeExpectancy::parse(&raw) {
                Ok(value) => config.default_life_expectancy = value,
                Err(err) => warn!(
                    "event=config_load module=config status=fallback key={} default={} error={}",
                    ENV_LIFE_EXPECTANCY, DEFAULT_LIFE_EXPECTANCY, err
                ),
            }
        }
        config
    }
}
