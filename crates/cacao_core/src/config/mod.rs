use crate::catalog;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV_VAR: &str = "CACAODX_CONFIG_PATH";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: Option<Vec<String>>,
    #[serde(default)]
    pub palette: Option<Vec<String>>,
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Config {
    /// Configured chores, or the built-in catalog when none survive cleaning.
    pub fn catalog(&self) -> Vec<String> {
        resolve_entries(self.catalog.as_deref(), catalog::default_catalog)
    }

    pub fn palette(&self) -> Vec<String> {
        resolve_entries(self.palette.as_deref(), catalog::default_palette)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

fn resolve_entries(configured: Option<&[String]>, fallback: fn() -> Vec<String>) -> Vec<String> {
    let cleaned = configured
        .map(|entries| catalog::clean_entries(entries))
        .unwrap_or_default();
    if cleaned.is_empty() {
        fallback()
    } else {
        cleaned
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub catalog: Option<Vec<String>>,
    pub palette: Option<Vec<String>>,
    pub log_level: Option<String>,
}

/// Maps common spellings onto the filter names `env_logger` understands.
pub fn canonical_log_level(raw: &str) -> Option<String> {
    let cleaned = raw.trim().to_ascii_lowercase();
    match cleaned.as_str() {
        "" => None,
        "off" | "none" | "quiet" => Some("off".to_string()),
        "error" | "err" => Some("error".to_string()),
        "warn" | "warning" => Some("warn".to_string()),
        "info" => Some("info".to_string()),
        "debug" | "verbose" => Some("debug".to_string()),
        "trace" => Some("trace".to_string()),
        _ => None,
    }
}

pub fn config_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("cacaodx")
            .join(CONFIG_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("cacaodx")
            .join(CONFIG_FILE_NAME))
    }
}

/// Never fails: a broken or unreachable config yields defaults plus the error.
pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_config_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    let mut config: Config = serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_data(format!("invalid JSON in {}: {}", path.display(), err))
    })?;
    config.log_level = config.log_level.and_then(|level| canonical_log_level(&level));
    Ok(config)
}

pub fn merge_overrides(base: &Config, overrides: &ConfigOverrides) -> Config {
    let mut merged = base.clone();
    if let Some(catalog) = overrides.catalog.as_ref() {
        merged.catalog = Some(catalog.clone());
    }
    if let Some(palette) = overrides.palette.as_ref() {
        merged.palette = Some(palette.clone());
    }
    if let Some(level) = overrides.log_level.as_deref()
        && let Some(normalized) = canonical_log_level(level)
    {
        merged.log_level = Some(normalized);
    }

    merged
}
