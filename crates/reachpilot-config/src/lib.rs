use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use reachpilot_core::rules::{normalize_email, validate_email};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "reachpilot";
const CONFIG_FILENAME: &str = "config.toml";

pub const MAX_LIST_LIMIT: i64 = 100;

/// Settings resolved from the config file. `owner_email` names the principal
/// whose connections the CLI operates on when `--owner` is not passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub owner_email: Option<String>,
    pub list_limit: Option<i64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid owner_email value: {0}")]
    InvalidOwnerEmail(String),
    #[error("invalid list_limit value: {0}")]
    InvalidListLimit(i64),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    owner_email: Option<String>,
    list_limit: Option<i64>,
}

/// Loads configuration. An explicit path must exist; the default XDG path is
/// optional and falls back to defaults when absent.
pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(owner_email) = parsed.owner_email {
        validate_email(&owner_email).map_err(|_| ConfigError::InvalidOwnerEmail(owner_email.clone()))?;
        config.owner_email = Some(normalize_email(&owner_email));
    }

    if let Some(limit) = parsed.list_limit {
        if !(1..=MAX_LIST_LIMIT).contains(&limit) {
            return Err(ConfigError::InvalidListLimit(limit));
        }
        config.list_limit = Some(limit);
    }

    Ok(config)
}
