//! TOML configuration.
//!
//! Looked up at `--config PATH` or, by default, in the platform config
//! folder:
//! - Linux: `~/.config/seedscope/config.toml`
//! - macOS: `~/Library/Application Support/seedscope/config.toml`
//! - Windows: `%APPDATA%\seedscope\config\config.toml`
//!
//! A problem with the default file only costs a warning; a problem with an
//! explicitly named file is an error.

use std::fs;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use seedscope_core::{DEFAULT_DEBOUNCE, DEFAULT_PAGE_SIZE, SortDirection, SortKey, SortState};
use seedscope_ingest::{DEFAULT_MAX_FILE_SIZE, LoadOptions, SourceFormat};

const APP_NAME: &str = "seedscope";
const CONFIG_FILENAME: &str = "config.toml";
const BYTES_PER_MB: u64 = 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub view: ViewConfig,
    pub search: SearchConfig,
    pub load: LoadConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    /// Rows per page; must be at least 1.
    pub page_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_key: Option<SortKey>,
    pub sort_descending: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE.get(),
            sort_key: None,
            sort_descending: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Quiet period before a typed query is applied.
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadConfig {
    pub max_file_size_mb: u64,
    pub format: SourceFormat,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE / BYTES_PER_MB,
            format: SourceFormat::Auto,
        }
    }
}

impl Config {
    /// Read, parse and validate one file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parse and validate TOML text. `path` only names the source in errors.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        if self.view.page_size == 0 {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                reason: "view.page_size must be at least 1".to_string(),
            });
        }
        if self.load.max_file_size_mb == 0 {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                reason: "load.max_file_size_mb must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn page_size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.view.page_size).unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn sort_state(&self) -> SortState {
        let direction = if self.view.sort_descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        SortState {
            key: self.view.sort_key,
            direction,
        }
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            format: self.load.format,
            max_file_size: self.load.max_file_size_mb.saturating_mul(BYTES_PER_MB),
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// `--config PATH`.
    Explicit(PathBuf),
    /// The platform default file.
    DefaultFile(PathBuf),
    /// Built-in defaults; carries the default path when one exists.
    Defaults(Option<PathBuf>),
}

impl ConfigOrigin {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigOrigin::Explicit(path) | ConfigOrigin::DefaultFile(path) => Some(path),
            ConfigOrigin::Defaults(path) => path.as_deref(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub origin: ConfigOrigin,
}

/// Default config file location.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Resolve the effective configuration.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    match explicit {
        Some(path) => {
            let config = Config::load_from(path)?;
            tracing::info!(path = %path.display(), "loaded config");
            Ok(LoadedConfig {
                config,
                origin: ConfigOrigin::Explicit(path.to_path_buf()),
            })
        }
        None => Ok(load_default(default_config_path())),
    }
}

/// Load the default file, falling back to built-in defaults on any problem.
pub fn load_default(path: Option<PathBuf>) -> LoadedConfig {
    let Some(path) = path else {
        tracing::warn!("could not determine config directory, using defaults");
        return LoadedConfig {
            config: Config::default(),
            origin: ConfigOrigin::Defaults(None),
        };
    };

    match Config::load_from(&path) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "loaded config");
            LoadedConfig {
                config,
                origin: ConfigOrigin::DefaultFile(path),
            }
        }
        Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            LoadedConfig {
                config: Config::default(),
                origin: ConfigOrigin::Defaults(Some(path)),
            }
        }
        Err(error) => {
            tracing::warn!(%error, "ignoring config file, using defaults");
            LoadedConfig {
                config: Config::default(),
                origin: ConfigOrigin::Defaults(Some(path)),
            }
        }
    }
}
