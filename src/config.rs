use crate::catalog::{KEYS_FILE, STRUCTS_FILE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

/// Export directory used when neither the CLI nor a config file names one
pub const DEFAULT_EXPORT_DIR: &str = "site/lib/log-generation";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogstructConfig {
    /// Directory containing the LogStruct JSON exports
    pub export_dir: PathBuf,
    pub files: ExportFiles,
}

impl Default for LogstructConfig {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            files: ExportFiles::default(),
        }
    }
}

/// File names inside the export directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportFiles {
    pub keys: String,
    pub structs: String,
}

impl Default for ExportFiles {
    fn default() -> Self {
        Self {
            keys: KEYS_FILE.to_string(),
            structs: STRUCTS_FILE.to_string(),
        }
    }
}

impl LogstructConfig {
    /// Apply a CLI/env export directory, which wins over the file setting
    pub fn with_export_dir(mut self, export_dir: Option<&Path>) -> Self {
        if let Some(dir) = export_dir {
            self.export_dir = dir.to_path_buf();
        }
        self
    }

    pub fn keys_path(&self) -> PathBuf {
        self.export_dir.join(&self.files.keys)
    }

    pub fn structs_path(&self) -> PathBuf {
        self.export_dir.join(&self.files.structs)
    }
}

pub fn load_config(path: Option<&Path>) -> Result<LogstructConfig, ConfigError> {
    if let Some(path) = path {
        load_config_from_path(path)
    } else {
        Ok(default_config().clone())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<LogstructConfig, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    toml::from_str::<LogstructConfig>(&raw).map_err(|source| ConfigError::Parse {
        path: path_display,
        source,
    })
}

pub fn default_config() -> &'static LogstructConfig {
    static DEFAULT_CONFIG: LazyLock<LogstructConfig> = LazyLock::new(LogstructConfig::default);
    &DEFAULT_CONFIG
}
