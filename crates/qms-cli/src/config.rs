//! `qms.toml` configuration.
//!
//! Looked up in order: `--config PATH`, `./qms.toml`, then the platform
//! config directory:
//! - Linux: ~/.config/qms/
//! - macOS: ~/Library/Application Support/com.qms.QMS/
//! - Windows: %APPDATA%/qms/QMS/config/
//!
//! A missing file means defaults. A file that exists but does not parse is
//! an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::{LogFormatArg, LogLevelArg};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "qms";
const APP_NAME: &str = "QMS";
pub const CONFIG_FILENAME: &str = "qms.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Config file is not valid TOML: {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the collection files.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory the default workbook name is placed in.
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: Option<LogFormatArg>,
    pub level: Option<LogLevelArg>,
}

/// A configuration and the file it came from, if any.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: Option<PathBuf>,
}

impl Config {
    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve and load the configuration.
    ///
    /// An explicit path must exist. Implicit locations are skipped when
    /// absent, falling back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
        if let Some(path) = explicit {
            return Ok(LoadedConfig {
                config: Self::from_file(path)?,
                source: Some(path.to_path_buf()),
            });
        }
        let candidates = [Some(PathBuf::from(CONFIG_FILENAME)), user_config_path()];
        for path in candidates.into_iter().flatten() {
            match Self::from_file(&path) {
                Ok(config) => {
                    return Ok(LoadedConfig {
                        config,
                        source: Some(path),
                    });
                }
                Err(ConfigError::Read { source, .. })
                    if source.kind() == io::ErrorKind::NotFound => {}
                Err(error) => return Err(error),
            }
        }
        Ok(LoadedConfig::default())
    }

    /// Data directory: the override, then the file, then the platform data dir.
    pub fn data_dir(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.storage.data_dir.clone())
            .unwrap_or_else(default_data_dir)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.export
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Path of the per-user config file, when the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

fn default_data_dir() -> PathBuf {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("qms-data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn sections_are_read() {
        let config: Config = toml::from_str(
            r#"
            [storage]
            data_dir = "/srv/qms"

            [logging]
            format = "json"
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/srv/qms")));
        assert_eq!(config.export.output_dir, None);
        assert_eq!(config.logging.format, Some(LogFormatArg::Json));
        assert_eq!(config.logging.level, Some(LogLevelArg::Debug));
    }

    #[test]
    fn cli_data_dir_wins() {
        let config = Config {
            storage: StorageConfig {
                data_dir: Some(PathBuf::from("from-file")),
            },
            ..Config::default()
        };
        assert_eq!(
            config.data_dir(Some(Path::new("from-cli"))),
            PathBuf::from("from-cli")
        );
        assert_eq!(config.data_dir(None), PathBuf::from("from-file"));
    }

    #[test]
    fn default_config_serializes() {
        let config = Config {
            logging: LoggingConfig {
                format: Some(LogFormatArg::Compact),
                level: None,
            },
            ..Config::default()
        };
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("format = \"compact\""));
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
