//! Config file loading and flag precedence.
//!
//! The file is optional and read-only; the session itself keeps no state on
//! disk.

use crate::cli::Cli;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// On-disk config shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[logging]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Effective settings after merging flags over the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// `<config dir>/tasklist/config.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tasklist").join("config.toml"))
}

/// Loads the config file.
///
/// An explicit path must exist. The default path is allowed to be absent, in
/// which case defaults are returned.
pub fn load_config(explicit: Option<&Path>) -> Result<FileConfig, ConfigError> {
    match explicit {
        Some(path) => read_config(path),
        None => match default_config_path() {
            Some(path) if path.exists() => read_config(&path),
            _ => Ok(FileConfig::default()),
        },
    }
}

fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Flags win over the file; the file wins over built-in defaults.
pub fn resolve(cli: &Cli, file: FileConfig) -> Settings {
    let log_level = cli
        .log_level
        .clone()
        .or(file.logging.level)
        .unwrap_or_else(|| tasklist_core::default_log_level().to_string());
    let log_dir = cli.log_dir.clone().or(file.logging.dir);
    Settings { log_level, log_dir }
}

#[cfg(test)]
mod tests {
    use super::{load_config, resolve, ConfigError, FileConfig, LoggingConfig};
    use crate::cli::Cli;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn load_config_reads_logging_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let body = "[logging]\nlevel = \"warn\"\ndir = \"/var/log/tasklist\"\n";
        std::fs::write(&path, body).unwrap();

        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.logging.level.as_deref(), Some("warn"));
        assert_eq!(config.logging.dir, Some(PathBuf::from("/var/log/tasklist")));
    }

    #[test]
    fn empty_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        assert_eq!(load_config(Some(path.as_path())).unwrap(), FileConfig::default());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging\nlevel = ").unwrap();

        let err = load_config(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn flags_override_file_values() {
        let cli = Cli::parse_from(["tasklist", "--log-level", "trace"]);
        let file = FileConfig {
            logging: LoggingConfig {
                level: Some("warn".to_string()),
                dir: Some(PathBuf::from("/tmp/tasklist-logs")),
            },
        };

        let settings = resolve(&cli, file);
        assert_eq!(settings.log_level, "trace");
        assert_eq!(settings.log_dir, Some(PathBuf::from("/tmp/tasklist-logs")));
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cli = Cli::parse_from(["tasklist"]);
        let settings = resolve(&cli, FileConfig::default());
        assert_eq!(settings.log_level, tasklist_core::default_log_level());
        assert_eq!(settings.log_dir, None);
    }
}
