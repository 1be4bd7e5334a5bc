//! Startup configuration.
//!
//! # Responsibility
//! - Carry data file, log directory and log level as one explicit value.
//! - Resolve relative paths against a base directory before use.
//!
//! # Invariants
//! - A resolved config has absolute paths and a normalized level.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_FILE: &str = "contacts.json";
pub const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyPath(&'static str),
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPath(field) => write!(f, "config field `{field}` cannot be empty"),
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ConfigError {}

/// Explicit configuration handed to the command interface at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactBookConfig {
    /// JSON file holding the contact collection.
    pub data_file: PathBuf,
    /// Directory for rolling log files.
    pub log_dir: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
}

impl Default for ContactBookConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            log_level: default_log_level().to_string(),
        }
    }
}

impl ContactBookConfig {
    /// Returns a copy with paths made absolute against `base_dir`.
    ///
    /// # Errors
    /// - `EmptyPath` when a path field is empty.
    /// - `InvalidLogLevel` when the level is unsupported.
    pub fn resolve_against(&self, base_dir: &Path) -> Result<Self, ConfigError> {
        let level = normalize_level(&self.log_level).map_err(ConfigError::InvalidLogLevel)?;
        Ok(Self {
            data_file: absolutize(&self.data_file, base_dir, "data_file")?,
            log_dir: absolutize(&self.log_dir, base_dir, "log_dir")?,
            log_level: level.to_string(),
        })
    }
}

fn absolutize(path: &Path, base_dir: &Path, field: &'static str) -> Result<PathBuf, ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::EmptyPath(field));
    }
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(base_dir.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ContactBookConfig};
    use std::path::{Path, PathBuf};

    #[test]
    fn default_points_at_contacts_json() {
        let config = ContactBookConfig::default();
        assert_eq!(config.data_file, PathBuf::from("contacts.json"));
    }

    #[test]
    fn resolve_joins_relative_paths_and_keeps_absolute_ones() {
        let config = ContactBookConfig {
            data_file: PathBuf::from("book/contacts.json"),
            log_dir: PathBuf::from("/var/log/contactbook"),
            log_level: "WARNING".to_string(),
        };
        let resolved = config.resolve_against(Path::new("/home/me")).unwrap();
        assert_eq!(resolved.data_file, PathBuf::from("/home/me/book/contacts.json"));
        assert_eq!(resolved.log_dir, PathBuf::from("/var/log/contactbook"));
        assert_eq!(resolved.log_level, "warn");
    }

    #[test]
    fn resolve_rejects_bad_values() {
        let empty = ContactBookConfig {
            data_file: PathBuf::new(),
            ..ContactBookConfig::default()
        };
        assert_eq!(
            empty.resolve_against(Path::new("/tmp")),
            Err(ConfigError::EmptyPath("data_file"))
        );

        let level = ContactBookConfig {
            log_level: "chatty".to_string(),
            ..ContactBookConfig::default()
        };
        assert!(matches!(
            level.resolve_against(Path::new("/tmp")),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }
}
