//! Contact repository contract and JSON file implementation.
//!
//! # Responsibility
//! - Serialize the full contact collection to one JSON document.
//! - Restore the collection at startup with tolerant decoding.
//!
//! # Invariants
//! - Writes go through a `.tmp` sibling and an atomic rename.
//! - Missing file loads as an empty collection without logging an error.
//! - Corrupt file is logged and loads as an empty collection.

use crate::model::contact::Contact;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type PersistResult<T> = Result<T, PersistError>;

/// Persistence failure with the path that caused it.
#[derive(Debug)]
pub enum PersistError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o error at `{}`: {source}", path.display()),
            Self::Json { path, source } => {
                write!(f, "invalid contact data at `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

/// Storage contract for the full contact collection.
pub trait ContactRepository {
    /// Loads every stored contact in stored order.
    ///
    /// Implementations swallow and log failures, returning an empty list.
    fn load(&self) -> Vec<Contact>;
    /// Replaces stored state with `contacts`.
    fn save(&self, contacts: &[Contact]) -> PersistResult<()>;
}

/// JSON file-backed contact repository.
#[derive(Debug, Clone)]
pub struct JsonFileContactRepository {
    path: PathBuf,
}

impl JsonFileContactRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Strict load used by [`ContactRepository::load`].
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn try_load(&self) -> PersistResult<Option<Vec<Contact>>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_error(&self.path, err)),
        };

        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| PersistError::Json {
                path: self.path.clone(),
                source,
            })
    }

    fn temp_path(&self) -> PathBuf {
        match self.path.file_name() {
            Some(name) => self
                .path
                .with_file_name(format!(".{}.tmp", name.to_string_lossy())),
            None => self.path.with_extension("tmp"),
        }
    }

    fn io_error(&self, path: &Path, source: io::Error) -> PersistError {
        PersistError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn write_atomically(&self, bytes: &[u8]) -> PersistResult<()> {
        if let Some(parent) = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            fs::create_dir_all(parent).map_err(|err| self.io_error(parent, err))?;
        }

        let temp_path = self.temp_path();
        let written = File::create(&temp_path).and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        });
        if let Err(err) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(self.io_error(&temp_path, err));
        }

        fs::rename(&temp_path, &self.path).map_err(|err| {
            let _ = fs::remove_file(&temp_path);
            self.io_error(&self.path, err)
        })
    }
}

impl ContactRepository for JsonFileContactRepository {
    fn load(&self) -> Vec<Contact> {
        let started_at = Instant::now();
        match self.try_load() {
            Ok(Some(contacts)) => {
                info!(
                    "event=contacts_load module=repo status=ok count={} duration_ms={}",
                    contacts.len(),
                    started_at.elapsed().as_millis()
                );
                contacts
            }
            Ok(None) => {
                info!("event=contacts_load module=repo status=ok count=0 reason=missing_file");
                Vec::new()
            }
            Err(err) => {
                error!(
                    "event=contacts_load module=repo status=error error_code=load_failed error={}",
                    err
                );
                Vec::new()
            }
        }
    }

    fn save(&self, contacts: &[Contact]) -> PersistResult<()> {
        let started_at = Instant::now();
        let mut json =
            serde_json::to_string_pretty(contacts).map_err(|source| PersistError::Json {
                path: self.path.clone(),
                source,
            })?;
        json.push('\n');

        self.write_atomically(json.as_bytes())?;
        info!(
            "event=contacts_save module=repo status=ok count={} duration_ms={}",
            contacts.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}
