//! Persisted calculator state
//!
//! One JSON document per storage slot with camelCase keys. A document written
//! by an older version, or with keys missing, still loads: absent fields take
//! their defaults.

use captable_types::{CapTableInputs, Decimal, ExitOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::defaults;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access state file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("State file {path} is not valid: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Everything the calculator remembers between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredState {
    #[serde(flatten)]
    pub cap_table: CapTableInputs,
    pub exit_valuation: Decimal,
    pub exit_options: ExitOptions,
}

impl Default for StoredState {
    fn default() -> Self {
        Self {
            cap_table: CapTableInputs::default(),
            exit_valuation: Decimal::from(defaults::EXIT_VALUATION_DOLLARS),
            exit_options: ExitOptions::default(),
        }
    }
}

/// File-backed storage slot
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for `<dir>/equity-calculator-data.json`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(
            dir.as_ref()
                .join(format!("{}.json", defaults::STORAGE_SLOT)),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the slot, `Ok(None)` when nothing has been saved yet
    pub fn try_load(&self) -> Result<Option<StoredState>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| StoreError::Malformed {
                path: self.path.clone(),
                source,
            })
    }

    /// Read the slot, falling back to the default state on any failure
    pub fn load(&self) -> StoredState {
        match self.try_load() {
            Ok(Some(state)) => {
                debug!(path = %self.path.display(), "Loaded stored state");
                state
            }
            Ok(None) => StoredState::default(),
            Err(e) => {
                warn!("Failed to load stored state, using defaults: {}", e);
                StoredState::default()
            }
        }
    }

    /// Write the slot, creating its directory if needed
    pub fn try_save(&self, state: &StoredState) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(state).map_err(|source| {
            StoreError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, json).map_err(io_err)
    }

    /// Write the slot, logging instead of failing
    pub fn save(&self, state: &StoredState) {
        if let Err(e) = self.try_save(state) {
            warn!("Failed to save state: {}", e);
        }
    }
}
