//! Settings Module
//!
//! Loads tool settings from an optional TOML file, then applies `CAPTABLE_*`
//! environment overrides on top (`CAPTABLE_STATE_DIR`, `CAPTABLE_LOGGING_FILTER`).
//! Every key has a default, so no file is needed at all.

use anyhow::{Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::defaults;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppSettings {
    pub state: StateSettings,
    pub logging: LoggingSettings,
}

/// Where persisted inputs live
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StateSettings {
    /// Directory for the state file; `~` and `$VARS` are expanded on load
    pub dir: String,
    /// Storage slot name, without the `.json` extension
    pub slot: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
    /// Emit JSON log lines instead of the human format
    pub json: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            state: StateSettings {
                dir: defaults::STATE_DIR.to_string(),
                slot: defaults::STORAGE_SLOT.to_string(),
            },
            logging: LoggingSettings {
                filter: defaults::LOG_FILTER.to_string(),
                json: false,
            },
        }
    }
}

impl AppSettings {
    /// Load settings with environment overrides
    ///
    /// An explicit `path` must exist. Without one, `captable.toml` in the
    /// working directory is read if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::from(Path::new(defaults::SETTINGS_FILE)).required(false),
        };

        let config = Config::builder()
            .set_default("state.dir", defaults::STATE_DIR)?
            .set_default("state.slot", defaults::STORAGE_SLOT)?
            .set_default("logging.filter", defaults::LOG_FILTER)?
            .set_default("logging.json", false)?
            .add_source(file)
            .add_source(
                Environment::with_prefix(defaults::ENV_PREFIX)
                    .separator("_")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build settings")?;

        let mut settings: Self = config
            .try_deserialize()
            .context("Failed to deserialize settings")?;
        settings.expand_paths()?;

        debug!(state_file = %settings.state_file().display(), "Settings loaded");
        Ok(settings)
    }

    /// Expand `~` and environment variables in the state directory
    pub fn expand_paths(&mut self) -> Result<()> {
        let expanded =
            shellexpand::full(&self.state.dir).context("Failed to expand state directory")?;
        self.state.dir = expanded.into_owned();
        Ok(())
    }

    /// Full path of the JSON state file
    pub fn state_file(&self) -> PathBuf {
        PathBuf::from(&self.state.dir).join(format!("{}.json", self.state.slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_settings_file() {
        let dir = tempdir().unwrap();
        let settings_path = dir.path().join("captable.toml");

        let content = r#"
[state]
dir = "/tmp/captable-test"
slot = "scratch"

[logging]
filter = "debug"
json = true
"#;
        fs::write(&settings_path, content).unwrap();

        let settings = AppSettings::load(Some(&settings_path)).unwrap();

        assert_eq!(settings.state.dir, "/tmp/captable-test");
        assert_eq!(settings.logging.filter, "debug");
        assert!(settings.logging.json);
        assert_eq!(
            settings.state_file(),
            PathBuf::from("/tmp/captable-test/scratch.json")
        );
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let settings_path = dir.path().join("partial.toml");
        fs::write(&settings_path, "[logging]\nfilter = \"trace\"\n").unwrap();

        let settings = AppSettings::load(Some(&settings_path)).unwrap();

        assert_eq!(settings.logging.filter, "trace");
        assert_eq!(settings.state.slot, defaults::STORAGE_SLOT);
        assert!(settings
            .state_file()
            .ends_with("equity-calculator-data.json"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(AppSettings::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let settings = AppSettings::default();
        let text = toml::to_string(&settings).unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("defaults.toml");
        fs::write(&path, text).unwrap();

        let mut expected = AppSettings::default();
        expected.expand_paths().unwrap();
        assert_eq!(AppSettings::load(Some(&path)).unwrap(), expected);
    }
}
