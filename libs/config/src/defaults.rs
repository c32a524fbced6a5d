//! Default values shared by the settings loader, the state store and the CLI

/// Storage slot name; the state file is `<slot>.json`
pub const STORAGE_SLOT: &str = "equity-calculator-data";

/// Directory holding the state file when nothing else is configured
pub const STATE_DIR: &str = "~/.captable";

/// Prefix for environment variable overrides (`CAPTABLE_STATE_DIR`, ...)
pub const ENV_PREFIX: &str = "CAPTABLE";

/// Settings file looked up when no path is given
pub const SETTINGS_FILE: &str = "captable.toml";

/// Default tracing filter for the command line tools
pub const LOG_FILTER: &str = "captable=info,warn";

/// Gross exit valuation for a fresh state ($100M)
pub const EXIT_VALUATION_DOLLARS: i64 = 100_000_000;
