//! # Captable Configuration and State
//!
//! Everything around the calculation engines that is not arithmetic:
//!
//! - **Round Presets**: typical terms for pre-seed through Series D, used to
//!   pre-fill new rounds
//! - **Glossary**: plain-language definitions of the terms the tools print,
//!   grouped into five categories
//! - **Settings**: where state lives and how the tools log, loaded from an
//!   optional TOML file with `CAPTABLE_*` environment overrides
//! - **State Store**: the persisted inputs (founders, pool, rounds, exit
//!   parameters) in a single JSON storage slot, degrading to defaults when the
//!   slot is missing or unreadable
//!
//! ## Usage
//!
//! ```rust,no_run
//! use captable_config::{presets, AppSettings, StateStore};
//!
//! let settings = AppSettings::load(None)?;
//! let store = StateStore::new(settings.state_file());
//!
//! let mut state = store.load();
//! let seed = presets::next_round_preset(state.cap_table.funding_rounds.len());
//! state.cap_table.add_funding_round(&seed.template());
//! store.save(&state);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod defaults;
pub mod glossary;
pub mod presets;
pub mod settings;
pub mod store;

pub use glossary::{GlossaryCategory, GlossaryTerm, GLOSSARY};
pub use presets::{next_round_preset, preset_by_id, RoundPreset, ROUND_PRESETS};
pub use settings::{AppSettings, LoggingSettings, StateSettings};
pub use store::{StateStore, StoreError, StoredState};
