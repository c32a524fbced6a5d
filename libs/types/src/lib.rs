//! # Captable Types Library
//!
//! Shared data model for cap table modeling: the user-entered inputs (founders,
//! funding rounds, investors), the computed stakeholder table and its round
//! snapshots, and the exit scenario / payout records produced by the waterfall.
//!
//! ## Design Philosophy
//!
//! - **Decimal Money**: Every amount and percentage is a [`Decimal`], never `f64`
//! - **Owned Snapshots**: Computed tables are plain owned values; cloning a table
//!   is a deep copy, so historical snapshots can never alias live state
//! - **Clear Boundaries**: Inputs are edited here, arithmetic lives in
//!   `captable-engine`, presets and persistence live in `captable-config`
//!
//! ## Quick Start
//!
//! ```rust
//! use captable_types::{CapTableInputs, StakeholderKind, Stakeholder};
//! use rust_decimal_macros::dec;
//!
//! let inputs = CapTableInputs::default();
//! assert!(inputs.is_initial_allocation_valid());
//!
//! let pool = Stakeholder::option_pool(dec!(10));
//! assert_eq!(pool.kind, StakeholderKind::OptionPool);
//! ```

pub mod common;
pub mod exit;
pub mod inputs;
pub mod stakeholder;

pub use common::errors::InputError;
pub use common::format::{format_currency, format_percentage};
pub use common::saturating::{percent_of, saturating_div, SaturatingSum};
pub use exit::{
    AcquisitionOptions, DealStructure, ExitOptions, ExitPayout, ExitScenario, ExitType,
    IpoOptions, ProceedsBreakdown,
};
pub use inputs::{CapTableInputs, Founder, FundingRound, Investor, RoundTemplate};
pub use stakeholder::{
    CapTableResult, RoundSnapshot, Stakeholder, StakeholderKind, INITIAL_SNAPSHOT_NAME,
    OPTION_POOL_NAME,
};

/// Decimal type used for all money and percentage values
pub use rust_decimal::Decimal;
