//! # Captable Engine - Dilution and Exit Waterfall Mathematics
//!
//! ## Purpose
//!
//! Pure calculation library that turns a sequence of financing rounds into an
//! ownership table, and an exit scenario into per-stakeholder payouts under
//! standard preferred-stock terms (liquidation preference with optional
//! participation).
//!
//! ## Components
//!
//! - [`DilutionEngine`]: folds funding rounds over the founding stakeholders,
//!   recording an immutable snapshot after every round
//! - [`ProceedsNormalizer`]: gross exit valuation to net proceeds after
//!   acquisition or IPO deductions
//! - [`WaterfallEngine`]: distributes net proceeds across preference tiers and
//!   common holders, with the convert-or-take-preference decision for
//!   non-participating investors
//! - [`ExitAnalyzer`]: runs all three in sequence and collects warnings for the
//!   presentation layer
//!
//! ## Guarantees
//!
//! - **Total**: zero or negative valuations, empty preference stacks and empty
//!   participating pools never divide by zero; guarded terms come out as 0
//! - **Stateless**: every call recomputes from its inputs and never mutates them
//! - **Decimal arithmetic**: no floating point anywhere in the money path
//!
//! ## Data Flow
//!
//! ```text
//! founders + rounds ──► DilutionEngine ──► final stakeholders ──┐
//!                                                                ├──► WaterfallEngine ──► payouts
//! exit scenario ─────► ProceedsNormalizer ──► net proceeds ──────┘
//! ```

pub mod analysis;
pub mod consolidate;
pub mod dilution;
pub mod proceeds;
pub mod waterfall;

pub use analysis::{AnalysisConfig, AnalysisWarning, ExitAnalysis, ExitAnalyzer};
pub use dilution::DilutionEngine;
pub use proceeds::ProceedsNormalizer;
pub use waterfall::WaterfallEngine;

/// Common types for cap table calculations
pub use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;
