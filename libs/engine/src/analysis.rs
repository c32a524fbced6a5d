//! End-to-end exit analysis
//!
//! Runs dilution, proceeds normalization and the waterfall in sequence and
//! flags results the presentation layer should warn about. The engines
//! themselves never refuse input; this is where questionable inputs and
//! alarming results get surfaced.

use captable_types::{
    CapTableInputs, CapTableResult, ExitPayout, ExitScenario, ProceedsBreakdown, SaturatingSum,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::{info, warn};

use crate::{DilutionEngine, ProceedsNormalizer, WaterfallEngine};

/// Configuration for exit analysis
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Largest accepted gap between total payouts and net proceeds
    pub payout_tolerance: Decimal,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            payout_tolerance: dec!(0.000001),
        }
    }
}

/// Conditions worth surfacing next to an analysis result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisWarning {
    /// Founders plus the initial pool do not add up to 100%
    InitialAllocation { total_percentage: Decimal },
    /// Deductions exceed the gross valuation; payouts will be negative
    NegativeProceeds { net: Decimal },
    /// Net proceeds do not cover the preference stack; common gets nothing
    PreferencesNotCovered { net: Decimal, total_preferences: Decimal },
    /// Payouts do not add up to net proceeds
    PayoutDrift { net: Decimal, total_payouts: Decimal },
}

/// Full result of one exit analysis
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitAnalysis {
    pub cap_table: CapTableResult,
    pub proceeds: ProceedsBreakdown,
    pub payouts: Vec<ExitPayout>,
    pub warnings: Vec<AnalysisWarning>,
}

impl ExitAnalysis {
    pub fn total_payouts(&self) -> Decimal {
        self.payouts.iter().map(|p| p.payout).saturating_sum()
    }

    pub fn payout_for(&self, name: &str) -> Option<&ExitPayout> {
        self.payouts.iter().find(|p| p.name() == name)
    }
}

/// Runs the engines for a set of inputs and an exit scenario
pub struct ExitAnalyzer {
    config: AnalysisConfig,
}

impl ExitAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn analyze(&self, inputs: &CapTableInputs, scenario: &ExitScenario) -> ExitAnalysis {
        let cap_table = DilutionEngine::compute_cap_table(
            &inputs.founders,
            inputs.initial_option_pool,
            &inputs.funding_rounds,
        );
        let proceeds = ProceedsNormalizer::for_scenario(scenario);
        let payouts = WaterfallEngine::compute_waterfall(&cap_table.stakeholders, proceeds.net);

        let mut warnings = Vec::new();

        if !inputs.is_initial_allocation_valid() {
            warnings.push(AnalysisWarning::InitialAllocation {
                total_percentage: inputs.total_initial_percentage(),
            });
        }

        if proceeds.net < dec!(0) {
            warnings.push(AnalysisWarning::NegativeProceeds { net: proceeds.net });
        }

        let total_preferences = cap_table.total_preferences();
        if total_preferences > dec!(0) && proceeds.net <= total_preferences {
            warnings.push(AnalysisWarning::PreferencesNotCovered {
                net: proceeds.net,
                total_preferences,
            });
        }

        let total_payouts = payouts.iter().map(|p| p.payout).saturating_sum();
        if total_payouts.saturating_sub(proceeds.net).abs() > self.config.payout_tolerance {
            warn!(net = %proceeds.net, %total_payouts, "Payouts do not sum to net proceeds");
            warnings.push(AnalysisWarning::PayoutDrift {
                net: proceeds.net,
                total_payouts,
            });
        }

        info!(
            exit_type = %scenario.exit_type,
            gross = %proceeds.gross,
            net = %proceeds.net,
            rounds = inputs.funding_rounds.len(),
            warnings = warnings.len(),
            "Exit analysis complete"
        );

        ExitAnalysis {
            cap_table,
            proceeds,
            payouts,
            warnings,
        }
    }
}

impl Default for ExitAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}
