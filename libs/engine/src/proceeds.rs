//! Gross exit valuation to net proceeds
//!
//! Acquisitions lose transaction costs, escrow holdback and the management
//! carve-out; IPOs lose underwriter fees. Deal structure, lockup and secondary
//! offering size are carried for display and never change the net figure.

use captable_types::{percent_of, ExitOptions, ExitScenario, ExitType, ProceedsBreakdown};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

/// Exit deduction math
pub struct ProceedsNormalizer;

impl ProceedsNormalizer {
    /// Net proceeds available to the waterfall
    ///
    /// A negative net (deductions larger than the gross valuation) is returned
    /// as-is; the waterfall passes it through as negative payouts.
    pub fn compute_net_proceeds(
        gross: Decimal,
        exit_type: ExitType,
        options: &ExitOptions,
    ) -> ProceedsBreakdown {
        let breakdown = match exit_type {
            ExitType::Acquisition => {
                let opts = &options.acquisition;
                let transaction_costs = percent_of(gross, opts.transaction_costs_percent);
                let escrow_amount = percent_of(gross, opts.escrow_percent);
                let management_carveout = opts.management_carveout;

                ProceedsBreakdown {
                    gross,
                    transaction_costs,
                    escrow_amount,
                    management_carveout,
                    underwriter_fees: dec!(0),
                    net: gross
                        .saturating_sub(transaction_costs)
                        .saturating_sub(escrow_amount)
                        .saturating_sub(management_carveout),
                }
            }
            ExitType::Ipo => {
                let underwriter_fees = percent_of(gross, options.ipo.underwriter_fees_percent);

                ProceedsBreakdown {
                    gross,
                    transaction_costs: dec!(0),
                    escrow_amount: dec!(0),
                    management_carveout: dec!(0),
                    underwriter_fees,
                    net: gross.saturating_sub(underwriter_fees),
                }
            }
        };

        if breakdown.net < dec!(0) {
            warn!(
                gross = %breakdown.gross,
                net = %breakdown.net,
                "Exit deductions exceed gross valuation"
            );
        }

        breakdown
    }

    /// Convenience wrapper taking a whole [`ExitScenario`]
    pub fn for_scenario(scenario: &ExitScenario) -> ProceedsBreakdown {
        Self::compute_net_proceeds(scenario.valuation, scenario.exit_type, &scenario.options)
    }
}
