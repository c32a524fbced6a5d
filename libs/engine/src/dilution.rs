//! Cap table dilution across sequential funding rounds
//!
//! Every round issues new shares to its investors (and optionally tops up the
//! option pool) out of the post-money valuation, shrinking all existing holders
//! by the same factor.
//!
//! Arithmetic is clamped rather than checked: a negative pre-money produces a
//! negative dilution factor, and compounding it over several rounds drives
//! percentages to `Decimal::MIN`/`Decimal::MAX` instead of panicking.

use captable_types::{
    saturating_div, CapTableResult, Founder, FundingRound, RoundSnapshot, Stakeholder,
    StakeholderKind, INITIAL_SNAPSHOT_NAME,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, trace};

use crate::consolidate::merge_stakeholder;

/// Dilution math for priced rounds
pub struct DilutionEngine;

impl DilutionEngine {
    /// Fold `rounds`, in order, over the founding cap table
    ///
    /// # Arguments
    /// * `founders` - Founders with their percentage at founding
    /// * `initial_option_pool_percent` - Pool reserved before any round (0 for none)
    /// * `rounds` - Funding rounds in the order they were raised
    ///
    /// # Returns
    /// The final ownership table, one snapshot for the initial state plus one
    /// per round, and the total invested across all rounds.
    ///
    /// Inputs are not validated. A round with a non-positive post-money gives
    /// its investors 0% instead of dividing by zero.
    pub fn compute_cap_table(
        founders: &[Founder],
        initial_option_pool_percent: Decimal,
        rounds: &[FundingRound],
    ) -> CapTableResult {
        let mut current: Vec<Stakeholder> = founders
            .iter()
            .map(|f| Stakeholder::founder(f.name.clone(), f.percentage))
            .collect();

        if initial_option_pool_percent > dec!(0) {
            current.push(Stakeholder::option_pool(initial_option_pool_percent));
        }

        let mut snapshots = Vec::with_capacity(rounds.len() + 1);
        snapshots.push(RoundSnapshot {
            name: INITIAL_SNAPSHOT_NAME.to_string(),
            stakeholders: current.clone(),
            post_money_valuation: dec!(0),
        });

        let mut total_invested = dec!(0);

        for round in rounds {
            let total_investment = round.total_investment();
            total_invested = total_invested.saturating_add(total_investment);
            let post_money = round.pre_money_valuation.saturating_add(total_investment);

            let investor_ownership = Self::ownership_fraction(total_investment, post_money);
            let pool_fraction = saturating_div(round.option_pool_percent, dec!(100));
            let dilution_factor =
                dec!(1).saturating_sub(investor_ownership.saturating_add(pool_fraction));

            debug!(
                round = %round.name,
                %post_money,
                %dilution_factor,
                "Applying funding round"
            );

            for stakeholder in &mut current {
                stakeholder.percentage = stakeholder.percentage.saturating_mul(dilution_factor);
            }

            if round.option_pool_percent > dec!(0) {
                let top_up = pool_fraction.saturating_mul(dec!(100));
                match current
                    .iter_mut()
                    .find(|s| s.kind == StakeholderKind::OptionPool)
                {
                    Some(pool) => pool.percentage = pool.percentage.saturating_add(top_up),
                    None => current.push(Stakeholder::option_pool(top_up)),
                }
            }

            for investor in &round.investors {
                let percentage = Self::ownership_fraction(investor.amount, post_money)
                    .saturating_mul(dec!(100));
                let position = Stakeholder::investor(
                    investor.name.clone(),
                    round.name.clone(),
                    percentage,
                    investor.amount,
                    investor.liquidation_preference,
                    investor.participating,
                );

                match current
                    .iter_mut()
                    .find(|s| s.kind == StakeholderKind::Investor && s.name == investor.name)
                {
                    Some(existing) => {
                        trace!(investor = %investor.name, round = %round.name, "Consolidating repeat investor");
                        merge_stakeholder(existing, &position);
                    }
                    None => current.push(position),
                }
            }

            snapshots.push(RoundSnapshot {
                name: round.name.clone(),
                stakeholders: current.clone(),
                post_money_valuation: post_money,
            });
        }

        CapTableResult {
            stakeholders: current,
            snapshots,
            total_invested,
        }
    }

    /// `amount / post_money`, or zero when the post-money is not positive
    fn ownership_fraction(amount: Decimal, post_money: Decimal) -> Decimal {
        if post_money <= dec!(0) {
            return dec!(0);
        }
        saturating_div(amount, post_money)
    }
}
