//! Exit waterfall: liquidation preferences, participation and conversion
//!
//! Net proceeds are distributed in one of two regimes:
//!
//! - **Insolvent** (`net <= total preferences`): investors split the proceeds
//!   pro-rata to the size of their preference; common holders get nothing.
//! - **Solvent**: participating investors take their preference and share the
//!   remainder; each non-participating investor either takes its preference or
//!   converts to common, whichever pays more.
//!
//! The conversion test for a non-participating investor compares its
//! preference with its percentage of `net - participating preferences`. It is
//! evaluated independently per investor and is not re-solved for the effect
//! other converting investors have on each other, so it is an approximation
//! of the simultaneous equilibrium rather than an exact solve.

use std::cmp::Ordering;

use captable_types::{
    percent_of, saturating_div, ExitPayout, SaturatingSum, Stakeholder, StakeholderKind,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::consolidate::consolidate_payouts;

/// Waterfall distribution of exit proceeds
pub struct WaterfallEngine;

impl WaterfallEngine {
    /// Distribute `net_proceeds` across `stakeholders`
    ///
    /// The table may or may not already be consolidated by name; payouts are
    /// merged by name either way.
    ///
    /// # Returns
    /// Investors first (largest payout first), then founders in the order they
    /// appear in `stakeholders`, then the option pool.
    pub fn compute_waterfall(stakeholders: &[Stakeholder], net_proceeds: Decimal) -> Vec<ExitPayout> {
        let investors: Vec<&Stakeholder> = stakeholders.iter().filter(|s| s.is_investor()).collect();
        let common_holders: Vec<&Stakeholder> =
            stakeholders.iter().filter(|s| s.kind.is_common()).collect();

        let total_preferences = investors.iter().map(|s| s.preference()).saturating_sum();

        let payouts = if net_proceeds <= total_preferences {
            debug!(%net_proceeds, %total_preferences, "Proceeds do not cover preferences");
            Self::distribute_insolvent(&investors, &common_holders, net_proceeds, total_preferences)
        } else {
            Self::distribute_solvent(&investors, &common_holders, net_proceeds)
        };

        let mut payouts = consolidate_payouts(payouts);
        payouts.sort_by(Self::presentation_order);
        payouts
    }

    /// Preferences paid pro-rata by size; common holders receive nothing
    fn distribute_insolvent(
        investors: &[&Stakeholder],
        common_holders: &[&Stakeholder],
        net_proceeds: Decimal,
        total_preferences: Decimal,
    ) -> Vec<ExitPayout> {
        let ratio = saturating_div(net_proceeds, total_preferences);

        let mut payouts = Vec::with_capacity(investors.len() + common_holders.len());

        for investor in investors {
            let payout = investor.preference().saturating_mul(ratio);
            payouts.push(ExitPayout {
                preference_amount: Some(payout),
                ..ExitPayout::common(investor, payout)
            });
        }

        for holder in common_holders {
            payouts.push(ExitPayout::common(holder, dec!(0)));
        }

        payouts
    }

    fn distribute_solvent(
        investors: &[&Stakeholder],
        common_holders: &[&Stakeholder],
        net_proceeds: Decimal,
    ) -> Vec<ExitPayout> {
        let (participating, non_participating): (Vec<&Stakeholder>, Vec<&Stakeholder>) =
            investors.iter().copied().partition(|s| s.is_participating());

        let participating_preferences =
            participating.iter().map(|s| s.preference()).saturating_sum();

        // Participating investors always take their preference, so converting
        // investors are compared against what is left after them.
        let remaining_if_convert = net_proceeds.saturating_sub(participating_preferences);
        let (converting, taking_preference): (Vec<&Stakeholder>, Vec<&Stakeholder>) =
            non_participating.into_iter().partition(|s| {
                let pro_rata_if_convert = percent_of(remaining_if_convert, s.percentage);
                pro_rata_if_convert > s.preference()
            });

        let preferences_paid = participating_preferences
            .saturating_add(taking_preference.iter().map(|s| s.preference()).saturating_sum());
        let remaining = net_proceeds.saturating_sub(preferences_paid);

        let total_participating_percent = common_holders
            .iter()
            .chain(participating.iter())
            .chain(converting.iter())
            .map(|s| s.percentage)
            .saturating_sum();

        debug!(
            converting = converting.len(),
            taking_preference = taking_preference.len(),
            %remaining,
            %total_participating_percent,
            "Solvent waterfall"
        );

        let share_of_remaining = |s: &Stakeholder| -> Decimal {
            saturating_div(s.percentage, total_participating_percent).saturating_mul(remaining)
        };

        let mut payouts = Vec::with_capacity(investors.len() + common_holders.len());

        for investor in &taking_preference {
            let preference = investor.preference();
            payouts.push(ExitPayout {
                preference_amount: Some(preference),
                ..ExitPayout::common(investor, preference)
            });
        }

        for investor in &converting {
            payouts.push(ExitPayout {
                preference_amount: Some(dec!(0)),
                ..ExitPayout::common(investor, share_of_remaining(*investor))
            });
        }

        for investor in &participating {
            let preference = investor.preference();
            let participation = share_of_remaining(*investor);
            payouts.push(ExitPayout {
                preference_amount: Some(preference),
                participation_amount: Some(participation),
                ..ExitPayout::common(investor, preference.saturating_add(participation))
            });
        }

        for holder in common_holders {
            payouts.push(ExitPayout::common(holder, share_of_remaining(*holder)));
        }

        payouts
    }

    /// Investors by payout descending, then founders, then the option pool
    ///
    /// Used with a stable sort, so founders keep their input order.
    fn presentation_order(a: &ExitPayout, b: &ExitPayout) -> Ordering {
        let rank = |p: &ExitPayout| match p.stakeholder.kind {
            StakeholderKind::Investor => 0,
            StakeholderKind::Founder => 1,
            StakeholderKind::OptionPool => 2,
        };

        rank(a).cmp(&rank(b)).then_with(|| {
            if a.stakeholder.is_investor() && b.stakeholder.is_investor() {
                b.payout.cmp(&a.payout)
            } else {
                Ordering::Equal
            }
        })
    }
}
