//! Name-based consolidation of stakeholders and payouts
//!
//! A stakeholder's display name is its identity: the same name seen in two
//! rounds, or twice in a payout list, is one party. Merging sums percentages
//! and money, keeps the highest preference multiplier, and marks the party
//! participating if any contribution was.

use std::collections::HashMap;

use captable_types::stakeholder::ROUND_NAME_SEPARATOR;
use captable_types::{ExitPayout, Stakeholder};
use rust_decimal::Decimal;

/// Join two round-name labels, skipping absent or empty values
pub fn join_round_names(existing: Option<&str>, addition: Option<&str>) -> Option<String> {
    match (
        existing.filter(|s| !s.is_empty()),
        addition.filter(|s| !s.is_empty()),
    ) {
        (Some(a), Some(b)) => Some(format!("{a}{ROUND_NAME_SEPARATOR}{b}")),
        (Some(a), None) => Some(a.to_string()),
        (None, Some(b)) => Some(b.to_string()),
        (None, None) => None,
    }
}

/// Fold `from` into `into`
///
/// The kind and name of `into` are kept.
pub fn merge_stakeholder(into: &mut Stakeholder, from: &Stakeholder) {
    into.percentage = into.percentage.saturating_add(from.percentage);
    into.invested_amount = sum_optional(into.invested_amount, from.invested_amount);
    into.round_name = join_round_names(into.round_name.as_deref(), from.round_name.as_deref());

    // Keep the terms most favorable to the investor
    into.liquidation_preference = match (into.liquidation_preference, from.liquidation_preference) {
        (None, None) => None,
        (a, b) => Some(a.unwrap_or(Decimal::ONE).max(b.unwrap_or(Decimal::ONE))),
    };
    into.participating = match (into.participating, from.participating) {
        (None, None) => None,
        (a, b) => Some(a.unwrap_or(false) || b.unwrap_or(false)),
    };
}

/// Merge payouts that share a name, preserving first-appearance order
pub fn consolidate_payouts(payouts: Vec<ExitPayout>) -> Vec<ExitPayout> {
    let mut merged: Vec<ExitPayout> = Vec::with_capacity(payouts.len());
    let mut index: HashMap<String, usize> = HashMap::with_capacity(payouts.len());

    for payout in payouts {
        match index.get(payout.name()).copied() {
            Some(i) => {
                let existing = &mut merged[i];
                merge_stakeholder(&mut existing.stakeholder, &payout.stakeholder);
                existing.payout = existing.payout.saturating_add(payout.payout);
                existing.preference_amount =
                    sum_optional(existing.preference_amount, payout.preference_amount);
                existing.participation_amount =
                    sum_optional(existing.participation_amount, payout.participation_amount);
            }
            None => {
                index.insert(payout.name().to_string(), merged.len());
                merged.push(payout);
            }
        }
    }

    merged
}

fn sum_optional(a: Option<Decimal>, b: Option<Decimal>) -> Option<Decimal> {
    match (a, b) {
        (None, None) => None,
        (a, b) => Some(a.unwrap_or(Decimal::ZERO).saturating_add(b.unwrap_or(Decimal::ZERO))),
    }
}
