//! Property tests for the dilution and waterfall engines
//!
//! These properties must hold for any well-formed cap table: founders and the
//! initial pool add up to 100%, valuations are positive, and no round gives
//! away the whole company.

use captable_engine::{dec, Decimal, DilutionEngine, WaterfallEngine};
use captable_types::{Founder, FundingRound, Investor};
use proptest::prelude::*;

fn tolerance() -> Decimal {
    dec!(0.000001)
}

prop_compose! {
    fn founders_with_pool()
        (shares in prop::collection::vec(1u32..1000u32, 1..5), pool in 0u32..30u32)
        -> (Vec<Founder>, Decimal) {
        let pool = Decimal::from(pool);
        let total: u32 = shares.iter().sum();
        let founders = shares
            .iter()
            .enumerate()
            .map(|(i, share)| Founder {
                id: i as u64 + 1,
                name: format!("Founder {}", i + 1),
                percentage: Decimal::from(*share) / Decimal::from(total) * (dec!(100) - pool),
            })
            .collect();
        (founders, pool)
    }
}

prop_compose! {
    fn investor_strategy()
        (name in 0usize..4, amount in 100_000u64..3_000_000u64, preference in 0u32..4u32, participating in any::<bool>())
        -> Investor {
        Investor {
            id: 0,
            name: format!("Fund {name}"),
            amount: Decimal::from(amount),
            liquidation_preference: Decimal::from(preference),
            participating,
        }
    }
}

prop_compose! {
    fn round_strategy()
        (pre_money in 10_000_000u64..500_000_000u64, pool in 0u32..15u32, investors in prop::collection::vec(investor_strategy(), 1..4))
        -> FundingRound {
        FundingRound {
            id: 0,
            name: format!("Round at {pre_money}"),
            pre_money_valuation: Decimal::from(pre_money),
            option_pool_percent: Decimal::from(pool),
            investors,
        }
    }
}

proptest! {
    /// Property: every snapshot's percentages sum to 100
    #[test]
    fn snapshots_conserve_ownership(
        (founders, pool) in founders_with_pool(),
        rounds in prop::collection::vec(round_strategy(), 0..5),
    ) {
        let table = DilutionEngine::compute_cap_table(&founders, pool, &rounds);
        prop_assert_eq!(table.snapshots.len(), rounds.len() + 1);

        for snapshot in &table.snapshots {
            let total = snapshot.total_percentage();
            prop_assert!((total - dec!(100)).abs() < tolerance(),
                        "Snapshot {} sums to {}", snapshot.name, total);
        }
    }

    /// Property: a round with investment strictly shrinks every prior holder
    #[test]
    fn rounds_dilute_existing_holders(
        (founders, pool) in founders_with_pool(),
        round in round_strategy(),
    ) {
        let table = DilutionEngine::compute_cap_table(&founders, pool, std::slice::from_ref(&round));
        let before = &table.snapshots[0];
        let after = &table.snapshots[1];

        for holder in &before.stakeholders {
            let diluted = after.stakeholder(&holder.name).unwrap();
            if holder.kind == captable_types::StakeholderKind::OptionPool && round.option_pool_percent > dec!(0) {
                continue;
            }
            prop_assert!(diluted.percentage < holder.percentage,
                        "{} went from {} to {}", holder.name, holder.percentage, diluted.percentage);
        }
    }

    /// Property: payouts add up to net proceeds, solvent or not
    #[test]
    fn waterfall_conserves_proceeds(
        (founders, pool) in founders_with_pool(),
        rounds in prop::collection::vec(round_strategy(), 1..4),
        net in 1_000u64..2_000_000_000u64,
    ) {
        let table = DilutionEngine::compute_cap_table(&founders, pool, &rounds);
        let net = Decimal::from(net);
        let payouts = WaterfallEngine::compute_waterfall(&table.stakeholders, net);

        let total: Decimal = payouts.iter().map(|p| p.payout).sum();
        prop_assert!((total - net).abs() < dec!(0.0001),
                    "Payouts {} != net {}", total, net);
    }

    /// Property: the engines are deterministic
    #[test]
    fn engines_are_idempotent(
        (founders, pool) in founders_with_pool(),
        rounds in prop::collection::vec(round_strategy(), 0..4),
        net in 0u64..1_000_000_000u64,
    ) {
        let first = DilutionEngine::compute_cap_table(&founders, pool, &rounds);
        let second = DilutionEngine::compute_cap_table(&founders, pool, &rounds);
        prop_assert_eq!(&first, &second);

        let net = Decimal::from(net);
        prop_assert_eq!(
            WaterfallEngine::compute_waterfall(&first.stakeholders, net),
            WaterfallEngine::compute_waterfall(&second.stakeholders, net)
        );
    }

    /// Property: investors are listed first, largest payout first
    #[test]
    fn payouts_are_presentation_ordered(
        (founders, pool) in founders_with_pool(),
        rounds in prop::collection::vec(round_strategy(), 1..4),
        net in 1_000u64..2_000_000_000u64,
    ) {
        let table = DilutionEngine::compute_cap_table(&founders, pool, &rounds);
        let payouts = WaterfallEngine::compute_waterfall(&table.stakeholders, Decimal::from(net));

        let investors: Vec<_> = payouts.iter().take_while(|p| p.stakeholder.is_investor()).collect();
        prop_assert!(payouts.iter().skip(investors.len()).all(|p| !p.stakeholder.is_investor()));
        prop_assert!(investors.windows(2).all(|w| w[0].payout >= w[1].payout));

        let founder_names: Vec<&str> = payouts
            .iter()
            .filter(|p| p.stakeholder.kind == captable_types::StakeholderKind::Founder)
            .map(|p| p.name())
            .collect();
        let expected: Vec<&str> = founders.iter().map(|f| f.name.as_str()).collect();
        prop_assert_eq!(founder_names, expected);
    }
}
