//! Worked exit scenarios
//!
//! Each test walks a small cap table from founding to exit and checks the
//! headline numbers a founder would read off the payout table.

use captable_engine::{dec, Decimal, DilutionEngine, ProceedsNormalizer, WaterfallEngine};
use captable_types::{
    AcquisitionOptions, ExitOptions, ExitPayout, ExitType, Founder, FundingRound, Investor,
    Stakeholder, StakeholderKind,
};

const TOLERANCE: Decimal = dec!(0.000001);

fn assert_close(actual: Decimal, expected: Decimal) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

fn founder(id: u64, name: &str, percentage: Decimal) -> Founder {
    Founder {
        id,
        name: name.to_string(),
        percentage,
    }
}

fn investor(id: u64, name: &str, amount: Decimal) -> Investor {
    Investor {
        id,
        name: name.to_string(),
        amount,
        liquidation_preference: dec!(1),
        participating: false,
    }
}

fn payout<'a>(payouts: &'a [ExitPayout], name: &str) -> &'a ExitPayout {
    payouts
        .iter()
        .find(|p| p.name() == name)
        .unwrap_or_else(|| panic!("no payout for {name}"))
}

#[test]
fn test_two_founders_no_rounds() {
    let founders = vec![founder(1, "Founder 1", dec!(50)), founder(2, "Founder 2", dec!(50))];
    let table = DilutionEngine::compute_cap_table(&founders, dec!(0), &[]);

    let proceeds = ProceedsNormalizer::compute_net_proceeds(
        dec!(100_000_000),
        ExitType::Acquisition,
        &ExitOptions::default(),
    );
    let payouts = WaterfallEngine::compute_waterfall(&table.stakeholders, proceeds.net);

    assert_eq!(payouts.len(), 2);
    assert_eq!(payouts[0].name(), "Founder 1");
    assert_eq!(payouts[1].name(), "Founder 2");
    assert_eq!(payouts[0].payout, dec!(50_000_000));
    assert_eq!(payouts[1].payout, dec!(50_000_000));
}

#[test]
fn test_seed_round_investor_converts() {
    let founders = vec![founder(1, "Founder", dec!(90))];
    let rounds = vec![FundingRound {
        id: 1,
        name: "Seed".to_string(),
        pre_money_valuation: dec!(10_000_000),
        option_pool_percent: dec!(0),
        investors: vec![investor(1, "Acme VC", dec!(2_000_000))],
    }];

    let table = DilutionEngine::compute_cap_table(&founders, dec!(10), &rounds);
    assert_eq!(table.snapshots[1].post_money_valuation, dec!(12_000_000));
    assert_close(table.stakeholder("Founder").unwrap().percentage, dec!(75));
    assert_close(table.stakeholder("Option Pool").unwrap().percentage, dec!(25) / dec!(3));
    assert_close(table.stakeholder("Acme VC").unwrap().percentage, dec!(50) / dec!(3));

    let payouts = WaterfallEngine::compute_waterfall(&table.stakeholders, dec!(50_000_000));

    let acme = payout(&payouts, "Acme VC");
    assert_eq!(acme.preference_amount, Some(dec!(0)));
    assert_close(acme.payout, dec!(25_000_000) / dec!(3));
    assert_close(payout(&payouts, "Founder").payout, dec!(37_500_000));
    assert_close(payout(&payouts, "Option Pool").payout, dec!(12_500_000) / dec!(3));

    let total: Decimal = payouts.iter().map(|p| p.payout).sum();
    assert_close(total, dec!(50_000_000));

    let kinds: Vec<StakeholderKind> = payouts.iter().map(|p| p.stakeholder.kind).collect();
    assert_eq!(
        kinds,
        vec![StakeholderKind::Investor, StakeholderKind::Founder, StakeholderKind::OptionPool]
    );
}

#[test]
fn test_insolvent_exit_pays_preferences_pro_rata() {
    let table = vec![
        Stakeholder::founder("Founder", dec!(60)),
        Stakeholder::option_pool(dec!(10)),
        Stakeholder::investor("Early Fund", "Seed", dec!(10), dec!(5_000_000), dec!(1), false),
        Stakeholder::investor("Growth Fund", "Series A", dec!(20), dec!(10_000_000), dec!(1), false),
    ];

    let payouts = WaterfallEngine::compute_waterfall(&table, dec!(9_000_000));

    assert_close(payout(&payouts, "Early Fund").payout, dec!(3_000_000));
    assert_close(payout(&payouts, "Growth Fund").payout, dec!(6_000_000));
    assert_eq!(payout(&payouts, "Founder").payout, dec!(0));
    assert_eq!(payout(&payouts, "Option Pool").payout, dec!(0));
    assert_eq!(payouts[0].name(), "Growth Fund");
}

#[test]
fn test_acquisition_deductions_reach_the_waterfall() {
    let options = ExitOptions {
        acquisition: AcquisitionOptions {
            escrow_percent: dec!(20),
            management_carveout: dec!(1_000_000),
            ..AcquisitionOptions::default()
        },
        ..ExitOptions::default()
    };
    let proceeds =
        ProceedsNormalizer::compute_net_proceeds(dec!(20_000_000), ExitType::Acquisition, &options);
    assert_eq!(proceeds.net, dec!(15_000_000));

    let table = vec![
        Stakeholder::founder("Ada", dec!(50)),
        Stakeholder::founder("Grace", dec!(50)),
    ];
    let payouts = WaterfallEngine::compute_waterfall(&table, proceeds.net);

    let total: Decimal = payouts.iter().map(|p| p.payout).sum();
    assert_eq!(total, dec!(15_000_000));
    assert_eq!(payouts[0].payout, dec!(7_500_000));
}

#[test]
fn test_repeat_investor_appears_once() {
    let founders = vec![founder(1, "Founder", dec!(100))];
    let rounds = vec![
        FundingRound {
            id: 1,
            name: "Round1".to_string(),
            pre_money_valuation: dec!(4_000_000),
            option_pool_percent: dec!(0),
            investors: vec![investor(1, "Acme VC", dec!(1_000_000))],
        },
        FundingRound {
            id: 2,
            name: "Round2".to_string(),
            pre_money_valuation: dec!(16_000_000),
            option_pool_percent: dec!(0),
            investors: vec![Investor {
                liquidation_preference: dec!(2),
                participating: true,
                ..investor(2, "Acme VC", dec!(4_000_000))
            }],
        },
    ];

    let table = DilutionEngine::compute_cap_table(&founders, dec!(0), &rounds);
    let acme: Vec<&Stakeholder> = table.stakeholders.iter().filter(|s| s.name == "Acme VC").collect();

    assert_eq!(acme.len(), 1);
    // 20% after Round1, diluted by 0.8 then topped up by 20%
    assert_eq!(acme[0].percentage, dec!(36));
    assert_eq!(acme[0].invested_amount, Some(dec!(5_000_000)));
    assert_eq!(acme[0].liquidation_preference, Some(dec!(2)));
    assert_eq!(acme[0].participating, Some(true));
    assert_eq!(acme[0].round_name.as_deref(), Some("Round1, Round2"));

    let payouts = WaterfallEngine::compute_waterfall(&table.stakeholders, dec!(50_000_000));
    assert_eq!(payouts.iter().filter(|p| p.name() == "Acme VC").count(), 1);
}

#[test]
fn test_ipo_underwriter_fees() {
    let options = ExitOptions {
        ipo: captable_types::IpoOptions {
            underwriter_fees_percent: dec!(6),
            ..Default::default()
        },
        ..ExitOptions::default()
    };
    let proceeds = ProceedsNormalizer::compute_net_proceeds(dec!(500_000_000), ExitType::Ipo, &options);
    assert_eq!(proceeds.underwriter_fees, dec!(30_000_000));
    assert_eq!(proceeds.net, dec!(470_000_000));
}
