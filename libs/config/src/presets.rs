//! Funding round presets
//!
//! Typical 2025 terms for a successful venture-backed tech startup. Presets
//! only pre-fill round inputs; the engines never look at them.

use captable_types::RoundTemplate;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Named set of default round terms
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub pre_money_valuation: Decimal,
    pub typical_investment: Decimal,
    pub option_pool_percent: Decimal,
    pub liquidation_preference: Decimal,
    pub participating: bool,
}

impl RoundPreset {
    /// Round template pre-filled with this preset's terms
    pub fn template(&self) -> RoundTemplate {
        RoundTemplate {
            name: self.name.to_string(),
            pre_money_valuation: self.pre_money_valuation,
            investment: self.typical_investment,
            option_pool_percent: self.option_pool_percent,
            liquidation_preference: self.liquidation_preference,
            participating: self.participating,
        }
    }

    /// Post-money valuation if the typical investment is raised
    pub fn post_money_valuation(&self) -> Decimal {
        self.pre_money_valuation + self.typical_investment
    }
}

/// Usual order in which rounds are raised
const ROUND_ORDER: [&str; 6] = ["pre-seed", "seed", "series-a", "series-b", "series-c", "series-d"];

pub static ROUND_PRESETS: Lazy<Vec<RoundPreset>> = Lazy::new(|| {
    vec![
        RoundPreset {
            id: "pre-seed",
            name: "Pre-Seed",
            display_name: "Pre-Seed",
            description: "First external capital, often from angels or accelerators",
            pre_money_valuation: dec!(3_000_000),
            typical_investment: dec!(500_000),
            option_pool_percent: dec!(10),
            liquidation_preference: dec!(1),
            participating: false,
        },
        RoundPreset {
            id: "seed",
            name: "Seed",
            display_name: "Seed Round",
            description: "Prove product-market fit, build initial team",
            pre_money_valuation: dec!(10_000_000),
            typical_investment: dec!(2_500_000),
            option_pool_percent: dec!(10),
            liquidation_preference: dec!(1),
            participating: false,
        },
        RoundPreset {
            id: "series-a",
            name: "Series A",
            display_name: "Series A",
            description: "Scale product and go-to-market, institutional VCs lead",
            pre_money_valuation: dec!(40_000_000),
            typical_investment: dec!(12_000_000),
            option_pool_percent: dec!(10),
            liquidation_preference: dec!(1),
            participating: false,
        },
        RoundPreset {
            id: "series-b",
            name: "Series B",
            display_name: "Series B",
            description: "Scale operations, expand market presence",
            pre_money_valuation: dec!(120_000_000),
            typical_investment: dec!(35_000_000),
            option_pool_percent: dec!(5),
            liquidation_preference: dec!(1),
            participating: false,
        },
        RoundPreset {
            id: "series-c",
            name: "Series C",
            display_name: "Series C",
            description: "Late-stage growth, prepare for exit",
            pre_money_valuation: dec!(350_000_000),
            typical_investment: dec!(75_000_000),
            option_pool_percent: dec!(3),
            liquidation_preference: dec!(1),
            participating: false,
        },
        RoundPreset {
            id: "series-d",
            name: "Series D",
            display_name: "Series D+",
            description: "Pre-IPO or continued expansion",
            pre_money_valuation: dec!(800_000_000),
            typical_investment: dec!(150_000_000),
            option_pool_percent: dec!(2),
            liquidation_preference: dec!(1),
            participating: false,
        },
        RoundPreset {
            id: "custom",
            name: "Custom",
            display_name: "Custom Round",
            description: "Set your own terms",
            pre_money_valuation: dec!(10_000_000),
            typical_investment: dec!(2_000_000),
            option_pool_percent: dec!(10),
            liquidation_preference: dec!(1),
            participating: false,
        },
    ]
});

pub fn preset_by_id(id: &str) -> Option<&'static RoundPreset> {
    ROUND_PRESETS.iter().find(|p| p.id == id)
}

/// Suggested preset for the next round given how many rounds already exist
///
/// Past Series D the suggestion stays at Series D.
pub fn next_round_preset(existing_rounds: usize) -> &'static RoundPreset {
    let index = existing_rounds.min(ROUND_ORDER.len() - 1);
    preset_by_id(ROUND_ORDER[index]).unwrap_or(&ROUND_PRESETS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_order_presets_exist() {
        for id in ROUND_ORDER {
            assert!(preset_by_id(id).is_some(), "missing preset {id}");
        }
        assert!(preset_by_id("custom").is_some());
        assert!(preset_by_id("series-z").is_none());
    }

    #[test]
    fn test_next_round_progression() {
        assert_eq!(next_round_preset(0).id, "pre-seed");
        assert_eq!(next_round_preset(2).id, "series-a");
        assert_eq!(next_round_preset(5).id, "series-d");
        assert_eq!(next_round_preset(12).id, "series-d");
    }

    #[test]
    fn test_template_carries_terms() {
        let seed = preset_by_id("seed").unwrap();
        let template = seed.template();

        assert_eq!(template.name, "Seed");
        assert_eq!(template.investment, dec!(2_500_000));
        assert_eq!(template.option_pool_percent, dec!(10));
        assert_eq!(seed.post_money_valuation(), dec!(12_500_000));
    }

    #[test]
    fn test_valuations_increase_through_round_order() {
        let valuations: Vec<Decimal> = ROUND_ORDER
            .iter()
            .filter_map(|id| preset_by_id(id))
            .map(|p| p.pre_money_valuation)
            .collect();
        assert!(valuations.windows(2).all(|w| w[0] < w[1]));
    }
}
