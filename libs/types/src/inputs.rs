//! User-entered cap table inputs and the edits applied to them
//!
//! Each [`FundingRound`] exclusively owns its investor list. Edits rebuild or
//! replace owned vectors; nothing here is shared with computed snapshots.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::common::errors::InputError;
use crate::common::saturating::SaturatingSum;

/// Name given to the investor seeded into a newly added round
pub const LEAD_INVESTOR_NAME: &str = "Lead Investor";

/// Amount given to an investor added by hand to an existing round
pub const DEFAULT_INVESTOR_AMOUNT: Decimal = dec!(500_000);

/// Initial allocations within this many points of 100% are accepted
const ALLOCATION_TOLERANCE: Decimal = dec!(0.01);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Founder {
    pub id: u64,
    pub name: String,
    /// Ownership at founding, in percent
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investor {
    pub id: u64,
    pub name: String,
    pub amount: Decimal,
    /// Multiplier on invested capital, e.g. 1 = 1x
    pub liquidation_preference: Decimal,
    pub participating: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingRound {
    pub id: u64,
    pub name: String,
    pub pre_money_valuation: Decimal,
    /// Percentage of post-money carved out for the option pool
    pub option_pool_percent: Decimal,
    #[serde(default)]
    pub investors: Vec<Investor>,
}

impl FundingRound {
    pub fn total_investment(&self) -> Decimal {
        self.investors.iter().map(|i| i.amount).saturating_sum()
    }

    pub fn post_money_valuation(&self) -> Decimal {
        self.pre_money_valuation
            .saturating_add(self.total_investment())
    }
}

/// Default terms used to pre-fill a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundTemplate {
    pub name: String,
    pub pre_money_valuation: Decimal,
    pub investment: Decimal,
    pub option_pool_percent: Decimal,
    pub liquidation_preference: Decimal,
    pub participating: bool,
}

/// Everything the dilution engine needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CapTableInputs {
    pub founders: Vec<Founder>,
    /// Option pool created at founding, before any funding
    pub initial_option_pool: Decimal,
    pub funding_rounds: Vec<FundingRound>,
}

impl Default for CapTableInputs {
    fn default() -> Self {
        Self {
            founders: vec![
                Founder {
                    id: 1,
                    name: "Founder 1".to_string(),
                    percentage: dec!(50),
                },
                Founder {
                    id: 2,
                    name: "Founder 2".to_string(),
                    percentage: dec!(50),
                },
            ],
            initial_option_pool: dec!(0),
            funding_rounds: Vec::new(),
        }
    }
}

impl CapTableInputs {
    pub fn add_founder(&mut self) -> &Founder {
        let id = self.next_founder_id();
        let name = format!("Founder {}", self.founders.len() + 1);
        self.founders.push(Founder {
            id,
            name,
            percentage: dec!(0),
        });
        &self.founders[self.founders.len() - 1]
    }

    /// Returns `true` if a founder was removed
    pub fn remove_founder(&mut self, id: u64) -> bool {
        let before = self.founders.len();
        self.founders.retain(|f| f.id != id);
        self.founders.len() != before
    }

    /// Move the founder at `from` to position `to`
    ///
    /// Out-of-range `from` is a no-op; `to` is clamped to the end of the list.
    pub fn reorder_founders(&mut self, from: usize, to: usize) {
        if from >= self.founders.len() {
            return;
        }
        let founder = self.founders.remove(from);
        let to = to.min(self.founders.len());
        self.founders.insert(to, founder);
    }

    /// Append a round pre-filled from `template` with a single lead investor
    pub fn add_funding_round(&mut self, template: &RoundTemplate) -> &FundingRound {
        let id = self.next_round_id();
        let investor_id = self.next_investor_id();
        self.funding_rounds.push(FundingRound {
            id,
            name: template.name.clone(),
            pre_money_valuation: template.pre_money_valuation,
            option_pool_percent: template.option_pool_percent,
            investors: vec![Investor {
                id: investor_id,
                name: LEAD_INVESTOR_NAME.to_string(),
                amount: template.investment,
                liquidation_preference: template.liquidation_preference,
                participating: template.participating,
            }],
        });
        &self.funding_rounds[self.funding_rounds.len() - 1]
    }

    /// Overwrite a round's terms and its first investor's terms from `template`
    pub fn apply_template_to_round(
        &mut self,
        round_id: u64,
        template: &RoundTemplate,
    ) -> Result<(), InputError> {
        let round = self.round_mut(round_id)?;
        round.name = template.name.clone();
        round.pre_money_valuation = template.pre_money_valuation;
        round.option_pool_percent = template.option_pool_percent;

        if let Some(first) = round.investors.first_mut() {
            first.amount = template.investment;
            first.liquidation_preference = template.liquidation_preference;
            first.participating = template.participating;
        }
        Ok(())
    }

    pub fn remove_funding_round(&mut self, id: u64) -> bool {
        let before = self.funding_rounds.len();
        self.funding_rounds.retain(|r| r.id != id);
        self.funding_rounds.len() != before
    }

    /// Add a default $500K, 1x, non-participating investor to a round
    pub fn add_investor(&mut self, round_id: u64) -> Result<&Investor, InputError> {
        let id = self.next_investor_id();
        let round = self.round_mut(round_id)?;
        let name = format!("Investor {}", round.investors.len() + 1);
        round.investors.push(Investor {
            id,
            name,
            amount: DEFAULT_INVESTOR_AMOUNT,
            liquidation_preference: dec!(1),
            participating: false,
        });
        Ok(&round.investors[round.investors.len() - 1])
    }

    pub fn remove_investor(&mut self, round_id: u64, investor_id: u64) -> Result<bool, InputError> {
        let round = self.round_mut(round_id)?;
        let before = round.investors.len();
        round.investors.retain(|i| i.id != investor_id);
        Ok(round.investors.len() != before)
    }

    pub fn total_founder_percentage(&self) -> Decimal {
        self.founders.iter().map(|f| f.percentage).saturating_sum()
    }

    /// Founders plus the initial option pool
    pub fn total_initial_percentage(&self) -> Decimal {
        self.total_founder_percentage()
            .saturating_add(self.initial_option_pool)
    }

    /// Whether founders and the initial pool add up to 100% (±0.01)
    pub fn is_initial_allocation_valid(&self) -> bool {
        self.total_initial_percentage()
            .saturating_sub(dec!(100))
            .abs()
            < ALLOCATION_TOLERANCE
    }

    pub fn founder_mut(&mut self, id: u64) -> Result<&mut Founder, InputError> {
        self.founders
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(InputError::UnknownFounder { id })
    }

    /// Index of a founder in display order
    pub fn founder_position(&self, id: u64) -> Option<usize> {
        self.founders.iter().position(|f| f.id == id)
    }

    pub fn round_mut(&mut self, id: u64) -> Result<&mut FundingRound, InputError> {
        self.funding_rounds
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(InputError::UnknownRound { id })
    }

    pub fn investor_mut(&mut self, round_id: u64, investor_id: u64) -> Result<&mut Investor, InputError> {
        self.round_mut(round_id)?
            .investors
            .iter_mut()
            .find(|i| i.id == investor_id)
            .ok_or(InputError::UnknownInvestor {
                round_id,
                id: investor_id,
            })
    }

    fn next_founder_id(&self) -> u64 {
        self.founders.iter().map(|f| f.id).max().unwrap_or(0) + 1
    }

    fn next_round_id(&self) -> u64 {
        self.funding_rounds.iter().map(|r| r.id).max().unwrap_or(0) + 1
    }

    fn next_investor_id(&self) -> u64 {
        self.funding_rounds
            .iter()
            .flat_map(|r| r.investors.iter().map(|i| i.id))
            .max()
            .unwrap_or(0)
            + 1
    }
}
