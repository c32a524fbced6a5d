//! Exit scenario parameters and payout records

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::common::errors::InputError;
use crate::common::saturating::saturating_div;
use crate::stakeholder::Stakeholder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitType {
    #[default]
    Acquisition,
    Ipo,
}

impl fmt::Display for ExitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Acquisition => write!(f, "acquisition"),
            Self::Ipo => write!(f, "ipo"),
        }
    }
}

impl FromStr for ExitType {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "acquisition" => Ok(Self::Acquisition),
            "ipo" => Ok(Self::Ipo),
            other => Err(InputError::UnknownExitType(other.to_string())),
        }
    }
}

/// Consideration paid by the acquirer (informational)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealStructure {
    #[default]
    Cash,
    Stock,
    Mixed,
}

impl FromStr for DealStructure {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "stock" => Ok(Self::Stock),
            "mixed" | "mix" => Ok(Self::Mixed),
            other => Err(InputError::UnknownDealStructure(other.to_string())),
        }
    }
}

/// Acquisition deductions and deal terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquisitionOptions {
    pub deal_structure: DealStructure,
    /// Stock share of consideration, 0-100, only meaningful for mixed deals
    pub stock_percentage: Decimal,
    /// Held back for indemnification, typically 10-20%
    pub escrow_percent: Decimal,
    /// Dollar amount reserved for a management bonus pool
    pub management_carveout: Decimal,
    /// Legal and banking fees, typically 1-3%
    pub transaction_costs_percent: Decimal,
}

impl Default for AcquisitionOptions {
    fn default() -> Self {
        Self {
            deal_structure: DealStructure::Cash,
            stock_percentage: dec!(50),
            escrow_percent: dec!(0),
            management_carveout: dec!(0),
            transaction_costs_percent: dec!(0),
        }
    }
}

impl AcquisitionOptions {
    /// Fraction of consideration paid in acquirer stock (0-1)
    ///
    /// Informational only; net proceeds are the same whatever the mix.
    pub fn stock_fraction(&self) -> Decimal {
        match self.deal_structure {
            DealStructure::Cash => dec!(0),
            DealStructure::Stock => dec!(1),
            DealStructure::Mixed => self.stock_percentage / dec!(100),
        }
    }
}

/// IPO deductions and offering terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpoOptions {
    /// Typically 5-7%
    pub underwriter_fees_percent: Decimal,
    pub lockup_days: u32,
    /// Dollar amount of existing shares sold in the offering
    pub secondary_offering: Decimal,
}

impl Default for IpoOptions {
    fn default() -> Self {
        Self {
            underwriter_fees_percent: dec!(0),
            lockup_days: 180,
            secondary_offering: dec!(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitOptions {
    #[serde(default)]
    pub acquisition: AcquisitionOptions,
    #[serde(default)]
    pub ipo: IpoOptions,
}

/// Exit event: type, gross valuation and deduction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitScenario {
    pub exit_type: ExitType,
    pub valuation: Decimal,
    #[serde(default)]
    pub options: ExitOptions,
}

impl ExitScenario {
    pub fn acquisition(valuation: Decimal, options: AcquisitionOptions) -> Self {
        Self {
            exit_type: ExitType::Acquisition,
            valuation,
            options: ExitOptions {
                acquisition: options,
                ipo: IpoOptions::default(),
            },
        }
    }

    pub fn ipo(valuation: Decimal, options: IpoOptions) -> Self {
        Self {
            exit_type: ExitType::Ipo,
            valuation,
            options: ExitOptions {
                acquisition: AcquisitionOptions::default(),
                ipo: options,
            },
        }
    }
}

/// Gross-to-net breakdown of exit proceeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProceedsBreakdown {
    pub gross: Decimal,
    pub transaction_costs: Decimal,
    pub escrow_amount: Decimal,
    pub management_carveout: Decimal,
    pub underwriter_fees: Decimal,
    /// May be negative when deductions exceed the gross valuation
    pub net: Decimal,
}

impl ProceedsBreakdown {
    pub fn total_deductions(&self) -> Decimal {
        self.transaction_costs + self.escrow_amount + self.management_carveout + self.underwriter_fees
    }
}

/// A stakeholder's share of exit proceeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitPayout {
    #[serde(flatten)]
    pub stakeholder: Stakeholder,
    pub payout: Decimal,
    /// Portion of the payout paid as liquidation preference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preference_amount: Option<Decimal>,
    /// Portion of a participating investor's payout shared pro-rata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participation_amount: Option<Decimal>,
}

impl ExitPayout {
    /// Payout with no preference or participation breakdown (common holders)
    pub fn common(stakeholder: &Stakeholder, payout: Decimal) -> Self {
        Self {
            stakeholder: stakeholder.clone(),
            payout,
            preference_amount: None,
            participation_amount: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.stakeholder.name
    }

    /// Payout as a multiple of invested capital, `None` for non-investors
    pub fn return_multiple(&self) -> Option<Decimal> {
        self.stakeholder
            .invested_amount
            .filter(|amount| !amount.is_zero())
            .map(|amount| saturating_div(self.payout, amount))
    }
}
