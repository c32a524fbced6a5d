//! Computed cap table entities
//!
//! A [`Stakeholder`] is one party's position at a point in the cap table
//! timeline. Stakeholders are never persisted; they are rebuilt from the
//! inputs every time the dilution engine runs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::saturating::SaturatingSum;

/// Display name given to the option pool stakeholder
pub const OPTION_POOL_NAME: &str = "Option Pool";

/// Name of the snapshot recorded before any funding round
pub const INITIAL_SNAPSHOT_NAME: &str = "Initial";

/// Separator used when a stakeholder's round history is joined into one label
pub const ROUND_NAME_SEPARATOR: &str = ", ";

/// Class of a stakeholder in the cap table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StakeholderKind {
    Founder,
    Investor,
    OptionPool,
}

impl StakeholderKind {
    /// Founders and the option pool hold common stock
    pub fn is_common(self) -> bool {
        matches!(self, Self::Founder | Self::OptionPool)
    }
}

/// One party's position in the cap table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stakeholder {
    pub name: String,
    /// Ownership in percent (0-100)
    pub percentage: Decimal,
    #[serde(rename = "type")]
    pub kind: StakeholderKind,
    /// Comma-joined names of the rounds this investor took part in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invested_amount: Option<Decimal>,
    /// Liquidation preference multiplier (1 = 1x)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liquidation_preference: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participating: Option<bool>,
}

impl Stakeholder {
    pub fn founder(name: impl Into<String>, percentage: Decimal) -> Self {
        Self {
            name: name.into(),
            percentage,
            kind: StakeholderKind::Founder,
            round_name: None,
            invested_amount: None,
            liquidation_preference: None,
            participating: None,
        }
    }

    pub fn option_pool(percentage: Decimal) -> Self {
        Self {
            name: OPTION_POOL_NAME.to_string(),
            percentage,
            kind: StakeholderKind::OptionPool,
            round_name: None,
            invested_amount: None,
            liquidation_preference: None,
            participating: None,
        }
    }

    /// Investor position created by a single round's investment
    pub fn investor(
        name: impl Into<String>,
        round_name: impl Into<String>,
        percentage: Decimal,
        invested_amount: Decimal,
        liquidation_preference: Decimal,
        participating: bool,
    ) -> Self {
        Self {
            name: name.into(),
            percentage,
            kind: StakeholderKind::Investor,
            round_name: Some(round_name.into()),
            invested_amount: Some(invested_amount),
            liquidation_preference: Some(liquidation_preference),
            participating: Some(participating),
        }
    }

    pub fn is_investor(&self) -> bool {
        self.kind == StakeholderKind::Investor
    }

    /// Preference multiplier, treating an absent value as 1x
    ///
    /// An explicit zero is kept: it means the investor has no preference and
    /// always converts.
    pub fn preference_multiplier(&self) -> Decimal {
        self.liquidation_preference.unwrap_or(Decimal::ONE)
    }

    /// Liquidation preference in dollars: invested amount × multiplier
    pub fn preference(&self) -> Decimal {
        self.invested_amount
            .unwrap_or(Decimal::ZERO)
            .saturating_mul(self.preference_multiplier())
    }

    pub fn is_participating(&self) -> bool {
        self.participating.unwrap_or(false)
    }

    /// Individual round names from the joined round history
    pub fn rounds(&self) -> impl Iterator<Item = &str> {
        self.round_name
            .as_deref()
            .unwrap_or_default()
            .split(ROUND_NAME_SEPARATOR)
            .filter(|name| !name.is_empty())
    }
}

/// Cap table right after a round (or the initial state)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSnapshot {
    pub name: String,
    pub stakeholders: Vec<Stakeholder>,
    pub post_money_valuation: Decimal,
}

impl RoundSnapshot {
    /// Sum of all stakeholder percentages in this snapshot
    pub fn total_percentage(&self) -> Decimal {
        self.stakeholders.iter().map(|s| s.percentage).saturating_sum()
    }

    pub fn stakeholder(&self, name: &str) -> Option<&Stakeholder> {
        self.stakeholders.iter().find(|s| s.name == name)
    }
}

/// Output of the dilution engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapTableResult {
    /// Final ownership table (equal to the last snapshot's table)
    pub stakeholders: Vec<Stakeholder>,
    /// Audit trail: the initial state followed by one snapshot per round
    pub snapshots: Vec<RoundSnapshot>,
    /// Grand total invested across all rounds
    pub total_invested: Decimal,
}

impl CapTableResult {
    pub fn stakeholder(&self, name: &str) -> Option<&Stakeholder> {
        self.stakeholders.iter().find(|s| s.name == name)
    }

    /// Post-money valuation of the last round, zero when no round was raised
    pub fn latest_post_money(&self) -> Decimal {
        self.snapshots
            .last()
            .map(|s| s.post_money_valuation)
            .unwrap_or(Decimal::ZERO)
    }

    /// Total preference stack across all investors
    pub fn total_preferences(&self) -> Decimal {
        self.stakeholders
            .iter()
            .filter(|s| s.is_investor())
            .map(Stakeholder::preference)
            .saturating_sum()
    }
}
