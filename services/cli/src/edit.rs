//! Subcommands that edit the stored founders, rounds and investors

use anyhow::{anyhow, bail, Result};
use captable_config::preset_by_id;
use captable_types::{format_currency, format_percentage, CapTableInputs, Decimal};
use clap::Subcommand;

use crate::render;

/// Result of running an edit against the stored inputs
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// Inputs changed and should be saved
    Changed(String),
    /// Read-only output
    Unchanged(String),
}

#[derive(Subcommand, Debug)]
pub enum FounderCommand {
    /// List founders in order with their ids
    List,
    /// Add a founder (0% unless given)
    Add {
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        percentage: Option<Decimal>,
    },
    /// Remove a founder by id
    Remove { id: u64 },
    /// Move a founder to a 1-based position
    Move { id: u64, position: usize },
    /// Rename a founder or change their initial percentage
    Set {
        id: u64,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        percentage: Option<Decimal>,
    },
}

#[derive(Subcommand, Debug)]
pub enum RoundCommand {
    /// List rounds and their investors with ids
    List,
    /// Remove a round by id
    Remove { id: u64 },
    /// Overwrite a round's terms from a preset
    ApplyPreset { id: u64, preset: String },
    /// Change a round's name, pre-money valuation or pool top-up
    Set {
        id: u64,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(long)]
        pre_money: Option<Decimal>,
        /// Option pool top-up, in percent of post-money
        #[arg(long)]
        pool: Option<Decimal>,
    },
}

#[derive(Subcommand, Debug)]
pub enum InvestorCommand {
    /// Add an investor to a round ($500K, 1x, non-participating unless given)
    Add {
        round: u64,
        #[command(flatten)]
        terms: InvestorTerms,
    },
    /// Remove an investor from a round
    Remove { round: u64, id: u64 },
    /// Change an investor's terms
    Set {
        round: u64,
        id: u64,
        #[command(flatten)]
        terms: InvestorTerms,
    },
}

#[derive(clap::Args, Debug, Default)]
pub struct InvestorTerms {
    #[arg(short, long)]
    name: Option<String>,
    /// Amount invested, in dollars
    #[arg(short, long)]
    amount: Option<Decimal>,
    /// Liquidation preference multiplier
    #[arg(short, long)]
    preference: Option<Decimal>,
    /// true for participating preferred
    #[arg(long)]
    participating: Option<bool>,
}

impl FounderCommand {
    pub fn run(&self, inputs: &mut CapTableInputs) -> Result<Outcome> {
        let outcome = match self {
            Self::List => Outcome::Unchanged(render::founder_list(inputs)),
            Self::Add { name, percentage } => {
                let id = inputs.add_founder().id;
                let founder = inputs.founder_mut(id)?;
                if let Some(name) = name {
                    founder.name = name.clone();
                }
                if let Some(pct) = percentage {
                    founder.percentage = *pct;
                }
                Outcome::Changed(format!(
                    "Added founder {} (#{}) at {}",
                    founder.name,
                    id,
                    format_percentage(founder.percentage)
                ))
            }
            Self::Remove { id } => {
                if !inputs.remove_founder(*id) {
                    bail!("Founder {} not found", id);
                }
                Outcome::Changed(format!("Removed founder #{}", id))
            }
            Self::Move { id, position } => {
                let from = inputs
                    .founder_position(*id)
                    .ok_or_else(|| anyhow!("Founder {} not found", id))?;
                if *position == 0 {
                    bail!("Positions start at 1");
                }
                inputs.reorder_founders(from, position - 1);
                Outcome::Changed(format!("Moved founder #{} to position {}", id, position))
            }
            Self::Set {
                id,
                name,
                percentage,
            } => {
                let founder = inputs.founder_mut(*id)?;
                if let Some(name) = name {
                    founder.name = name.clone();
                }
                if let Some(pct) = percentage {
                    founder.percentage = *pct;
                }
                Outcome::Changed(format!(
                    "Founder #{} is {} at {}",
                    id,
                    founder.name,
                    format_percentage(founder.percentage)
                ))
            }
        };
        Ok(outcome)
    }
}

impl RoundCommand {
    pub fn run(&self, inputs: &mut CapTableInputs) -> Result<Outcome> {
        let outcome = match self {
            Self::List => Outcome::Unchanged(render::round_list(inputs)),
            Self::Remove { id } => {
                if !inputs.remove_funding_round(*id) {
                    bail!("Funding round {} not found", id);
                }
                Outcome::Changed(format!("Removed round #{}", id))
            }
            Self::ApplyPreset { id, preset } => {
                let preset = preset_by_id(preset)
                    .ok_or_else(|| anyhow!("Unknown preset '{}' (see `captable presets`)", preset))?;
                inputs.apply_template_to_round(*id, &preset.template())?;
                Outcome::Changed(format!(
                    "Round #{} now uses {} terms",
                    id, preset.display_name
                ))
            }
            Self::Set {
                id,
                name,
                pre_money,
                pool,
            } => {
                let round = inputs.round_mut(*id)?;
                if let Some(name) = name {
                    round.name = name.clone();
                }
                if let Some(value) = pre_money {
                    round.pre_money_valuation = *value;
                }
                if let Some(pct) = pool {
                    round.option_pool_percent = *pct;
                }
                Outcome::Changed(format!(
                    "Round #{} is {} at {} pre-money",
                    id,
                    round.name,
                    format_currency(round.pre_money_valuation)
                ))
            }
        };
        Ok(outcome)
    }
}

impl InvestorCommand {
    pub fn run(&self, inputs: &mut CapTableInputs) -> Result<Outcome> {
        let outcome = match self {
            Self::Add { round, terms } => {
                let id = inputs.add_investor(*round)?.id;
                let message = terms.apply(inputs, *round, id)?;
                Outcome::Changed(format!("Added {}", message))
            }
            Self::Remove { round, id } => {
                if !inputs.remove_investor(*round, *id)? {
                    bail!("Investor {} not found in funding round {}", id, round);
                }
                Outcome::Changed(format!("Removed investor #{} from round #{}", id, round))
            }
            Self::Set { round, id, terms } => {
                let message = terms.apply(inputs, *round, *id)?;
                Outcome::Changed(format!("Updated {}", message))
            }
        };
        Ok(outcome)
    }
}

impl InvestorTerms {
    fn apply(&self, inputs: &mut CapTableInputs, round_id: u64, id: u64) -> Result<String> {
        let investor = inputs.investor_mut(round_id, id)?;
        if let Some(name) = &self.name {
            investor.name = name.clone();
        }
        if let Some(amount) = self.amount {
            investor.amount = amount;
        }
        if let Some(multiple) = self.preference {
            investor.liquidation_preference = multiple;
        }
        if let Some(participating) = self.participating {
            investor.participating = participating;
        }
        Ok(format!(
            "{} (#{}) in round #{}: {} at {}x{}",
            investor.name,
            id,
            round_id,
            format_currency(investor.amount),
            investor.liquidation_preference.normalize(),
            if investor.participating {
                " participating"
            } else {
                ""
            }
        ))
    }
}

/// Set the initial option pool, in percent
pub fn set_pool(inputs: &mut CapTableInputs, percent: Decimal) -> Outcome {
    inputs.initial_option_pool = percent;
    Outcome::Changed(format!(
        "Initial option pool is {} (founders and pool total {})",
        format_percentage(percent),
        format_percentage(inputs.total_initial_percentage())
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use captable_types::InputError;
    use rust_decimal_macros::dec;

    fn seeded() -> CapTableInputs {
        let mut inputs = CapTableInputs::default();
        inputs.add_funding_round(&preset_by_id("seed").unwrap().template());
        inputs
    }

    #[test]
    fn test_founder_add_with_terms() {
        let mut inputs = CapTableInputs::default();
        let add = FounderCommand::Add {
            name: Some("Grace".to_string()),
            percentage: Some(dec!(10)),
        };

        let outcome = add.run(&mut inputs).unwrap();

        assert!(matches!(outcome, Outcome::Changed(ref m) if m.contains("Grace (#3)")));
        assert_eq!(inputs.founders[2].percentage, dec!(10));
    }

    #[test]
    fn test_founder_move_is_one_based() {
        let mut inputs = CapTableInputs::default();
        FounderCommand::Move { id: 2, position: 1 }
            .run(&mut inputs)
            .unwrap();
        assert_eq!(inputs.founders[0].id, 2);

        assert!(FounderCommand::Move { id: 2, position: 0 }.run(&mut inputs).is_err());
        assert!(FounderCommand::Move { id: 9, position: 1 }.run(&mut inputs).is_err());
    }

    #[test]
    fn test_list_does_not_change_inputs() {
        let mut inputs = seeded();
        let before = inputs.clone();
        let outcome = RoundCommand::List.run(&mut inputs).unwrap();
        assert!(matches!(outcome, Outcome::Unchanged(_)));
        assert_eq!(inputs, before);
    }

    #[test]
    fn test_investor_set_only_touches_given_terms() {
        let mut inputs = seeded();
        let set = InvestorCommand::Set {
            round: 1,
            id: 1,
            terms: InvestorTerms {
                preference: Some(dec!(2)),
                participating: Some(true),
                ..Default::default()
            },
        };

        set.run(&mut inputs).unwrap();

        let investor = &inputs.funding_rounds[0].investors[0];
        assert_eq!(investor.name, "Lead Investor");
        assert_eq!(investor.liquidation_preference, dec!(2));
        assert!(investor.participating);
    }

    #[test]
    fn test_unknown_ids_are_errors() {
        let mut inputs = seeded();
        let err = InvestorCommand::Add {
            round: 7,
            terms: InvestorTerms::default(),
        }
        .run(&mut inputs)
        .unwrap_err();
        assert_eq!(
            err.downcast_ref::<InputError>(),
            Some(&InputError::UnknownRound { id: 7 })
        );

        assert!(RoundCommand::Remove { id: 7 }.run(&mut inputs).is_err());
        assert!(InvestorCommand::Remove { round: 1, id: 42 }.run(&mut inputs).is_err());
    }

    #[test]
    fn test_set_pool_reports_total() {
        let mut inputs = CapTableInputs::default();
        inputs.founders[0].percentage = dec!(45);
        inputs.founders[1].percentage = dec!(45);

        let outcome = set_pool(&mut inputs, dec!(10));

        assert_eq!(inputs.initial_option_pool, dec!(10));
        assert!(matches!(outcome, Outcome::Changed(ref m) if m.contains("total 100.00%")));
    }
}
