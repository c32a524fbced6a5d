//! `captable` command line entry point

use anyhow::{bail, Context, Result};
use captable_config::glossary::{self, GlossaryCategory};
use captable_config::{
    next_round_preset, preset_by_id, AppSettings, LoggingSettings, StateStore, StoredState,
    ROUND_PRESETS,
};
use captable_engine::{AnalysisWarning, DilutionEngine, ExitAnalyzer};
use captable_types::{
    format_currency, CapTableInputs, DealStructure, Decimal, ExitOptions, ExitScenario, ExitType,
};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod edit;
mod render;

use edit::{FounderCommand, InvestorCommand, Outcome, RoundCommand};

#[derive(Parser)]
#[command(name = "captable")]
#[command(about = "Cap table dilution and exit waterfall calculator")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to ./captable.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// State file, overriding the configured storage slot
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a fresh state with two 50/50 founders
    Init {
        /// Overwrite an existing state file
        #[arg(short, long)]
        force: bool,
    },
    /// List round presets
    Presets,
    /// Add a funding round from a preset
    AddRound {
        /// Preset id (defaults to the next round in sequence)
        #[arg(short, long)]
        preset: Option<String>,
    },
    /// Show the cap table after every round
    Table {
        /// Only show the final table
        #[arg(long)]
        final_only: bool,
    },
    /// Model an exit and show who gets what
    Exit(ExitArgs),
    /// Edit founders
    Founder {
        #[command(subcommand)]
        command: FounderCommand,
    },
    /// Set the initial option pool, in percent
    Pool { percent: Decimal },
    /// Edit funding rounds
    Round {
        #[command(subcommand)]
        command: RoundCommand,
    },
    /// Edit the investors in a round
    Investor {
        #[command(subcommand)]
        command: InvestorCommand,
    },
    /// Explain cap table and exit terms
    Glossary {
        /// general, valuation, securities, control or fundraising
        #[arg(long)]
        category: Option<GlossaryCategory>,
        /// Only show terms whose name or key contains this text
        term: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
struct ExitArgs {
    /// Gross exit valuation in dollars
    #[arg(short, long)]
    valuation: Option<Decimal>,
    /// Model an IPO instead of an acquisition
    #[arg(long)]
    ipo: bool,
    /// Acquisition consideration: cash, stock or mixed
    #[arg(long)]
    deal: Option<DealStructure>,
    /// Stock share of a mixed deal, in percent
    #[arg(long)]
    stock_percent: Option<Decimal>,
    /// Escrow holdback, in percent of gross
    #[arg(long)]
    escrow: Option<Decimal>,
    /// Management carve-out, in dollars
    #[arg(long)]
    carveout: Option<Decimal>,
    /// Transaction costs, in percent of gross
    #[arg(long)]
    transaction_costs: Option<Decimal>,
    /// Underwriter fees, in percent of gross
    #[arg(long)]
    underwriter_fees: Option<Decimal>,
    /// IPO lock-up period in days
    #[arg(long)]
    lockup_days: Option<u32>,
    /// Secondary shares sold in the IPO, in dollars
    #[arg(long)]
    secondary: Option<Decimal>,
    /// Print the full analysis as JSON
    #[arg(long)]
    json: bool,
}

impl ExitArgs {
    /// Fold the given flags into the stored exit parameters
    fn apply(&self, valuation: &mut Decimal, options: &mut ExitOptions) {
        if let Some(v) = self.valuation {
            *valuation = v;
        }

        let acquisition = &mut options.acquisition;
        if let Some(deal) = self.deal {
            acquisition.deal_structure = deal;
        }
        if let Some(pct) = self.stock_percent {
            acquisition.stock_percentage = pct;
        }
        if let Some(pct) = self.escrow {
            acquisition.escrow_percent = pct;
        }
        if let Some(amount) = self.carveout {
            acquisition.management_carveout = amount;
        }
        if let Some(pct) = self.transaction_costs {
            acquisition.transaction_costs_percent = pct;
        }

        let ipo = &mut options.ipo;
        if let Some(pct) = self.underwriter_fees {
            ipo.underwriter_fees_percent = pct;
        }
        if let Some(days) = self.lockup_days {
            ipo.lockup_days = days;
        }
        if let Some(amount) = self.secondary {
            ipo.secondary_offering = amount;
        }
    }

    fn scenario(&self, state: &StoredState) -> ExitScenario {
        ExitScenario {
            exit_type: if self.ipo {
                ExitType::Ipo
            } else {
                ExitType::Acquisition
            },
            valuation: state.exit_valuation,
            options: state.exit_options.clone(),
        }
    }
}

fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Load the stored inputs, run one edit, and save only if it changed something
fn edit_state<F>(store: &StateStore, edit: F) -> Result<()>
where
    F: FnOnce(&mut CapTableInputs) -> Result<Outcome>,
{
    let mut state = store.load();
    match edit(&mut state.cap_table)? {
        Outcome::Changed(message) => {
            store.try_save(&state).context("Failed to save state")?;
            info!(%message, "State updated");
            println!("✅ {}", message);
            if !state.cap_table.is_initial_allocation_valid() {
                let warning = AnalysisWarning::InitialAllocation {
                    total_percentage: state.cap_table.total_initial_percentage(),
                };
                println!("{}", render::warning_line(&warning));
            }
        }
        Outcome::Unchanged(output) => print!("{}", output),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = AppSettings::load(cli.config.as_deref())?;
    init_tracing(&settings.logging);

    let store = StateStore::new(cli.state.clone().unwrap_or_else(|| settings.state_file()));
    debug!(path = %store.path().display(), "Using state file");

    match cli.command {
        Commands::Init { force } => {
            if store.path().exists() && !force {
                bail!(
                    "State already exists at {} (use --force to overwrite)",
                    store.path().display()
                );
            }
            store
                .try_save(&StoredState::default())
                .context("Failed to write initial state")?;
            println!("✅ Initialized {}", store.path().display().to_string().green());
        }

        Commands::Presets => {
            for preset in ROUND_PRESETS.iter() {
                println!("{}", render::preset_line(preset));
            }
        }

        Commands::AddRound { preset } => {
            let mut state = store.load();
            let preset = match preset.as_deref() {
                Some(id) => match preset_by_id(id) {
                    Some(p) => p,
                    None => bail!("Unknown preset '{}' (see `captable presets`)", id),
                },
                None => next_round_preset(state.cap_table.funding_rounds.len()),
            };

            let round = state.cap_table.add_funding_round(&preset.template());
            info!(round = %round.name, id = round.id, "Added funding round");
            println!(
                "✅ Added {} (#{}) at {} pre-money, raising {}",
                round.name.green(),
                round.id,
                format_currency(round.pre_money_valuation),
                format_currency(round.total_investment())
            );
            store.try_save(&state).context("Failed to save state")?;
        }

        Commands::Table { final_only } => {
            let state = store.load();
            let inputs = &state.cap_table;
            if !inputs.is_initial_allocation_valid() {
                let warning = AnalysisWarning::InitialAllocation {
                    total_percentage: inputs.total_initial_percentage(),
                };
                println!("{}", render::warning_line(&warning));
            }

            let table = DilutionEngine::compute_cap_table(
                &inputs.founders,
                inputs.initial_option_pool,
                &inputs.funding_rounds,
            );

            if final_only {
                print!("{}", render::stakeholder_table(&table.stakeholders));
            } else {
                for snapshot in &table.snapshots {
                    print!("{}", render::snapshot_section(snapshot));
                    println!();
                }
            }
            println!("Total invested: {}", format_currency(table.total_invested).bold());
        }

        Commands::Exit(args) => {
            let mut state = store.load();
            args.apply(&mut state.exit_valuation, &mut state.exit_options);
            store.save(&state);

            let scenario = args.scenario(&state);
            let analysis = ExitAnalyzer::default().analyze(&state.cap_table, &scenario);

            if args.json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
                return Ok(());
            }

            print!("{}", render::proceeds_summary(scenario.exit_type, &analysis.proceeds));
            println!();
            print!("{}", render::payout_table(&analysis.payouts));
            for warning in &analysis.warnings {
                println!("{}", render::warning_line(warning));
            }
        }

        Commands::Founder { command } => edit_state(&store, |inputs| command.run(inputs))?,
        Commands::Pool { percent } => {
            edit_state(&store, |inputs| Ok(edit::set_pool(inputs, percent)))?
        }
        Commands::Round { command } => edit_state(&store, |inputs| command.run(inputs))?,
        Commands::Investor { command } => edit_state(&store, |inputs| command.run(inputs))?,

        Commands::Glossary { category, term } => {
            let matches = match term.as_deref() {
                Some(query) => glossary::search(query),
                None => glossary::GLOSSARY.iter().collect(),
            };
            if matches.is_empty() {
                bail!("No glossary entry matches '{}'", term.unwrap_or_default());
            }

            let categories = match category {
                Some(c) => vec![c],
                None => GlossaryCategory::ALL.to_vec(),
            };
            for category in categories {
                let terms: Vec<_> = matches
                    .iter()
                    .copied()
                    .filter(|t| t.category == category)
                    .collect();
                if !terms.is_empty() {
                    print!("{}", render::glossary_section(category, &terms));
                    println!();
                }
            }
        }
    }

    Ok(())
}
