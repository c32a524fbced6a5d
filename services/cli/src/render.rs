//! Plain-text rendering of cap tables, proceeds and payouts

use captable_config::RoundPreset;
use captable_engine::AnalysisWarning;
use captable_config::glossary::{GlossaryCategory, GlossaryTerm};
use captable_types::{
    format_currency, format_percentage, CapTableInputs, ExitPayout, ExitType, ProceedsBreakdown,
    RoundSnapshot, SaturatingSum, Stakeholder, StakeholderKind,
};
use colored::Colorize;
use std::fmt::Write;

const NAME_WIDTH: usize = 24;

fn kind_label(kind: StakeholderKind) -> &'static str {
    match kind {
        StakeholderKind::Founder => "founder",
        StakeholderKind::Investor => "investor",
        StakeholderKind::OptionPool => "pool",
    }
}

fn colored_name(stakeholder: &Stakeholder) -> String {
    let padded = format!("{:<width$}", stakeholder.name, width = NAME_WIDTH);
    match stakeholder.kind {
        StakeholderKind::Founder => padded.green().to_string(),
        StakeholderKind::Investor => padded.cyan().to_string(),
        StakeholderKind::OptionPool => padded.yellow().to_string(),
    }
}

fn terms(stakeholder: &Stakeholder) -> String {
    if !stakeholder.is_investor() {
        return String::new();
    }
    let mut terms = format!("{}x", stakeholder.preference_multiplier().normalize());
    if stakeholder.is_participating() {
        terms.push_str(" participating");
    }
    terms
}

pub fn stakeholder_table(stakeholders: &[Stakeholder]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format!(
            "{:<width$} {:<9} {:>9} {:>10}  {}",
            "Stakeholder",
            "Type",
            "Owns",
            "Invested",
            "Terms",
            width = NAME_WIDTH
        )
        .bold()
    );

    for s in stakeholders {
        let invested = s
            .invested_amount
            .map(format_currency)
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{} {:<9} {:>9} {:>10}  {}",
            colored_name(s),
            kind_label(s.kind),
            format_percentage(s.percentage),
            invested,
            terms(s)
        );
    }

    let total = stakeholders.iter().map(|s| s.percentage).saturating_sum();
    let _ = writeln!(
        out,
        "{:<width$} {:<9} {:>9}",
        "Total",
        "",
        format_percentage(total),
        width = NAME_WIDTH
    );
    out
}

pub fn snapshot_section(snapshot: &RoundSnapshot) -> String {
    let mut out = String::new();
    let heading = if snapshot.post_money_valuation.is_zero() {
        snapshot.name.clone()
    } else {
        format!(
            "{} (post-money {})",
            snapshot.name,
            format_currency(snapshot.post_money_valuation)
        )
    };
    let _ = writeln!(out, "{}", heading.bold().underline());
    out.push_str(&stakeholder_table(&snapshot.stakeholders));
    out
}

pub fn proceeds_summary(exit_type: ExitType, proceeds: &ProceedsBreakdown) -> String {
    let mut out = String::new();
    let title = match exit_type {
        ExitType::Acquisition => "Acquisition proceeds",
        ExitType::Ipo => "IPO proceeds",
    };
    let _ = writeln!(out, "{}", title.bold().underline());
    let _ = writeln!(out, "  {:<22}{:>12}", "Gross valuation", format_currency(proceeds.gross));

    let deductions = [
        ("Transaction costs", proceeds.transaction_costs),
        ("Escrow holdback", proceeds.escrow_amount),
        ("Management carve-out", proceeds.management_carveout),
        ("Underwriter fees", proceeds.underwriter_fees),
    ];
    for (label, amount) in deductions.iter().filter(|(_, amount)| !amount.is_zero()) {
        let _ = writeln!(out, "  {:<22}{:>12}", label, format!("-{}", format_currency(*amount)));
    }

    let net = format_currency(proceeds.net);
    let net = if proceeds.net.is_sign_negative() {
        net.red()
    } else {
        net.bold()
    };
    let _ = writeln!(out, "  {:<22}{:>12}", "Net to shareholders", net);
    out
}

pub fn payout_table(payouts: &[ExitPayout]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format!(
            "{:<width$} {:>9} {:>12} {:>9}",
            "Stakeholder",
            "Owns",
            "Payout",
            "Multiple",
            width = NAME_WIDTH
        )
        .bold()
    );

    for p in payouts {
        let multiple = p
            .return_multiple()
            .map(|m| format!("{:.2}x", m))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{} {:>9} {:>12} {:>9}",
            colored_name(&p.stakeholder),
            format_percentage(p.stakeholder.percentage),
            format_currency(p.payout),
            multiple
        );
        if let (Some(pref), Some(part)) = (p.preference_amount, p.participation_amount) {
            let _ = writeln!(
                out,
                "{:<width$}   preference {} + participation {}",
                "",
                format_currency(pref),
                format_currency(part),
                width = NAME_WIDTH
            );
        }
    }
    out
}

pub fn warning_line(warning: &AnalysisWarning) -> String {
    let message = match warning {
        AnalysisWarning::InitialAllocation { total_percentage } => format!(
            "Founders and initial pool add up to {}, not 100%",
            format_percentage(*total_percentage)
        ),
        AnalysisWarning::NegativeProceeds { net } => format!(
            "Deductions exceed the exit valuation (net {})",
            format_currency(*net)
        ),
        AnalysisWarning::PreferencesNotCovered {
            net,
            total_preferences,
        } => format!(
            "Net proceeds {} do not cover {} of liquidation preferences; common receives nothing",
            format_currency(*net),
            format_currency(*total_preferences)
        ),
        AnalysisWarning::PayoutDrift { net, total_payouts } => format!(
            "Payouts total {} but net proceeds are {}",
            format_currency(*total_payouts),
            format_currency(*net)
        ),
    };
    format!("{} {}", "warning:".yellow().bold(), message)
}

pub fn preset_line(preset: &RoundPreset) -> String {
    format!(
        "{:<10} {:<14} pre {:>8}  raise {:>8}  pool {:>6}  {}",
        preset.id.cyan(),
        preset.display_name,
        format_currency(preset.pre_money_valuation),
        format_currency(preset.typical_investment),
        format_percentage(preset.option_pool_percent),
        preset.description.dimmed()
    )
}

pub fn founder_list(inputs: &CapTableInputs) -> String {
    let mut out = String::new();
    for (position, founder) in inputs.founders.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}. #{:<4} {} {:>9}",
            position + 1,
            founder.id,
            format!("{:<width$}", founder.name, width = NAME_WIDTH).green(),
            format_percentage(founder.percentage)
        );
    }
    let _ = writeln!(
        out,
        "    {:<5} {} {:>9}",
        "",
        format!("{:<width$}", "Option Pool", width = NAME_WIDTH).yellow(),
        format_percentage(inputs.initial_option_pool)
    );
    out
}

pub fn round_list(inputs: &CapTableInputs) -> String {
    let mut out = String::new();
    if inputs.funding_rounds.is_empty() {
        let _ = writeln!(out, "No funding rounds");
        return out;
    }
    for round in &inputs.funding_rounds {
        let _ = writeln!(
            out,
            "#{:<4} {}  pre {}  pool top-up {}",
            round.id,
            round.name.bold(),
            format_currency(round.pre_money_valuation),
            format_percentage(round.option_pool_percent)
        );
        for investor in &round.investors {
            let mut terms = format!("{}x", investor.liquidation_preference.normalize());
            if investor.participating {
                terms.push_str(" participating");
            }
            let _ = writeln!(
                out,
                "      #{:<4} {} {:>10}  {}",
                investor.id,
                format!("{:<width$}", investor.name, width = NAME_WIDTH).cyan(),
                format_currency(investor.amount),
                terms
            );
        }
    }
    out
}

pub fn glossary_section(category: GlossaryCategory, terms: &[&GlossaryTerm]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", category.title().bold().underline());
    for term in terms {
        let _ = writeln!(out, "{} {}", term.term.cyan().bold(), format!("({})", term.key).dimmed());
        let _ = writeln!(out, "  {}", term.definition);
    }
    out
}
