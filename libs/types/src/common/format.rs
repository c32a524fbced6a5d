//! Display formatting for money and percentages
//!
//! Presentation only. Nothing here feeds back into the engines.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Format a dollar amount with a B/M/K suffix
///
/// Billions and millions keep two decimals, thousands and smaller are whole
/// dollars. Negative amounts are rendered with a leading minus sign.
pub fn format_currency(amount: Decimal) -> String {
    if amount.is_sign_negative() && !amount.is_zero() {
        return format!("-{}", format_currency(amount.abs()));
    }

    if amount >= dec!(1_000_000_000) {
        format!("${:.2}B", round_half_up(amount / dec!(1_000_000_000), 2))
    } else if amount >= dec!(1_000_000) {
        format!("${:.2}M", round_half_up(amount / dec!(1_000_000), 2))
    } else if amount >= dec!(1_000) {
        format!("${:.0}K", round_half_up(amount / dec!(1_000), 0))
    } else {
        format!("${:.0}", round_half_up(amount, 0))
    }
}

/// Format a percentage with two decimals, e.g. `16.67%`
pub fn format_percentage(percentage: Decimal) -> String {
    format!("{:.2}%", round_half_up(percentage, 2))
}

fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
