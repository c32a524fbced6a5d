//! Overflow-free Decimal arithmetic
//!
//! The `+`, `-`, `*` and `/` operators on [`Decimal`] panic once a result
//! leaves the ±7.9e28 range. Every calculation over user-entered amounts goes
//! through these helpers instead, so a pathological input (negative valuations
//! compounding across rounds, absurd preference stacks) yields a clamped
//! number rather than a panic:
//!
//! - sums, differences and products clamp to [`Decimal::MAX`] / [`Decimal::MIN`]
//! - division by zero is zero
//! - an overflowing quotient clamps by the sign of the result

use rust_decimal::Decimal;

/// `numerator / denominator`, zero for a zero denominator, clamped on overflow
pub fn saturating_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or_else(|| {
        if numerator.is_sign_negative() == denominator.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}

/// `value * percent / 100`, clamped
pub fn percent_of(value: Decimal, percent: Decimal) -> Decimal {
    value.saturating_mul(saturating_div(percent, Decimal::ONE_HUNDRED))
}

/// Clamped summation for iterators of [`Decimal`]
pub trait SaturatingSum: Iterator<Item = Decimal> + Sized {
    fn saturating_sum(self) -> Decimal {
        self.fold(Decimal::ZERO, Decimal::saturating_add)
    }
}

impl<I: Iterator<Item = Decimal>> SaturatingSum for I {}
