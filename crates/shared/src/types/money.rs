//! Money helpers with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` end to end. Rounding to cents is a
//! presentation concern and must never be applied to running sums.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fraction digits shown for money values.
pub const DISPLAY_SCALE: u32 = 2;

/// Rounds an amount to cents for display (half away from zero).
#[must_use]
pub fn to_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Sums amounts exactly.
pub fn sum<'a>(amounts: impl IntoIterator<Item = &'a Decimal>) -> Decimal {
    amounts.into_iter().copied().sum()
}
