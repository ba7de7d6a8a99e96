//! Rounding to whole won.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount to the nearest whole won, halves away from zero.
///
/// # Examples
///
/// ```
/// use salary_calculator::calculation::round_won;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_won(Decimal::from_str("15280.49").unwrap()), Decimal::from(15280));
/// assert_eq!(round_won(Decimal::from_str("11460.5").unwrap()), Decimal::from(11461));
/// ```
pub fn round_won(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
