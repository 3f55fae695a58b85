//! Currency rounding rule.
//!
//! All currency arithmetic stays on exact [`Decimal`] values; the single
//! rounding rule here is applied only at the points where an amount is
//! emitted into a preview line, record, or resolved component, never
//! mid-calculation.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places currency amounts are emitted with.
pub const CURRENCY_SCALE: u32 = 2;

/// Rounds a currency amount half-up to [`CURRENCY_SCALE`] decimal places.
///
/// The result is rescaled to exactly two decimal places so emitted amounts
/// serialize uniformly (`30000.00`, not `30000`).
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let half = Decimal::from_str("10.005").unwrap();
/// assert_eq!(round_currency(half), Decimal::from_str("10.01").unwrap());
///
/// let down = Decimal::from_str("10.004").unwrap();
/// assert_eq!(round_currency(down), Decimal::from_str("10.00").unwrap());
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(CURRENCY_SCALE);
    rounded
}
