//! Money helpers
//!
//! All monetary values are `Decimal` with 2 decimal places, rounded half away
//! from zero.

use rust_decimal::prelude::*;

/// Rounding precision for monetary values
pub const DECIMAL_PLACES: u32 = 2;

/// Round a monetary value to 2 decimal places (half-up)
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Largest list price an admin may commit (1,000,000.00)
pub const MAX_PRICE: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 2);

/// Largest quantity on one order line
pub const MAX_QUANTITY: u32 = 9999;

/// Convert Decimal to f64 for JSON details, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// Format an amount as a euro string
///
/// ```
/// use rust_decimal::Decimal;
/// use shared::money::format_eur;
///
/// assert_eq!(format_eur(Decimal::new(1250, 2)), "12.50€");
/// assert_eq!(format_eur(Decimal::new(-1222, 2)), "-12.22€");
/// ```
pub fn format_eur(amount: Decimal) -> String {
    format!("{:.2}€", round_money(amount))
}
