//! Money calculation utilities using rust_decimal for precision
//!
//! All monetary arithmetic runs on `Decimal`; values convert to `f64` only
//! at the storage/serialization boundary, rounded to 2 decimal places
//! half-up.

use rust_decimal::prelude::*;

/// Monetary values carry 2 decimal places
const DECIMAL_PLACES: u32 = 2;

/// VAT rate applied to the cart subtotal at checkout (12%)
pub const TAX_RATE: Decimal = Decimal::from_parts(12, 0, 0, false, 2);

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round to 2 decimal places, half-up
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// VAT owed on a subtotal: `round2(subtotal * 0.12)`.
///
/// Pure; the cart never includes tax — it is computed once, at checkout.
pub fn tax_for(subtotal: Decimal) -> Decimal {
    round_money(subtotal * TAX_RATE)
}

/// Line subtotal: unit price × quantity.
pub fn line_subtotal(unit_price: f64, quantity: i64) -> f64 {
    to_f64(to_decimal(unit_price) * Decimal::from(quantity))
}
