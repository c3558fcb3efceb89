//! Input validation helpers
//!
//! Centralized limits and checks shared by the CRUD handlers and the
//! checkout path. Everything here runs before any database work, so a
//! rejected request leaves no trace.

use crate::utils::AppError;

// ── Limits ──────────────────────────────────────────────────────────

/// Entity names: category, menu item, customer, staff
pub const MAX_NAME_LEN: usize = 200;

/// Freeform notes on tracking entries
pub const MAX_NOTE_LEN: usize = 500;

/// Delivery addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// A usable delivery address needs at least house/street level detail
pub const MIN_ADDRESS_LEN: usize = 10;

/// Card numbers are exactly 8 digits
pub const CARD_NUMBER_LEN: usize = 8;

/// Ceiling for menu prices
pub const MAX_PRICE: f64 = 1_000_000.0;

// ── Helpers ─────────────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a delivery address: trimmed, within bounds.
pub fn validate_address(address: &str) -> Result<(), AppError> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("delivery address must not be empty"));
    }
    if trimmed.len() < MIN_ADDRESS_LEN {
        return Err(AppError::validation(format!(
            "delivery address is too short (min {MIN_ADDRESS_LEN} chars) — include house number, street and city"
        )));
    }
    if trimmed.len() > MAX_ADDRESS_LEN {
        return Err(AppError::validation(format!(
            "delivery address is too long (max {MAX_ADDRESS_LEN} chars)"
        )));
    }
    Ok(())
}

/// Validate a card number: exactly [`CARD_NUMBER_LEN`] ASCII digits.
pub fn validate_card_number(card: &str) -> Result<(), AppError> {
    if card.len() != CARD_NUMBER_LEN || !card.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::validation(format!(
            "card number must be exactly {CARD_NUMBER_LEN} digits"
        )));
    }
    Ok(())
}

/// Validate a menu price: finite, positive, below the ceiling.
pub fn validate_price(price: f64) -> Result<(), AppError> {
    if !price.is_finite() {
        return Err(AppError::validation(format!(
            "price must be a finite number, got {price}"
        )));
    }
    if price <= 0.0 {
        return Err(AppError::validation(format!(
            "price must be positive, got {price}"
        )));
    }
    if price > MAX_PRICE {
        return Err(AppError::validation(format!(
            "price exceeds maximum allowed ({MAX_PRICE}), got {price}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_empty_and_whitespace() {
        assert!(validate_required_text("Lunch", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn address_needs_house_and_street_detail() {
        assert!(validate_address("123 Mabini St, Quezon City").is_ok());
        assert!(validate_address("").is_err());
        assert!(validate_address("short").is_err());
        assert!(validate_address("         ").is_err());
        assert!(validate_address(&"a".repeat(501)).is_err());
    }

    #[test]
    fn card_number_is_exactly_eight_digits() {
        assert!(validate_card_number("12345678").is_ok());
        assert!(validate_card_number("1234567").is_err());
        assert!(validate_card_number("123456789").is_err());
        assert!(validate_card_number("1234567a").is_err());
        assert!(validate_card_number("1234 678").is_err());
    }

    #[test]
    fn price_bounds() {
        assert!(validate_price(120.50).is_ok());
        assert!(validate_price(0.0).is_err());
        assert!(validate_price(-1.0).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
        assert!(validate_price(MAX_PRICE + 1.0).is_err());
    }
}
