//! Saved card registration
//!
//! This module derives the display identity of a saved card from raw entry
//! details. The entered number is used for brand and last4 derivation and
//! then dropped; neither the number nor the CVV is ever stored.

use rust_decimal::Decimal;

use crate::domain::entities::SavedCard;
use crate::shared::constants::{CARD_LAST4_LENGTH, CARD_NUMBER_MAX_DIGITS, CARD_NUMBER_MIN_DIGITS};
use crate::shared::error::LedgerError;
use crate::shared::types::{LedgerResult, NewCardDetails};

/// Detect the card brand from the leading digits of the number
pub fn detect_brand(number: &str) -> &'static str {
    let prefix2: u32 = number.get(0..2).and_then(|s| s.parse().ok()).unwrap_or(0);
    let prefix3: u32 = number.get(0..3).and_then(|s| s.parse().ok()).unwrap_or(0);
    let prefix4: u32 = number.get(0..4).and_then(|s| s.parse().ok()).unwrap_or(0);

    if prefix2 == 34 || prefix2 == 37 {
        "Amex"
    } else if (51..=55).contains(&prefix2) || (2221..=2720).contains(&prefix4) {
        "Mastercard"
    } else if prefix4 == 6011 || (644..=649).contains(&prefix3) || prefix2 == 65 {
        "Discover"
    } else if prefix2 == 60 || prefix2 == 81 || prefix2 == 82 || prefix3 == 508 {
        "RuPay"
    } else if number.starts_with('4') {
        "Visa"
    } else {
        "Card"
    }
}

/// Strip separators and validate the card number shape
pub fn sanitize_number(raw: &str) -> LedgerResult<String> {
    let digits: String = raw.chars().filter(|c| !matches!(c, ' ' | '-')).collect();

    let valid = digits.len() >= CARD_NUMBER_MIN_DIGITS
        && digits.len() <= CARD_NUMBER_MAX_DIGITS
        && digits.chars().all(|c| c.is_ascii_digit());

    if !valid {
        return Err(LedgerError::invalid_operation(format!(
            "Card number must be {} to {} digits",
            CARD_NUMBER_MIN_DIGITS, CARD_NUMBER_MAX_DIGITS
        )));
    }

    Ok(digits)
}

/// Build a saved card from raw entry details.
/// Validation happens up front so a rejected card never mutates the account.
pub fn register_card(
    details: &NewCardDetails,
    starting_allowance: Decimal,
) -> LedgerResult<SavedCard> {
    let digits = sanitize_number(&details.number)?;

    let expiry = details.expiry.trim();
    if expiry.is_empty() {
        return Err(LedgerError::invalid_operation("Card expiry cannot be empty"));
    }

    let brand = detect_brand(&digits);
    let last4 = digits[digits.len() - CARD_LAST4_LENGTH..].to_string();

    Ok(SavedCard::new(brand, last4, expiry, starting_allowance))
}
