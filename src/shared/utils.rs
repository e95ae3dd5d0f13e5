//! Utility functions for the wallet ledger
//!
//! This module contains common utility functions used throughout the wallet ledger.

use crate::shared::constants::{CURRENCY_SCALE, PIN_MAX_LENGTH, PIN_MIN_LENGTH};
use crate::shared::error::LedgerError;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Generate a unique ID
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Round an amount to the currency scale
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert a raw float into a decimal amount, rejecting non-finite values
pub fn amount_from_f64(value: f64) -> Result<Decimal, LedgerError> {
    if !value.is_finite() {
        return Err(LedgerError::invalid_amount("Amount must be a finite number"));
    }

    Decimal::from_f64(value)
        .ok_or_else(|| LedgerError::invalid_amount("Amount is not representable"))
}

/// Validate and round an amount supplied at the operation boundary.
///
/// Amounts must be strictly positive and must not vanish when rounded
/// to the currency scale.
pub fn normalize_amount(amount: Decimal) -> Result<Decimal, LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::invalid_amount("Amount must be positive"));
    }

    let rounded = round_amount(amount);
    if rounded <= Decimal::ZERO {
        return Err(LedgerError::invalid_amount(
            "Amount is below the smallest currency unit",
        ));
    }

    Ok(rounded)
}

/// Validate an account display name
pub fn validate_name(name: &str) -> Result<(), LedgerError> {
    if name.trim().is_empty() {
        return Err(LedgerError::invalid_operation("Name cannot be empty"));
    }

    Ok(())
}

/// Validate an email address shape
pub fn validate_email(email: &str) -> Result<(), LedgerError> {
    if email.trim().is_empty() {
        return Err(LedgerError::invalid_operation("Email cannot be empty"));
    }

    if email.chars().any(char::is_whitespace) {
        return Err(LedgerError::invalid_operation(
            "Email cannot contain whitespace",
        ));
    }

    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(LedgerError::invalid_operation("Invalid email address")),
    }
}

/// Validate the PIN format before it is hashed or verified
pub fn validate_pin_format(pin: &str) -> Result<(), LedgerError> {
    let digits = pin.len() >= PIN_MIN_LENGTH
        && pin.len() <= PIN_MAX_LENGTH
        && pin.chars().all(|c| c.is_ascii_digit());

    if !digits {
        return Err(LedgerError::invalid_operation(format!(
            "PIN must be {} to {} digits",
            PIN_MIN_LENGTH, PIN_MAX_LENGTH
        )));
    }

    Ok(())
}
