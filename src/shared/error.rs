//! Error handling for the wallet ledger
//!
//! This module defines the error types used throughout the wallet ledger.

use rust_decimal::Decimal;
use thiserror::Error;

/// Ledger error type
#[derive(Error, Debug, Clone)]
pub enum LedgerError {
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Card not found: {0}")]
    CardNotFound(String),

    #[error("Recipient not found: {0}")]
    RecipientNotFound(String),

    #[error("Account already exists: {0}")]
    AccountExists(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Insufficient funds: have {available}, need {requested}")]
    InsufficientFunds {
        available: Decimal,
        requested: Decimal,
    },

    #[error("Insufficient card funds: have {available}, need {requested}")]
    InsufficientCardFunds {
        available: Decimal,
        requested: Decimal,
    },

    #[error("Invalid PIN")]
    InvalidPin,

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Transient storage error: {0}")]
    Transient(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Create an account not found error
    pub fn account_not_found(handle: impl Into<String>) -> Self {
        Self::AccountNotFound(handle.into())
    }

    /// Create a card not found error
    pub fn card_not_found(card_id: impl Into<String>) -> Self {
        Self::CardNotFound(card_id.into())
    }

    /// Create a recipient not found error
    pub fn recipient_not_found(handle: impl Into<String>) -> Self {
        Self::RecipientNotFound(handle.into())
    }

    /// Create an account already exists error
    pub fn account_exists(email: impl Into<String>) -> Self {
        Self::AccountExists(email.into())
    }

    /// Create an invalid amount error
    pub fn invalid_amount(message: impl Into<String>) -> Self {
        Self::InvalidAmount(message.into())
    }

    /// Create an insufficient funds error
    pub fn insufficient_funds(available: Decimal, requested: Decimal) -> Self {
        Self::InsufficientFunds {
            available,
            requested,
        }
    }

    /// Create an insufficient card funds error
    pub fn insufficient_card_funds(available: Decimal, requested: Decimal) -> Self {
        Self::InsufficientCardFunds {
            available,
            requested,
        }
    }

    /// Create an invalid operation error
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation(message.into())
    }

    /// Create a transient storage error
    pub fn transient(message: impl Into<String>) -> Self {
        Self::Transient(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// True when retrying the same call may succeed without any state change
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

// Standard library error conversions
impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::transient(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::transient(format!("JSON error: {}", err))
    }
}

impl From<tokio::task::JoinError> for LedgerError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::internal(format!("Task join error: {}", err))
    }
}

impl From<argon2::password_hash::Error> for LedgerError {
    fn from(err: argon2::password_hash::Error) -> Self {
        Self::internal(format!("PIN hash error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_error_creation() {
        let not_found = LedgerError::account_not_found("user-1");
        let exists = LedgerError::account_exists("taken@example.com");
        let invalid = LedgerError::invalid_amount("Amount must be positive");

        assert!(matches!(not_found, LedgerError::AccountNotFound(_)));
        assert!(matches!(exists, LedgerError::AccountExists(_)));
        assert!(matches!(invalid, LedgerError::InvalidAmount(_)));
    }

    #[test]
    fn test_error_conversions() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let ledger_error: LedgerError = io_error.into();

        assert!(matches!(ledger_error, LedgerError::Transient(_)));
        assert!(ledger_error.is_transient());
    }

    #[test]
    fn test_insufficient_funds_display() {
        let error = LedgerError::insufficient_funds(Decimal::new(1050, 2), Decimal::new(2000, 2));
        let display = format!("{}", error);

        assert!(display.contains("Insufficient funds"));
        assert!(display.contains("10.50"));
        assert!(display.contains("20.00"));
    }

    #[test]
    fn test_invalid_pin_display() {
        let display = format!("{}", LedgerError::InvalidPin);
        assert_eq!(display, "Invalid PIN");
    }
}
