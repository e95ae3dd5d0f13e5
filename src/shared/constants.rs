//! Constants for the wallet ledger
//!
//! This module contains all constants used throughout the wallet ledger.

// Currency constants
pub const CURRENCY_SCALE: u32 = 2;

// Account defaults
pub const DEFAULT_TRANSACTION_LIMIT: i64 = 10_000;
pub const DEFAULT_CARD_ALLOWANCE: i64 = 50_000;

// Entry descriptions used when the caller supplies none
pub const DEFAULT_CREDIT_DESCRIPTION: &str = "Added funds";
pub const DEFAULT_DEBIT_DESCRIPTION: &str = "Payment";
pub const DEFAULT_CARD_PAYMENT_DESCRIPTION: &str = "Card payment";

// Card constants
pub const CARD_NUMBER_MIN_DIGITS: usize = 12;
pub const CARD_NUMBER_MAX_DIGITS: usize = 19;
pub const CARD_LAST4_LENGTH: usize = 4;

// PIN constants
pub const PIN_MIN_LENGTH: usize = 4;
pub const PIN_MAX_LENGTH: usize = 6;

// PIN hashing constants
pub const ARGON2_MEMORY_COST: u32 = 65536; // 64MB
pub const ARGON2_TIME_COST: u32 = 3;
pub const ARGON2_PARALLELISM: u32 = 1;
pub const PIN_HASH_LENGTH: usize = 32;
pub const PIN_SALT_LENGTH: usize = 32;

// Storage constants
pub const DEFAULT_DATA_DIR: &str = "data/accounts";
pub const ACCOUNT_FILE_EXTENSION: &str = "json";

// Development and testing constants
pub const DEV_MODE: bool = cfg!(debug_assertions);
pub const TEST_MODE: bool = cfg!(test);

// Build information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_constants() {
        assert_eq!(CURRENCY_SCALE, 2);
    }

    #[test]
    fn test_account_defaults() {
        assert_eq!(DEFAULT_TRANSACTION_LIMIT, 10_000);
        assert_eq!(DEFAULT_CARD_ALLOWANCE, 50_000);
    }

    #[test]
    fn test_pin_constants() {
        assert!(PIN_MIN_LENGTH < PIN_MAX_LENGTH);
        assert_eq!(PIN_MIN_LENGTH, 4);
        assert_eq!(PIN_MAX_LENGTH, 6);
    }

    #[test]
    fn test_card_constants() {
        assert!(CARD_NUMBER_MIN_DIGITS > CARD_LAST4_LENGTH);
        assert!(CARD_NUMBER_MIN_DIGITS < CARD_NUMBER_MAX_DIGITS);
    }
}
