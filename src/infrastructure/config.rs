//! Ledger configuration
//!
//! This module contains the runtime configuration for the wallet ledger,
//! loaded from environment variables with safe defaults.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::shared::constants::{
    DEFAULT_CARD_ALLOWANCE, DEFAULT_DATA_DIR, DEFAULT_TRANSACTION_LIMIT,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Directory holding one JSON file per account
    pub data_dir: PathBuf,
    /// Advisory transaction limit assigned to new accounts
    pub default_transaction_limit: Decimal,
    /// Balance granted to a newly saved card
    pub card_starting_allowance: Decimal,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            default_transaction_limit: Decimal::from(DEFAULT_TRANSACTION_LIMIT),
            card_starting_allowance: Decimal::from(DEFAULT_CARD_ALLOWANCE),
        }
    }
}

impl LedgerConfig {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// Keys: WALLET_LEDGER_DATA_DIR, WALLET_LEDGER_DEFAULT_LIMIT,
    ///       WALLET_LEDGER_CARD_ALLOWANCE
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let data_dir = env::var("WALLET_LEDGER_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let default_transaction_limit = decimal_env(
            "WALLET_LEDGER_DEFAULT_LIMIT",
            defaults.default_transaction_limit,
        );
        let card_starting_allowance = decimal_env(
            "WALLET_LEDGER_CARD_ALLOWANCE",
            defaults.card_starting_allowance,
        );

        Self {
            data_dir,
            default_transaction_limit,
            card_starting_allowance,
        }
    }
}

fn decimal_env(key: &str, default: Decimal) -> Decimal {
    match env::var(key) {
        Ok(raw) => match Decimal::from_str(&raw) {
            Ok(value) if value > Decimal::ZERO => value,
            _ => {
                log::warn!("Ignoring invalid {} value: {}", key, raw);
                default
            }
        },
        Err(_) => default,
    }
}
