//! Saved card entity
//!
//! This module contains the saved card attached to an account. A card keeps
//! only display fields and its own balance; the card number and CVV are
//! read once at entry time and never stored.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::shared::error::LedgerError;
use crate::shared::types::CardId;
use crate::shared::utils::generate_id;

/// A saved card: a display identity plus an independent sub balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedCard {
    pub id: CardId,
    pub brand: String,
    pub last4: String,
    pub expiry: String,
    pub balance: Decimal,
}

impl SavedCard {
    pub fn new(
        brand: impl Into<String>,
        last4: impl Into<String>,
        expiry: impl Into<String>,
        balance: Decimal,
    ) -> Self {
        Self {
            id: generate_id(),
            brand: brand.into(),
            last4: last4.into(),
            expiry: expiry.into(),
            balance,
        }
    }

    /// Display label, e.g. "Visa **4242"
    pub fn label(&self) -> String {
        format!("{} **{}", self.brand, self.last4)
    }

    /// Add funds to the card balance
    pub fn deposit(&mut self, amount: Decimal) {
        self.balance += amount;
    }

    /// Take funds from the card balance, failing without mutation when short
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        if self.balance < amount {
            return Err(LedgerError::insufficient_card_funds(self.balance, amount));
        }

        self.balance -= amount;
        Ok(())
    }
}
