//! Account entity and safe snapshot
//!
//! This module contains the Account entity that owns a wallet balance, the
//! saved cards, the advisory transaction limit, and the append-only history.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::entities::card::SavedCard;
use crate::domain::entities::entry::LedgerEntry;
use crate::shared::error::LedgerError;
use crate::shared::types::{AccountId, CardId};
use crate::shared::utils::{generate_id, round_amount};

/// Core account entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub balance: Decimal,
    /// Advisory spending ceiling, surfaced to clients and never enforced
    pub transaction_limit: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_hash: Option<String>,
    #[serde(default)]
    pub cards: Vec<SavedCard>,
    #[serde(default)]
    pub history: Vec<LedgerEntry>,
    #[serde(default = "default_active")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl Account {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        transaction_limit: Decimal,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            name: name.into(),
            email: email.into(),
            balance: Decimal::ZERO,
            transaction_limit,
            pin_hash: None,
            cards: Vec::new(),
            history: Vec::new(),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_pin(&self) -> bool {
        self.pin_hash.is_some()
    }

    /// Add funds to the wallet balance
    pub fn credit_balance(&mut self, amount: Decimal) {
        self.balance += amount;
    }

    /// Take funds from the wallet balance, failing without mutation when short
    pub fn debit_balance(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        if self.balance < amount {
            return Err(LedgerError::insufficient_funds(self.balance, amount));
        }

        self.balance -= amount;
        Ok(())
    }

    /// Get a saved card by id
    pub fn card(&self, card_id: &str) -> Result<&SavedCard, LedgerError> {
        self.cards
            .iter()
            .find(|card| card.id == card_id)
            .ok_or_else(|| LedgerError::card_not_found(card_id))
    }

    /// Get a saved card by id for mutation
    pub fn card_mut(&mut self, card_id: &str) -> Result<&mut SavedCard, LedgerError> {
        self.cards
            .iter_mut()
            .find(|card| card.id == card_id)
            .ok_or_else(|| LedgerError::card_not_found(card_id))
    }

    /// Remove a saved card, returning it for settlement
    pub fn take_card(&mut self, card_id: &CardId) -> Result<SavedCard, LedgerError> {
        let index = self
            .cards
            .iter()
            .position(|card| &card.id == card_id)
            .ok_or_else(|| LedgerError::card_not_found(card_id.clone()))?;

        Ok(self.cards.remove(index))
    }

    /// Append a history entry.
    ///
    /// Timestamps are kept non decreasing: an entry stamped behind the
    /// previous one is clamped forward instead of reordering the log.
    pub fn record(&mut self, mut entry: LedgerEntry) {
        if let Some(last) = self.history.last() {
            if entry.timestamp < last.timestamp {
                entry.timestamp = last.timestamp;
            }
        }

        self.history.push(entry);
    }

    /// Round balances to the currency scale and clamp corrupt negatives
    /// back to zero. History entries are never rewritten.
    pub fn normalize(&mut self) {
        if self.balance < Decimal::ZERO {
            log::warn!(
                "Account {} balance was negative ({}), clamping to zero",
                self.id,
                self.balance
            );
            self.balance = Decimal::ZERO;
        }
        self.balance = round_amount(self.balance);

        for card in &mut self.cards {
            if card.balance < Decimal::ZERO {
                log::warn!(
                    "Card {} balance was negative ({}), clamping to zero",
                    card.id,
                    card.balance
                );
                card.balance = Decimal::ZERO;
            }
            card.balance = round_amount(card.balance);
        }
    }

    /// Mark the account as updated
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Convert to an AccountSnapshot for safe serialization (no PIN hash)
    pub fn snapshot(&self) -> AccountSnapshot {
        AccountSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            balance: self.balance,
            transaction_limit: self.transaction_limit,
            has_pin: self.has_pin(),
            active: self.active,
            cards: self.cards.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Safe account information for serialization (no PIN hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub balance: Decimal,
    pub transaction_limit: Decimal,
    pub has_pin: bool,
    pub active: bool,
    pub cards: Vec<SavedCard>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountSnapshot {
    fn from(account: Account) -> Self {
        account.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn test_account() -> Account {
        Account::new("Test User", "test@example.com", dec!(10000))
    }

    #[test]
    fn test_account_creation() {
        let account = test_account();

        assert_eq!(account.balance, Decimal::ZERO);
        assert_eq!(account.transaction_limit, dec!(10000));
        assert!(account.active);
        assert!(account.cards.is_empty());
        assert!(account.history.is_empty());
        assert!(!account.has_pin());
    }

    #[test]
    fn test_credit_and_debit_balance() {
        let mut account = test_account();

        account.credit_balance(dec!(500));
        account.debit_balance(dec!(200)).expect("sufficient funds");

        assert_eq!(account.balance, dec!(300));
    }

    #[test]
    fn test_failed_debit_leaves_balance_unchanged() {
        let mut account = test_account();
        account.credit_balance(dec!(100));

        let result = account.debit_balance(dec!(100.01));

        assert!(matches!(result, Err(LedgerError::InsufficientFunds { .. })));
        assert_eq!(account.balance, dec!(100));
    }

    #[test]
    fn test_record_clamps_backwards_timestamps() {
        let mut account = test_account();

        account.record(LedgerEntry::credit(dec!(10), "first"));
        let last_stamp = account.history[0].timestamp;

        let mut stale = LedgerEntry::credit(dec!(5), "second");
        stale.timestamp = last_stamp - chrono::Duration::seconds(30);
        account.record(stale);

        assert_eq!(account.history.len(), 2);
        assert_eq!(account.history[1].timestamp, last_stamp);
        assert!(account.history[0].timestamp <= account.history[1].timestamp);
    }

    #[test]
    fn test_normalize_clamps_corrupt_balances() {
        let mut account = test_account();
        account.balance = dec!(-42.5);
        account.cards.push(SavedCard::new("Visa", "4242", "12/27", dec!(-1)));

        account.normalize();

        assert_eq!(account.balance, Decimal::ZERO);
        assert_eq!(account.cards[0].balance, Decimal::ZERO);
    }

    #[test]
    fn test_normalize_rounds_to_currency_scale() {
        let mut account = test_account();
        account.balance = dec!(10.005);

        account.normalize();

        assert_eq!(account.balance, dec!(10.01));
    }

    #[test]
    fn test_snapshot_hides_pin_hash() {
        let mut account = test_account();
        account.pin_hash = Some("$argon2id$v=19$m=65536,t=3,p=1$abc$def".to_string());

        let snapshot = account.snapshot();
        assert!(snapshot.has_pin);

        let json = serde_json::to_value(&snapshot).expect("serialize snapshot");
        let object = json.as_object().expect("snapshot serializes to an object");
        assert!(!object.contains_key("pin_hash"));
    }

    #[test]
    fn test_deserialize_tolerates_missing_fields() {
        // Older records lack cards, history, and the active flag
        let json = r#"{
            "id": "legacy-1",
            "name": "Legacy User",
            "email": "legacy@example.com",
            "balance": "12.50",
            "transaction_limit": "10000",
            "created_at": "2023-01-01T00:00:00Z",
            "updated_at": "2023-01-01T00:00:00Z"
        }"#;

        let account: Account = serde_json::from_str(json).expect("deserialize legacy account");

        assert_eq!(account.balance, dec!(12.50));
        assert!(account.active);
        assert!(account.cards.is_empty());
        assert!(account.history.is_empty());
        assert!(account.pin_hash.is_none());
    }

    proptest! {
        #[test]
        fn balance_is_conserved_over_random_sequences(
            ops in proptest::collection::vec((any::<bool>(), 1i64..1_000_000), 1..100)
        ) {
            let mut account = Account::new("Prop User", "prop@example.com", dec!(10000));
            let mut expected = Decimal::ZERO;

            for (is_credit, cents) in ops {
                let amount = Decimal::new(cents, 2);
                if is_credit {
                    account.credit_balance(amount);
                    expected += amount;
                } else if account.debit_balance(amount).is_ok() {
                    expected -= amount;
                }
            }

            prop_assert_eq!(account.balance, expected);
            prop_assert!(account.balance >= Decimal::ZERO);
        }
    }
}
